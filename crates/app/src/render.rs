//! Text and JSON rendering of command results.

use std::fmt::Write;

use engine::{
    Currency, Vehicle,
    analytics::{
        ExpenseAlert, MonthlyExpenseData, OdometerValidation, ServiceSuggestion, VehicleReport,
    },
};
use serde::Serialize;

use crate::{config::OutputFormat, error::Result};

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

pub fn vehicles(vehicles: &[Vehicle], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(vehicles);
    }
    let mut out = String::new();
    if vehicles.is_empty() {
        writeln!(out, "No vehicles recorded.")?;
    }
    for vehicle in vehicles {
        writeln!(
            out,
            "{}  {} {}, {} km  {}",
            vehicle.id,
            vehicle.label(),
            vehicle.year,
            vehicle.current_mileage,
            vehicle.kind.as_str()
        )?;
    }
    Ok(out)
}

#[derive(Serialize)]
struct MonthlyOutput<'a> {
    months: &'a [MonthlyExpenseData],
    alert: &'a ExpenseAlert,
}

pub fn monthly(
    months: &[MonthlyExpenseData],
    alert: &ExpenseAlert,
    currency: Currency,
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Json {
        return json(&MonthlyOutput { months, alert });
    }
    let mut out = String::new();
    write_months(&mut out, months, currency)?;
    if let Some(message) = &alert.message {
        writeln!(out, "! {message}")?;
    }
    Ok(out)
}

fn write_months(out: &mut String, months: &[MonthlyExpenseData], currency: Currency) -> Result<()> {
    if months.is_empty() {
        writeln!(out, "No expenses recorded.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<8} {:>12} {:>12} {:>12} {:>12}",
        "month", "fuel", "maintenance", "insurance", "total"
    )?;
    for data in months {
        writeln!(
            out,
            "{:<8} {:>12} {:>12} {:>12} {:>12}",
            data.month,
            currency.format_major(data.fuel),
            currency.format_major(data.maintenance),
            currency.format_major(data.insurance),
            currency.format_major(data.total)
        )?;
    }
    Ok(())
}

pub fn services(suggestions: &[ServiceSuggestion], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(suggestions);
    }
    let mut out = String::new();
    write_services(&mut out, suggestions)?;
    Ok(out)
}

fn write_services(out: &mut String, suggestions: &[ServiceSuggestion]) -> Result<()> {
    if suggestions.is_empty() {
        writeln!(out, "No service due.")?;
    }
    for suggestion in suggestions {
        writeln!(
            out,
            "{:<16} at {} km: {}",
            suggestion.category, suggestion.suggested_mileage, suggestion.reason
        )?;
    }
    Ok(())
}

pub fn odometer(validation: &OdometerValidation, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(validation);
    }
    Ok(match &validation.message {
        Some(message) => format!("{message}\n"),
        None => "Reading is valid.\n".to_string(),
    })
}

pub fn report(report: &VehicleReport, currency: Currency, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(report);
    }
    let vehicle = &report.vehicle;
    let stats = &report.quick_stats;
    let tco = &report.total_cost_of_ownership;
    let mut out = String::new();

    writeln!(out, "{} {}, {} km", vehicle.label(), vehicle.year, vehicle.current_mileage)?;
    writeln!(out, "as of {}", report.generated_at.format("%Y-%m-%d"))?;

    writeln!(out, "\nSpending")?;
    writeln!(out, "  total        {}", stats.total_spent)?;
    writeln!(out, "  fuel         {}", stats.total_fuel)?;
    writeln!(out, "  maintenance  {}", stats.total_maintenance)?;
    match stats.average_fill {
        Some(average) => writeln!(out, "  average fill {average:.2}")?,
        None => writeln!(out, "  average fill N/A")?,
    }
    writeln!(out, "  cost per km  {}", currency.format_major(report.cost_per_km))?;

    writeln!(out, "\nFuel economy (l/100km)")?;
    match (&report.best_worst.best, &report.best_worst.worst) {
        (Some(best), Some(worst)) => {
            writeln!(out, "  best  {:.2} on {}", best.efficiency, best.date.format("%Y-%m-%d"))?;
            writeln!(out, "  worst {:.2} on {}", worst.efficiency, worst.date.format("%Y-%m-%d"))?;
        }
        _ => writeln!(out, "  not enough full fills")?,
    }

    writeln!(out, "\nMaintenance by category")?;
    for group in &report.maintenance_breakdown {
        writeln!(out, "  {:<16} {:>3}x {}", group.category, group.count, group.total_cost)?;
    }

    writeln!(out, "\nMonthly expenses")?;
    write_months(&mut out, &report.monthly_expenses, currency)?;
    if let Some(message) = &report.expense_alert.message {
        writeln!(out, "! {message}")?;
    }

    writeln!(out, "\nTotal cost of ownership")?;
    writeln!(out, "  purchase      {}", currency.format_major(tco.purchase_price))?;
    writeln!(out, "  depreciation  {}", currency.format_major(tco.depreciation))?;
    writeln!(out, "  fuel          {}", currency.format_major(tco.total_fuel))?;
    writeln!(out, "  maintenance   {}", currency.format_major(tco.total_maintenance))?;
    writeln!(out, "  insurance     {}", currency.format_major(tco.total_insurance))?;
    writeln!(out, "  modifications {}", currency.format_major(tco.total_modifications))?;
    writeln!(out, "  total         {}", currency.format_major(tco.total))?;

    writeln!(out, "\nNext services")?;
    write_services(&mut out, &report.service_suggestions)?;

    if !report.reminders.is_empty() {
        writeln!(out, "\nReminders")?;
        for status in &report.reminders {
            let flag = if status.overdue { "overdue" } else { "" };
            writeln!(
                out,
                "  {} {} {flag}",
                status.reminder.due_date.format("%Y-%m-%d"),
                status.reminder.title
            )?;
        }
    }

    if report.trips.trips > 0 {
        writeln!(
            out,
            "\nTrips: {} ({:.1} km business, {:.1} km personal)",
            report.trips.trips, report.trips.business_distance, report.trips.personal_distance
        )?;
    }

    Ok(out)
}
