//! Per-vehicle summaries shown on the dashboard and the bundled report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BestWorst, ExpenseAlert, FuelEfficiencyData, MaintenanceCostData, MonthlyExpenseData,
    ServiceSuggestion, TotalCostOfOwnership, best_worst_fuel_economy, calculate_cost_per_km,
    fuel_efficiency_trend, maintenance_cost_breakdown, monthly_expenses,
    should_trigger_expense_alert, suggest_next_service, total_cost_of_ownership,
};
use crate::{
    FuelLog, InsurancePolicy, MaintenanceRecord, Modification, Money, Reminder, TripLog,
    TripPurpose, Vehicle, util::round2,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuickStats {
    pub total_spent: Money,
    pub total_fuel: Money,
    pub total_maintenance: Money,
    /// Mean amount per refuel, `None` with fewer than two logs.
    pub average_fill: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub trips: usize,
    pub business_distance: f64,
    pub personal_distance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReminderStatus {
    pub reminder: Reminder,
    pub overdue: bool,
}

/// Purchase price plus fuel and maintenance spending.
pub fn quick_stats(
    vehicle: &Vehicle,
    fuel_logs: &[FuelLog],
    maintenance_records: &[MaintenanceRecord],
) -> QuickStats {
    let total_fuel: Money = fuel_logs.iter().map(|log| log.cost).sum();
    let total_maintenance: Money = maintenance_records.iter().map(|r| r.total_cost).sum();
    let average_fill = (fuel_logs.len() > 1).then(|| {
        round2(fuel_logs.iter().map(|log| log.amount).sum::<f64>() / fuel_logs.len() as f64)
    });

    QuickStats {
        total_spent: vehicle.purchase_price + total_fuel + total_maintenance,
        total_fuel,
        total_maintenance,
        average_fill,
    }
}

pub fn trip_summary(trips: &[TripLog]) -> TripSummary {
    trips
        .iter()
        .fold(TripSummary::default(), |mut summary, trip| {
            summary.trips += 1;
            match trip.purpose {
                TripPurpose::Business => summary.business_distance += trip.distance,
                TripPurpose::Personal => summary.personal_distance += trip.distance,
            }
            summary
        })
}

/// Reminders by due date (stable), each flagged overdue or not.
pub fn upcoming_reminders(
    reminders: &[Reminder],
    now: DateTime<Utc>,
    current_mileage: u32,
) -> Vec<ReminderStatus> {
    let mut statuses: Vec<ReminderStatus> = reminders
        .iter()
        .map(|reminder| ReminderStatus {
            overdue: reminder.is_overdue(now, current_mileage),
            reminder: reminder.clone(),
        })
        .collect();
    statuses.sort_by_key(|status| status.reminder.due_date);
    statuses
}

/// All records of one vehicle, as loaded from the store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecords {
    pub fuel_logs: Vec<FuelLog>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub insurance: Vec<InsurancePolicy>,
    pub modifications: Vec<Modification>,
    pub reminders: Vec<Reminder>,
    pub trips: Vec<TripLog>,
}

/// Every analytic of a single vehicle, computed at `generated_at`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleReport {
    pub vehicle: Vehicle,
    pub generated_at: DateTime<Utc>,
    pub quick_stats: QuickStats,
    pub cost_per_km: f64,
    pub efficiency_trend: Vec<FuelEfficiencyData>,
    pub best_worst: BestWorst,
    pub maintenance_breakdown: Vec<MaintenanceCostData>,
    pub monthly_expenses: Vec<MonthlyExpenseData>,
    pub expense_alert: ExpenseAlert,
    pub total_cost_of_ownership: TotalCostOfOwnership,
    pub service_suggestions: Vec<ServiceSuggestion>,
    pub reminders: Vec<ReminderStatus>,
    pub trips: TripSummary,
}

impl VehicleReport {
    pub fn build(vehicle: &Vehicle, records: &VehicleRecords, now: DateTime<Utc>) -> Self {
        let monthly = monthly_expenses(&records.fuel_logs, &records.maintenance, &records.insurance);
        let expense_alert = should_trigger_expense_alert(&monthly);

        Self {
            vehicle: vehicle.clone(),
            generated_at: now,
            quick_stats: quick_stats(vehicle, &records.fuel_logs, &records.maintenance),
            cost_per_km: calculate_cost_per_km(&records.fuel_logs),
            efficiency_trend: fuel_efficiency_trend(&records.fuel_logs),
            best_worst: best_worst_fuel_economy(&records.fuel_logs),
            maintenance_breakdown: maintenance_cost_breakdown(&records.maintenance),
            monthly_expenses: monthly,
            expense_alert,
            total_cost_of_ownership: total_cost_of_ownership(
                vehicle,
                &records.fuel_logs,
                &records.maintenance,
                &records.insurance,
                &records.modifications,
                now,
            ),
            service_suggestions: suggest_next_service(
                &records.maintenance,
                vehicle.current_mileage,
            ),
            reminders: upcoming_reminders(&records.reminders, now, vehicle.current_mileage),
            trips: trip_summary(&records.trips),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;
    use crate::{FuelType, VehicleKind};

    fn vehicle() -> Vehicle {
        Vehicle::new(
            VehicleKind::Motorcycle,
            "Ducati",
            "Monster",
            2022,
            "AA11BB",
            Utc.with_ymd_and_hms(2022, 5, 1, 0, 0, 0).unwrap(),
            Money::new(11_000_00),
            8_000,
        )
        .unwrap()
    }

    fn fill(vehicle: &Vehicle, day: u32, mileage: u32, amount: f64) -> FuelLog {
        let date = Utc.with_ymd_and_hms(2024, 7, day, 0, 0, 0).unwrap();
        FuelLog::new(vehicle.id, date, mileage, amount, Money::new(20_00), FuelType::Super).unwrap()
    }

    #[test]
    fn quick_stats_average_needs_two_logs() {
        let vehicle = vehicle();
        let one = quick_stats(&vehicle, &[fill(&vehicle, 1, 8_000, 12.0)], &[]);
        assert_eq!(one.average_fill, None);
        assert_eq!(one.total_spent, Money::new(11_020_00));

        let logs = vec![fill(&vehicle, 1, 8_000, 12.0), fill(&vehicle, 9, 8_250, 13.5)];
        let two = quick_stats(&vehicle, &logs, &[]);
        assert_eq!(two.average_fill, Some(12.75));
        assert_eq!(two.total_fuel, Money::new(40_00));
    }

    #[test]
    fn trips_split_by_purpose() {
        let date = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let trips = vec![
            TripLog::new(Uuid::nil(), date, "Milano", "Torino", 140.0, TripPurpose::Business).unwrap(),
            TripLog::new(Uuid::nil(), date, "Torino", "Milano", 142.5, TripPurpose::Personal).unwrap(),
            TripLog::new(Uuid::nil(), date, "Milano", "Bergamo", 50.0, TripPurpose::Business).unwrap(),
        ];
        let summary = trip_summary(&trips);
        assert_eq!(summary.trips, 3);
        assert_eq!(summary.business_distance, 190.0);
        assert_eq!(summary.personal_distance, 142.5);
    }

    #[test]
    fn reminders_sorted_and_flagged() {
        let vehicle = vehicle();
        let now = Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap();
        let later = Reminder::new(vehicle.id, "Bollo", Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap())
            .unwrap();
        let past = Reminder::new(vehicle.id, "Revisione", Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
            .unwrap();

        let statuses = upcoming_reminders(&[later.clone(), past.clone()], now, vehicle.current_mileage);
        assert_eq!(statuses[0].reminder, past);
        assert!(statuses[0].overdue);
        assert_eq!(statuses[1].reminder, later);
        assert!(!statuses[1].overdue);
    }
}
