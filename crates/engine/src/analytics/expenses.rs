//! Expense rollups: maintenance by category, spending by calendar month and
//! the month-over-month alert.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Datelike, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Currency, EngineError, InsurancePolicy, MaintenanceCategory, MaintenanceRecord, Money,
    FuelLog, util::days_between,
};

/// Premium spread uses 30-day "months".
const DAYS_PER_PREMIUM_MONTH: f64 = 30.0;
/// Current month must exceed the recent average by this factor to alert.
const ALERT_THRESHOLD: f64 = 1.2;
/// Buckets looked at by the alert, current month included.
const ALERT_WINDOW: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceCostData {
    pub category: MaintenanceCategory,
    pub total_cost: Money,
    pub count: usize,
}

/// Calendar month, ordered chronologically and displayed as `YYYY-MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidRecord(format!("invalid month: {s}"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Spending of one calendar month, in major units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpenseData {
    pub month: YearMonth,
    pub fuel: f64,
    pub maintenance: f64,
    pub insurance: f64,
    pub total: f64,
}

impl MonthlyExpenseData {
    fn empty(month: YearMonth) -> Self {
        Self {
            month,
            fuel: 0.0,
            maintenance: 0.0,
            insurance: 0.0,
            total: 0.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseAlert {
    pub alert: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Total cost and number of services per category, in the order categories
/// first appear in `records`.
pub fn maintenance_cost_breakdown(records: &[MaintenanceRecord]) -> Vec<MaintenanceCostData> {
    let mut breakdown: Vec<MaintenanceCostData> = Vec::new();

    for record in records {
        match breakdown
            .iter_mut()
            .find(|data| data.category == record.category)
        {
            Some(data) => {
                data.total_cost += record.total_cost;
                data.count += 1;
            }
            None => breakdown.push(MaintenanceCostData {
                category: record.category,
                total_cost: record.total_cost,
                count: 1,
            }),
        }
    }

    breakdown
}

fn bucket(
    months: &mut BTreeMap<YearMonth, MonthlyExpenseData>,
    date: DateTime<Utc>,
) -> &mut MonthlyExpenseData {
    let month = YearMonth::of(date);
    months
        .entry(month)
        .or_insert_with(|| MonthlyExpenseData::empty(month))
}

/// Fuel, maintenance and insurance spending bucketed by calendar month (UTC),
/// sorted chronologically.
///
/// A policy premium is spread over every month from its start to its expiry
/// (inclusive) as `premium / ceil(days / 30)`. This is an approximation: a
/// policy may put slightly less or more than its premium into the buckets.
pub fn monthly_expenses(
    fuel_logs: &[FuelLog],
    maintenance_records: &[MaintenanceRecord],
    insurance_policies: &[InsurancePolicy],
) -> Vec<MonthlyExpenseData> {
    let mut months: BTreeMap<YearMonth, MonthlyExpenseData> = BTreeMap::new();

    for log in fuel_logs {
        bucket(&mut months, log.date).fuel += log.cost.to_major();
    }

    for record in maintenance_records {
        bucket(&mut months, record.date).maintenance += record.total_cost.to_major();
    }

    for policy in insurance_policies {
        if policy.premium.is_zero() || policy.expiry_date < policy.start_date {
            continue;
        }

        let periods = (days_between(policy.start_date, policy.expiry_date)
            / DAYS_PER_PREMIUM_MONTH)
            .ceil()
            .max(1.0);
        let monthly_premium = policy.premium.to_major() / periods;

        // Step from the start date so short months do not shift later ones.
        let mut step = 0;
        while let Some(date) = policy.start_date.checked_add_months(Months::new(step)) {
            if date > policy.expiry_date {
                break;
            }
            bucket(&mut months, date).insurance += monthly_premium;
            step += 1;
        }
    }

    months
        .into_values()
        .map(|mut data| {
            data.total = data.fuel + data.maintenance + data.insurance;
            data
        })
        .collect()
}

/// Flags the latest month when it is more than 20% above the average of the
/// (up to two) months before it.
///
/// `monthly_expenses` must be sorted chronologically, as returned by
/// [`monthly_expenses`]. Fewer than two months never alert.
pub fn should_trigger_expense_alert(monthly_expenses: &[MonthlyExpenseData]) -> ExpenseAlert {
    if monthly_expenses.len() < 2 {
        return ExpenseAlert::default();
    }

    let recent = &monthly_expenses[monthly_expenses.len().saturating_sub(ALERT_WINDOW)..];
    let Some((current, previous)) = recent.split_last() else {
        return ExpenseAlert::default();
    };
    let average = previous.iter().map(|data| data.total).sum::<f64>() / previous.len() as f64;

    if current.total > average * ALERT_THRESHOLD {
        let currency = Currency::default();
        return ExpenseAlert {
            alert: true,
            message: Some(format!(
                "Your expenses this month ({}) are 20% higher than your average ({}).",
                currency.format_prefixed(current.total),
                currency.format_prefixed(average),
            )),
        };
    }

    ExpenseAlert::default()
}
