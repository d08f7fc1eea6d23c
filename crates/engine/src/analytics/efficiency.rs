//! Fuel consumption and running cost.
//!
//! Efficiency is a consumption figure: volume per 100 distance units between
//! two consecutive logs. Lower is better.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{FuelLog, Money, util::round2};

/// One point of the efficiency trend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelEfficiencyData {
    pub date: DateTime<Utc>,
    pub efficiency: f64,
    pub cost: Money,
}

/// Most and least efficient refuels. Both are `None` when no efficiency can
/// be computed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BestWorst {
    pub best: Option<FuelEfficiencyData>,
    pub worst: Option<FuelEfficiencyData>,
}

/// Consumption per 100 distance units between `previous` and `current`,
/// rounded to two decimals.
///
/// Returns `0.0` (not computable) when `current` is a partial fill or the
/// odometer did not advance.
pub fn calculate_fuel_efficiency(current: &FuelLog, previous: &FuelLog) -> f64 {
    if current.partial_fill {
        return 0.0;
    }

    let distance = i64::from(current.mileage) - i64::from(previous.mileage);
    if distance <= 0 {
        return 0.0;
    }

    round2(current.amount / distance as f64 * 100.0)
}

/// Logs ordered by date. The sort is stable, so same-date logs keep the
/// caller's order.
fn sorted_by_date(logs: &[FuelLog]) -> Vec<&FuelLog> {
    let mut sorted: Vec<&FuelLog> = logs.iter().collect();
    sorted.sort_by_key(|log| log.date);
    sorted
}

/// Efficiency of every full fill against the log before it, in chronological
/// order. Pairs that are not computable are skipped.
pub fn fuel_efficiency_trend(logs: &[FuelLog]) -> Vec<FuelEfficiencyData> {
    sorted_by_date(logs)
        .windows(2)
        .filter(|pair| !pair[1].partial_fill)
        .filter_map(|pair| {
            let (previous, current) = (pair[0], pair[1]);
            let efficiency = calculate_fuel_efficiency(current, previous);
            (efficiency > 0.0).then(|| FuelEfficiencyData {
                date: current.date,
                efficiency,
                cost: current.cost,
            })
        })
        .collect()
}

/// Lowest (best) and highest (worst) consumption of the trend.
///
/// On ties the earliest entry wins for both ends.
pub fn best_worst_fuel_economy(logs: &[FuelLog]) -> BestWorst {
    let trend = fuel_efficiency_trend(logs);

    let best = trend.iter().reduce(|best, current| {
        if current.efficiency < best.efficiency {
            current
        } else {
            best
        }
    });
    let worst = trend.iter().reduce(|worst, current| {
        if current.efficiency > worst.efficiency {
            current
        } else {
            worst
        }
    });

    BestWorst {
        best: best.cloned(),
        worst: worst.cloned(),
    }
}

/// Fuel spend per distance unit over the whole history, rounded to two
/// decimals.
///
/// Every purchase counts towards the spend, partial fills included. The
/// distance runs from the earliest to the latest log by date. Returns `0.0`
/// with fewer than two logs or when that distance is not positive.
pub fn calculate_cost_per_km(logs: &[FuelLog]) -> f64 {
    if logs.len() < 2 {
        return 0.0;
    }

    let sorted = sorted_by_date(logs);
    let total_cost: Money = sorted.iter().map(|log| log.cost).sum();
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return 0.0;
    };

    let distance = i64::from(last.mileage) - i64::from(first.mileage);
    if distance <= 0 {
        return 0.0;
    }

    round2(total_cost.to_major() / distance as f64)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    use super::*;
    use crate::FuelType;

    fn log(day: i64, mileage: u32, amount: f64, cost_minor: i64) -> FuelLog {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(day);
        FuelLog::new(
            Uuid::nil(),
            date,
            mileage,
            amount,
            Money::new(cost_minor),
            FuelType::Benzin,
        )
        .unwrap()
    }

    #[test]
    fn efficiency_between_two_full_fills() {
        let previous = log(0, 1000, 40.0, 70_00);
        let current = log(10, 1500, 35.0, 61_25);
        assert_eq!(calculate_fuel_efficiency(&current, &previous), 7.0);
    }

    #[test]
    fn efficiency_rounds_half_up() {
        let previous = log(0, 0, 1.0, 0);
        let current = log(1, 600, 41.0, 0);
        // 41 / 600 * 100 = 6.8333...
        assert_eq!(calculate_fuel_efficiency(&current, &previous), 6.83);
    }

    #[test]
    fn partial_fill_is_not_computable() {
        let previous = log(0, 1000, 40.0, 0);
        let current = log(10, 1500, 35.0, 0).partial();
        assert_eq!(calculate_fuel_efficiency(&current, &previous), 0.0);
    }

    #[test]
    fn odometer_going_back_is_not_computable() {
        let previous = log(0, 1500, 40.0, 0);
        assert_eq!(calculate_fuel_efficiency(&log(1, 1500, 35.0, 0), &previous), 0.0);
        assert_eq!(calculate_fuel_efficiency(&log(1, 1200, 35.0, 0), &previous), 0.0);
    }

    #[test]
    fn trend_sorts_by_date_and_skips_partials() {
        let logs = vec![
            log(20, 2000, 30.0, 50_00),
            log(0, 1000, 40.0, 70_00),
            log(10, 1500, 20.0, 35_00).partial(),
        ];
        let trend = fuel_efficiency_trend(&logs);

        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].date, logs[0].date);
        assert_eq!(trend[0].efficiency, 6.0);
        assert_eq!(trend[0].cost, Money::new(50_00));
    }

    #[test]
    fn trend_needs_two_logs() {
        assert!(fuel_efficiency_trend(&[]).is_empty());
        assert!(fuel_efficiency_trend(&[log(0, 1000, 40.0, 0)]).is_empty());
    }

    #[test]
    fn best_worst_prefers_first_on_ties() {
        let logs = vec![
            log(0, 1000, 10.0, 1),
            log(1, 1100, 5.0, 2),
            log(2, 1200, 5.0, 3),
            log(3, 1300, 8.0, 4),
            log(4, 1400, 8.0, 5),
        ];
        let BestWorst { best, worst } = best_worst_fuel_economy(&logs);

        let best = best.unwrap();
        let worst = worst.unwrap();
        assert_eq!(best.efficiency, 5.0);
        assert_eq!(best.cost, Money::new(2));
        assert_eq!(worst.efficiency, 8.0);
        assert_eq!(worst.cost, Money::new(4));
    }

    #[test]
    fn best_worst_empty() {
        assert_eq!(best_worst_fuel_economy(&[]), BestWorst::default());
    }

    #[test]
    fn cost_per_km_counts_partial_fills() {
        let logs = vec![
            log(0, 1000, 40.0, 60_00),
            log(5, 1200, 10.0, 15_00).partial(),
            log(10, 1500, 30.0, 45_00),
        ];
        // 120.00 / 500
        assert_eq!(calculate_cost_per_km(&logs), 0.24);
    }

    #[test]
    fn cost_per_km_degrades_to_zero() {
        assert_eq!(calculate_cost_per_km(&[log(0, 1000, 40.0, 60_00)]), 0.0);
        let backwards = vec![log(0, 2000, 40.0, 60_00), log(5, 1000, 40.0, 60_00)];
        assert_eq!(calculate_cost_per_km(&backwards), 0.0);
    }
}
