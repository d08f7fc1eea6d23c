//! Total cost of ownership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    FuelLog, InsurancePolicy, MaintenanceRecord, Modification, Money, Vehicle, util::days_between,
};

/// Straight-line depreciation rate per year of ownership.
const DEPRECIATION_PER_YEAR: f64 = 0.10;
const DAYS_PER_YEAR: f64 = 365.0;

/// Ownership costs in major units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TotalCostOfOwnership {
    pub purchase_price: f64,
    pub depreciation: f64,
    pub total_fuel: f64,
    pub total_maintenance: f64,
    pub total_insurance: f64,
    pub total_modifications: f64,
    pub total: f64,
}

/// Everything spent on `vehicle` over its whole history, net of a simple
/// straight-line depreciation of 10% of the purchase price per year owned.
///
/// `now` is the instant the vehicle age is measured at. A purchase date in
/// the future yields a negative depreciation.
pub fn total_cost_of_ownership(
    vehicle: &Vehicle,
    fuel_logs: &[FuelLog],
    maintenance_records: &[MaintenanceRecord],
    insurance_policies: &[InsurancePolicy],
    modifications: &[Modification],
    now: DateTime<Utc>,
) -> TotalCostOfOwnership {
    let total_fuel: Money = fuel_logs.iter().map(|log| log.cost).sum();
    let total_maintenance: Money = maintenance_records.iter().map(|r| r.total_cost).sum();
    let total_insurance: Money = insurance_policies.iter().map(|p| p.premium).sum();
    let total_modifications: Money = modifications.iter().map(|m| m.cost).sum();

    let purchase_price = vehicle.purchase_price.to_major();
    let years_owned = days_between(vehicle.purchase_date, now) / DAYS_PER_YEAR;
    let depreciation = purchase_price * DEPRECIATION_PER_YEAR * years_owned;

    let spent = total_fuel + total_maintenance + total_insurance + total_modifications;

    TotalCostOfOwnership {
        purchase_price,
        depreciation,
        total_fuel: total_fuel.to_major(),
        total_maintenance: total_maintenance.to_major(),
        total_insurance: total_insurance.to_major(),
        total_modifications: total_modifications.to_major(),
        total: purchase_price + spent.to_major() - depreciation,
    }
}
