//! The module contains the `MaintenanceRecord` record and its closed set of
//! service categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceCategory {
    OilChange,
    TireRotation,
    BrakeService,
    Inspection,
    Battery,
    AirFilter,
    CabinFilter,
    SparkPlugs,
    Coolant,
    Transmission,
    Other,
}

impl MaintenanceCategory {
    pub const ALL: [MaintenanceCategory; 11] = [
        Self::OilChange,
        Self::TireRotation,
        Self::BrakeService,
        Self::Inspection,
        Self::Battery,
        Self::AirFilter,
        Self::CabinFilter,
        Self::SparkPlugs,
        Self::Coolant,
        Self::Transmission,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OilChange => "oil_change",
            Self::TireRotation => "tire_rotation",
            Self::BrakeService => "brake_service",
            Self::Inspection => "inspection",
            Self::Battery => "battery",
            Self::AirFilter => "air_filter",
            Self::CabinFilter => "cabin_filter",
            Self::SparkPlugs => "spark_plugs",
            Self::Coolant => "coolant",
            Self::Transmission => "transmission",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for MaintenanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MaintenanceCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| {
                EngineError::InvalidRecord(format!("invalid maintenance category: {value}"))
            })
    }
}

/// Cost lines of a service invoice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ServiceCosts {
    pub labor: Money,
    pub parts: Money,
    pub tax: Money,
}

impl ServiceCosts {
    /// `None` when the lines overflow.
    pub fn total(&self) -> Option<Money> {
        self.labor.checked_add(self.parts)?.checked_add(self.tax)
    }
}

/// A completed service.
///
/// `total_cost` is `labor + parts + tax` computed once by
/// [`MaintenanceRecord::new`] and stored as is. Analytics read the stored
/// value and never recompute it from the lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: DateTime<Utc>,
    pub mileage: u32,
    pub category: MaintenanceCategory,
    #[serde(default)]
    pub labor_cost: Money,
    #[serde(default)]
    pub parts_cost: Money,
    #[serde(default)]
    pub tax_cost: Money,
    pub total_cost: Money,
    #[serde(default)]
    pub parts_replaced: Vec<String>,
    #[serde(default)]
    pub warranty_expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub service_provider: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MaintenanceRecord {
    pub fn new(
        vehicle_id: Uuid,
        date: DateTime<Utc>,
        mileage: u32,
        category: MaintenanceCategory,
        costs: ServiceCosts,
    ) -> ResultEngine<Self> {
        if costs.labor.is_negative() || costs.parts.is_negative() || costs.tax.is_negative() {
            return Err(EngineError::InvalidAmount(
                "service costs must be >= 0".to_string(),
            ));
        }
        let total_cost = costs
            .total()
            .ok_or_else(|| EngineError::InvalidAmount("service total out of range".to_string()))?;

        Ok(Self {
            id: Uuid::new_v4(),
            vehicle_id,
            date,
            mileage,
            category,
            labor_cost: costs.labor,
            parts_cost: costs.parts,
            tax_cost: costs.tax,
            total_cost,
            parts_replaced: Vec::new(),
            warranty_expiry: None,
            service_provider: None,
            notes: None,
        })
    }

    /// Sets the replaced parts, dropping blank names.
    #[must_use]
    pub fn with_parts_replaced<I, S>(self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts_replaced = parts
            .into_iter()
            .map(|part| part.as_ref().trim().to_string())
            .filter(|part| !part.is_empty())
            .collect();
        Self {
            parts_replaced,
            ..self
        }
    }

    #[must_use]
    pub fn with_warranty_until(self, expiry: DateTime<Utc>) -> Self {
        Self {
            warranty_expiry: Some(expiry),
            ..self
        }
    }

    /// Returns `true` while the service warranty still covers `at`.
    pub fn under_warranty(&self, at: DateTime<Utc>) -> bool {
        self.warranty_expiry.is_some_and(|expiry| at <= expiry)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn costs() -> ServiceCosts {
        ServiceCosts {
            labor: Money::new(60_00),
            parts: Money::new(45_50),
            tax: Money::new(23_21),
        }
    }

    #[test]
    fn total_cost_is_computed_once() {
        let date = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
        let mut record =
            MaintenanceRecord::new(Uuid::new_v4(), date, 30_000, MaintenanceCategory::OilChange, costs())
                .unwrap();
        assert_eq!(record.total_cost, Money::new(128_71));

        record.labor_cost = Money::new(1);
        assert_eq!(record.total_cost, Money::new(128_71));
    }

    #[test]
    fn parts_list_drops_blanks() {
        let date = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
        let record =
            MaintenanceRecord::new(Uuid::new_v4(), date, 30_000, MaintenanceCategory::BrakeService, costs())
                .unwrap()
                .with_parts_replaced("pads, , discs ".split(','));
        assert_eq!(record.parts_replaced, vec!["pads", "discs"]);
    }

    #[test]
    fn warranty_window() {
        let date = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
        let expiry = Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).unwrap();
        let record =
            MaintenanceRecord::new(Uuid::new_v4(), date, 30_000, MaintenanceCategory::Battery, costs())
                .unwrap()
                .with_warranty_until(expiry);
        assert!(record.under_warranty(date));
        assert!(!record.under_warranty(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn negative_costs_are_rejected() {
        let date = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
        let costs = ServiceCosts {
            tax: Money::new(-1),
            ..costs()
        };
        assert!(
            MaintenanceRecord::new(Uuid::new_v4(), date, 1, MaintenanceCategory::Other, costs).is_err()
        );
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let date = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
        let costs = ServiceCosts {
            labor: Money::new(i64::MAX),
            parts: Money::new(1),
            ..ServiceCosts::default()
        };
        let err = MaintenanceRecord::new(Uuid::nil(), date, 0, MaintenanceCategory::Other, costs)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn category_parses_snake_case() {
        assert_eq!(
            MaintenanceCategory::try_from("spark_plugs"),
            Ok(MaintenanceCategory::SparkPlugs)
        );
        assert!(MaintenanceCategory::try_from("wipers").is_err());
    }
}
