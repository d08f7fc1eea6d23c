//! The module contains the `Vehicle` record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    #[default]
    Car,
    Motorcycle,
}

impl VehicleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Motorcycle => "motorcycle",
        }
    }
}

/// A tracked vehicle.
///
/// `current_mileage` is expected to only grow. A lower reading is never
/// rejected here; see [`validate_odometer`](crate::analytics::validate_odometer).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    #[serde(default)]
    pub kind: VehicleKind,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub license_plate: String,
    #[serde(default)]
    pub vin: Option<String>,
    pub purchase_date: DateTime<Utc>,
    pub purchase_price: Money,
    pub current_mileage: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Vehicle {
    pub fn new(
        kind: VehicleKind,
        make: &str,
        model: &str,
        year: u16,
        license_plate: &str,
        purchase_date: DateTime<Utc>,
        purchase_price: Money,
        current_mileage: u32,
    ) -> ResultEngine<Self> {
        let make = required_text(make, "make")?;
        let model = required_text(model, "model")?;
        let license_plate = required_text(license_plate, "license plate")?;
        if purchase_price.is_negative() {
            return Err(EngineError::InvalidAmount(
                "purchase price must be >= 0".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            make,
            model,
            year,
            license_plate,
            vin: None,
            purchase_date,
            purchase_price,
            current_mileage,
            notes: None,
        })
    }

    /// Returns a copy whose mileage is raised to `mileage` when the reading is
    /// ahead of the stored one. Older readings leave the mileage untouched.
    #[must_use]
    pub fn with_observed_mileage(&self, mileage: u32) -> Self {
        Self {
            current_mileage: self.current_mileage.max(mileage),
            ..self.clone()
        }
    }

    /// Human readable label, e.g. `Fiat Panda (AB123CD)`.
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.license_plate)
    }
}

pub(crate) fn required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidRecord(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}
