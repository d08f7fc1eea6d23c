//! Advisory odometer check.

use serde::{Deserialize, Serialize};

const ODOMETER_WARNING: &str =
    "Warning: New mileage is less than current mileage. This may indicate an error.";

/// Outcome of [`validate_odometer`]. Callers decide whether to block a save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OdometerValidation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OdometerValidation {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }
}

/// Flags a reading lower than the vehicle's current mileage.
pub fn validate_odometer(new_mileage: u32, current_mileage: u32) -> OdometerValidation {
    if new_mileage < current_mileage {
        return OdometerValidation {
            valid: false,
            message: Some(ODOMETER_WARNING.to_string()),
        };
    }
    OdometerValidation::valid()
}
