//! The module contains the `TripLog` record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, vehicles::required_text};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripPurpose {
    Business,
    #[default]
    Personal,
}

/// A single trip, kept for mileage bookkeeping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: DateTime<Utc>,
    pub start_location: String,
    pub end_location: String,
    pub distance: f64,
    #[serde(default)]
    pub purpose: TripPurpose,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TripLog {
    pub fn new(
        vehicle_id: Uuid,
        date: DateTime<Utc>,
        start_location: &str,
        end_location: &str,
        distance: f64,
        purpose: TripPurpose,
    ) -> ResultEngine<Self> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(EngineError::InvalidRecord(
                "trip distance must be >= 0".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            vehicle_id,
            date,
            start_location: required_text(start_location, "start location")?,
            end_location: required_text(end_location, "end location")?,
            distance,
            purpose,
            notes: None,
        })
    }
}
