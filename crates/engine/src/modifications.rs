//! The module contains the `Modification` record: an aftermarket part or
//! upgrade installed on a vehicle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, vehicles::required_text};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: DateTime<Utc>,
    pub description: String,
    pub cost: Money,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Modification {
    pub fn new(
        vehicle_id: Uuid,
        date: DateTime<Utc>,
        description: &str,
        cost: Money,
    ) -> ResultEngine<Self> {
        let description = required_text(description, "description")?;
        if cost.is_negative() {
            return Err(EngineError::InvalidAmount(
                "modification cost must be >= 0".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            vehicle_id,
            date,
            description,
            cost,
            notes: None,
        })
    }
}
