//! The module contains the `Reminder` record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ResultEngine, vehicles::required_text};

/// A user reminder, due on a date and optionally at an odometer reading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub due_mileage: Option<u32>,
    #[serde(default)]
    pub completed: bool,
}

impl Reminder {
    pub fn new(vehicle_id: Uuid, title: &str, due_date: DateTime<Utc>) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            vehicle_id,
            title: required_text(title, "title")?,
            description: String::new(),
            due_date,
            due_mileage: None,
            completed: false,
        })
    }

    #[must_use]
    pub fn due_at_mileage(self, mileage: u32) -> Self {
        Self {
            due_mileage: Some(mileage),
            ..self
        }
    }

    /// Returns a copy with `completed` flipped.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// A reminder is overdue when it is still open and either its date has
    /// passed or the odometer reached its due mileage.
    pub fn is_overdue(&self, now: DateTime<Utc>, current_mileage: u32) -> bool {
        !self.completed
            && (self.due_date < now
                || self
                    .due_mileage
                    .is_some_and(|mileage| mileage <= current_mileage))
    }
}
