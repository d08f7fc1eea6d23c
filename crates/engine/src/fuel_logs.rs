//! The module contains the `FuelLog` record, one refuel of a vehicle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    #[default]
    Benzin,
    Diesel,
    Super,
    E10,
    Electric,
    Hybrid,
    Lpg,
}

impl FuelType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Benzin => "benzin",
            Self::Diesel => "diesel",
            Self::Super => "super",
            Self::E10 => "e10",
            Self::Electric => "electric",
            Self::Hybrid => "hybrid",
            Self::Lpg => "lpg",
        }
    }
}

impl TryFrom<&str> for FuelType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "benzin" => Ok(Self::Benzin),
            "diesel" => Ok(Self::Diesel),
            "super" => Ok(Self::Super),
            "e10" => Ok(Self::E10),
            "electric" => Ok(Self::Electric),
            "hybrid" => Ok(Self::Hybrid),
            "lpg" => Ok(Self::Lpg),
            other => Err(EngineError::InvalidRecord(format!(
                "invalid fuel type: {other}"
            ))),
        }
    }
}

/// A refuel (or recharge) event.
///
/// `mileage` is the odometer reading at the pump. `amount` is the dispensed
/// volume or energy. A `partial_fill` did not top off the tank, so the
/// amount says nothing about consumption since the previous log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: DateTime<Utc>,
    pub mileage: u32,
    pub amount: f64,
    pub cost: Money,
    #[serde(default)]
    pub fuel_type: FuelType,
    #[serde(default)]
    pub partial_fill: bool,
    #[serde(default)]
    pub station: Option<String>,
}

impl FuelLog {
    pub fn new(
        vehicle_id: Uuid,
        date: DateTime<Utc>,
        mileage: u32,
        amount: f64,
        cost: Money,
        fuel_type: FuelType,
    ) -> ResultEngine<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::InvalidAmount(
                "fuel amount must be > 0".to_string(),
            ));
        }
        if cost.is_negative() {
            return Err(EngineError::InvalidAmount(
                "fuel cost must be >= 0".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            vehicle_id,
            date,
            mileage,
            amount,
            cost,
            fuel_type,
            partial_fill: false,
            station: None,
        })
    }

    #[must_use]
    pub fn partial(self) -> Self {
        Self {
            partial_fill: true,
            ..self
        }
    }

    #[must_use]
    pub fn at_station(self, station: &str) -> Self {
        let station = station.trim();
        Self {
            station: (!station.is_empty()).then(|| station.to_string()),
            ..self
        }
    }
}
