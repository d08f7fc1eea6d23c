//! The module contains the `InsurancePolicy` record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, vehicles::required_text};

/// An insurance policy covering a vehicle from `start_date` to `expiry_date`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub provider: String,
    #[serde(default)]
    pub policy_number: Option<String>,
    /// Premium for the whole period. Zero when unknown.
    #[serde(default)]
    pub premium: Money,
    pub start_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
}

impl InsurancePolicy {
    pub fn new(
        vehicle_id: Uuid,
        provider: &str,
        premium: Money,
        start_date: DateTime<Utc>,
        expiry_date: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        let provider = required_text(provider, "provider")?;
        if premium.is_negative() {
            return Err(EngineError::InvalidAmount(
                "premium must be >= 0".to_string(),
            ));
        }
        if expiry_date < start_date {
            return Err(EngineError::InvalidRecord(
                "policy expires before it starts".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            vehicle_id,
            provider,
            policy_number: None,
            premium,
            start_date,
            expiry_date,
        })
    }

    pub fn is_active(&self, at: DateTime<Utc>) -> bool {
        self.start_date <= at && at <= self.expiry_date
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn expiry_before_start_is_rejected() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let err = InsurancePolicy::new(Uuid::new_v4(), "Allianz", Money::new(500_00), start, end)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidRecord("policy expires before it starts".to_string())
        );
    }

    #[test]
    fn active_window_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let policy =
            InsurancePolicy::new(Uuid::new_v4(), "Allianz", Money::new(500_00), start, end).unwrap();
        assert!(policy.is_active(start));
        assert!(policy.is_active(end));
        assert!(!policy.is_active(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
    }
}
