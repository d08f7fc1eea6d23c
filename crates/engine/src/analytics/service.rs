//! Distance-based service scheduling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{MaintenanceCategory, MaintenanceRecord};

/// Distance between two services of the same kind. Categories missing here
/// (battery, transmission, other) are never suggested.
pub const SERVICE_INTERVALS: [(MaintenanceCategory, u32); 8] = [
    (MaintenanceCategory::OilChange, 15_000),
    (MaintenanceCategory::TireRotation, 10_000),
    (MaintenanceCategory::BrakeService, 50_000),
    (MaintenanceCategory::Inspection, 20_000),
    (MaintenanceCategory::AirFilter, 30_000),
    (MaintenanceCategory::CabinFilter, 20_000),
    (MaintenanceCategory::SparkPlugs, 60_000),
    (MaintenanceCategory::Coolant, 40_000),
];

/// A service is suggested once the odometer is within this distance of it.
const DUE_SOON_WINDOW: u32 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestionReason {
    NoPreviousService,
    DueSoon { last_service_mileage: u32 },
}

impl fmt::Display for SuggestionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPreviousService => f.write_str("no previous service recorded"),
            Self::DueSoon {
                last_service_mileage,
            } => write!(f, "due soon (last service at {last_service_mileage} km)"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSuggestion {
    pub category: MaintenanceCategory,
    pub suggested_mileage: u32,
    pub reason: SuggestionReason,
}

/// Suggests upcoming services from the interval table, in table order.
///
/// The last service of a category is the record with the highest mileage,
/// whatever its date.
pub fn suggest_next_service(
    records: &[MaintenanceRecord],
    current_mileage: u32,
) -> Vec<ServiceSuggestion> {
    SERVICE_INTERVALS
        .into_iter()
        .filter_map(|(category, interval)| {
            let last_service = records
                .iter()
                .filter(|record| record.category == category)
                .map(|record| record.mileage)
                .max();

            match last_service {
                None => Some(ServiceSuggestion {
                    category,
                    suggested_mileage: current_mileage.saturating_add(interval),
                    reason: SuggestionReason::NoPreviousService,
                }),
                Some(last_service_mileage) => {
                    let next = last_service_mileage.saturating_add(interval);
                    (current_mileage >= next.saturating_sub(DUE_SOON_WINDOW)).then_some(
                        ServiceSuggestion {
                            category,
                            suggested_mileage: next,
                            reason: SuggestionReason::DueSoon {
                                last_service_mileage,
                            },
                        },
                    )
                }
            }
        })
        .collect()
}
