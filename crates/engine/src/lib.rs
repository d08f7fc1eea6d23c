//! # Garage engine
//!
//! Domain records of a personal vehicle-expense tracker, the analytics that
//! derive cost and efficiency figures from them, and an in-memory record
//! store.
//!
//! - Records ([`Vehicle`], [`FuelLog`], [`MaintenanceRecord`],
//!   [`InsurancePolicy`], [`Modification`], [`Reminder`], [`TripLog`]) are
//!   immutable values; edits build a new value and save it again.
//! - [`analytics`] holds pure functions over slices of records.
//! - [`RecordStore`] keeps records per type with upsert-by-id semantics.

pub use currency::Currency;
pub use error::EngineError;
pub use fuel_logs::{FuelLog, FuelType};
pub use insurance::InsurancePolicy;
pub use maintenance::{MaintenanceCategory, MaintenanceRecord, ServiceCosts};
pub use modifications::Modification;
pub use money::Money;
pub use reminders::Reminder;
pub use store::{Record, RecordStore, Snapshot};
pub use trips::{TripLog, TripPurpose};
pub use vehicles::{Vehicle, VehicleKind};

pub mod analytics;
mod currency;
mod error;
mod fuel_logs;
mod insurance;
mod maintenance;
mod modifications;
mod money;
mod reminders;
mod store;
mod trips;
mod util;
mod vehicles;

pub type ResultEngine<T> = Result<T, EngineError>;
