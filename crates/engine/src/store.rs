//! In-memory record store.
//!
//! The store keeps one ordered collection per record type and offers the
//! operations the front-end needs: upsert by id, lookup, per-vehicle listing
//! and delete. Saving keeps the position of an updated record, so listings
//! stay in insertion order.
//!
//! Durability is the caller's concern: a [`Snapshot`] converts to and from the
//! store and is plain serde data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Currency, EngineError, FuelLog, InsurancePolicy, MaintenanceRecord, Modification, Reminder,
    ResultEngine, TripLog, Vehicle,
    analytics::{OdometerValidation, VehicleRecords, VehicleReport, validate_odometer},
};

mod sealed {
    use super::RecordStore;

    pub trait Stored: Sized {
        fn collection(store: &RecordStore) -> &Vec<Self>;
        fn collection_mut(store: &mut RecordStore) -> &mut Vec<Self>;
    }
}

/// A record the store can hold.
pub trait Record: sealed::Stored + Clone {
    /// Name used in logs and errors.
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    /// Owning vehicle. A vehicle owns itself.
    fn vehicle_id(&self) -> Uuid;
}

/// Implement `Record` for a type stored in `RecordStore::$field`.
macro_rules! record {
    ($ty:ty, $kind:literal, $field:ident, $owner:ident) => {
        impl sealed::Stored for $ty {
            fn collection(store: &RecordStore) -> &Vec<Self> {
                &store.$field
            }

            fn collection_mut(store: &mut RecordStore) -> &mut Vec<Self> {
                &mut store.$field
            }
        }

        impl Record for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> Uuid {
                self.id
            }

            fn vehicle_id(&self) -> Uuid {
                self.$owner
            }
        }
    };
}

record!(Vehicle, "vehicle", vehicles, id);
record!(FuelLog, "fuel_log", fuel_logs, vehicle_id);
record!(MaintenanceRecord, "maintenance", maintenance, vehicle_id);
record!(InsurancePolicy, "insurance", insurance, vehicle_id);
record!(Modification, "modification", modifications, vehicle_id);
record!(Reminder, "reminder", reminders, vehicle_id);
record!(TripLog, "trip", trips, vehicle_id);

/// Serializable content of a [`RecordStore`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub currency: Currency,
    pub vehicles: Vec<Vehicle>,
    pub fuel_logs: Vec<FuelLog>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub insurance: Vec<InsurancePolicy>,
    pub modifications: Vec<Modification>,
    pub reminders: Vec<Reminder>,
    pub trips: Vec<TripLog>,
}

#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    currency: Currency,
    vehicles: Vec<Vehicle>,
    fuel_logs: Vec<FuelLog>,
    maintenance: Vec<MaintenanceRecord>,
    insurance: Vec<InsurancePolicy>,
    modifications: Vec<Modification>,
    reminders: Vec<Reminder>,
    trips: Vec<TripLog>,
}

impl RecordStore {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            ..Self::default()
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Inserts `record`, or replaces in place the record with the same id.
    pub fn save<T: Record>(&mut self, record: T) {
        let id = record.id();
        let collection = T::collection_mut(self);
        match collection.iter().position(|existing| existing.id() == id) {
            Some(index) => {
                collection[index] = record;
                tracing::debug!(kind = T::KIND, %id, "record updated");
            }
            None => {
                collection.push(record);
                tracing::debug!(kind = T::KIND, %id, "record inserted");
            }
        }
    }

    pub fn get<T: Record>(&self, id: Uuid) -> ResultEngine<&T> {
        T::collection(self)
            .iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("{} {id}", T::KIND)))
    }

    pub fn contains<T: Record>(&self, id: Uuid) -> bool {
        T::collection(self).iter().any(|record| record.id() == id)
    }

    /// Every record of type `T`, in insertion order.
    pub fn all<T: Record>(&self) -> &[T] {
        T::collection(self)
    }

    /// Records of type `T` that belong to `vehicle_id`, in insertion order.
    pub fn for_vehicle<T: Record>(&self, vehicle_id: Uuid) -> Vec<T> {
        T::collection(self)
            .iter()
            .filter(|record| record.vehicle_id() == vehicle_id)
            .cloned()
            .collect()
    }

    /// Removes and returns the record with `id`.
    ///
    /// Deleting a vehicle does not cascade: its child records stay in the
    /// store.
    pub fn delete<T: Record>(&mut self, id: Uuid) -> ResultEngine<T> {
        let collection = T::collection_mut(self);
        let index = collection
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("{} {id}", T::KIND)))?;
        let removed = collection.remove(index);
        tracing::debug!(kind = T::KIND, %id, "record deleted");
        Ok(removed)
    }

    pub fn vehicle(&self, id: Uuid) -> ResultEngine<&Vehicle> {
        self.get::<Vehicle>(id)
    }

    /// Saves a fuel log and moves the vehicle odometer forward.
    ///
    /// New logs are checked against the vehicle's current mileage; the check
    /// is returned, never enforced. Updates of an existing log skip it.
    pub fn record_fuel_log(&mut self, log: FuelLog) -> ResultEngine<OdometerValidation> {
        let check = self.observe_mileage::<FuelLog>(log.vehicle_id, log.id, log.mileage)?;
        self.save(log);
        Ok(check)
    }

    /// Saves a maintenance record and moves the vehicle odometer forward.
    ///
    /// Same odometer rules as [`RecordStore::record_fuel_log`].
    pub fn record_maintenance(
        &mut self,
        record: MaintenanceRecord,
    ) -> ResultEngine<OdometerValidation> {
        let check =
            self.observe_mileage::<MaintenanceRecord>(record.vehicle_id, record.id, record.mileage)?;
        self.save(record);
        Ok(check)
    }

    fn observe_mileage<T: Record>(
        &mut self,
        vehicle_id: Uuid,
        record_id: Uuid,
        mileage: u32,
    ) -> ResultEngine<OdometerValidation> {
        let vehicle = self.vehicle(vehicle_id)?;
        let check = if self.contains::<T>(record_id) {
            OdometerValidation::valid()
        } else {
            validate_odometer(mileage, vehicle.current_mileage)
        };

        if !check.valid {
            tracing::warn!(
                %vehicle_id,
                mileage,
                current = vehicle.current_mileage,
                "odometer reading below current mileage"
            );
        }

        if mileage > vehicle.current_mileage {
            let updated = vehicle.with_observed_mileage(mileage);
            self.save(updated);
        }

        Ok(check)
    }

    /// Flips the `completed` flag of a reminder and returns the new value.
    pub fn toggle_reminder(&mut self, id: Uuid) -> ResultEngine<Reminder> {
        let toggled = self.get::<Reminder>(id)?.toggled();
        self.save(toggled.clone());
        Ok(toggled)
    }

    /// Every record belonging to `vehicle_id`.
    pub fn records_for(&self, vehicle_id: Uuid) -> VehicleRecords {
        VehicleRecords {
            fuel_logs: self.for_vehicle(vehicle_id),
            maintenance: self.for_vehicle(vehicle_id),
            insurance: self.for_vehicle(vehicle_id),
            modifications: self.for_vehicle(vehicle_id),
            reminders: self.for_vehicle(vehicle_id),
            trips: self.for_vehicle(vehicle_id),
        }
    }

    /// Builds the full analytics report of a vehicle as of `now`.
    pub fn report(&self, vehicle_id: Uuid, now: DateTime<Utc>) -> ResultEngine<VehicleReport> {
        let vehicle = self.vehicle(vehicle_id)?;
        Ok(VehicleReport::build(
            vehicle,
            &self.records_for(vehicle_id),
            now,
        ))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            currency: self.currency,
            vehicles: self.vehicles.clone(),
            fuel_logs: self.fuel_logs.clone(),
            maintenance: self.maintenance.clone(),
            insurance: self.insurance.clone(),
            modifications: self.modifications.clone(),
            reminders: self.reminders.clone(),
            trips: self.trips.clone(),
        }
    }
}

impl From<Snapshot> for RecordStore {
    /// Loads a snapshot. Duplicate ids collapse to the last occurrence, kept at
    /// the position of the first.
    fn from(snapshot: Snapshot) -> Self {
        let mut store = RecordStore::new(snapshot.currency);
        snapshot.vehicles.into_iter().for_each(|r| store.save(r));
        snapshot.fuel_logs.into_iter().for_each(|r| store.save(r));
        snapshot.maintenance.into_iter().for_each(|r| store.save(r));
        snapshot.insurance.into_iter().for_each(|r| store.save(r));
        snapshot.modifications.into_iter().for_each(|r| store.save(r));
        snapshot.reminders.into_iter().for_each(|r| store.save(r));
        snapshot.trips.into_iter().for_each(|r| store.save(r));
        store
    }
}
