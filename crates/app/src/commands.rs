//! Dispatch of CLI commands against a loaded record store.

use std::path::Path;

use chrono::{DateTime, Utc};
use engine::{MaintenanceRecord, RecordStore, Snapshot, Vehicle, analytics};

use crate::{
    config::{Command, OutputFormat},
    error::Result,
    export, render,
};

pub fn load_store(path: &Path) -> Result<RecordStore> {
    let raw = std::fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    let store = RecordStore::from(snapshot);
    tracing::info!(
        path = %path.display(),
        vehicles = store.all::<Vehicle>().len(),
        "garage loaded"
    );
    Ok(store)
}

/// Runs `command` and returns what should be printed on stdout.
pub fn run(
    store: &RecordStore,
    command: Command,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> Result<String> {
    let currency = store.currency();
    match command {
        Command::Vehicles => render::vehicles(store.all::<Vehicle>(), format),
        Command::Report { vehicle, as_of } => {
            let report = store.report(vehicle, as_of.unwrap_or(now))?;
            render::report(&report, currency, format)
        }
        Command::Monthly { vehicle, csv } => {
            store.vehicle(vehicle)?;
            let records = store.records_for(vehicle);
            let months = analytics::monthly_expenses(
                &records.fuel_logs,
                &records.maintenance,
                &records.insurance,
            );
            if let Some(path) = csv {
                export::write_monthly_csv(&path, &months)?;
            }
            let alert = analytics::should_trigger_expense_alert(&months);
            render::monthly(&months, &alert, currency, format)
        }
        Command::Services { vehicle } => {
            let current_mileage = store.vehicle(vehicle)?.current_mileage;
            let records = store.for_vehicle::<MaintenanceRecord>(vehicle);
            render::services(
                &analytics::suggest_next_service(&records, current_mileage),
                format,
            )
        }
        Command::Odometer { vehicle, mileage } => {
            let current_mileage = store.vehicle(vehicle)?.current_mileage;
            let validation = analytics::validate_odometer(mileage, current_mileage);
            if !validation.valid {
                tracing::warn!(%vehicle, mileage, current_mileage, "odometer reading went backwards");
            }
            render::odometer(&validation, format)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use engine::{
        Currency, EngineError, FuelLog, FuelType, InsurancePolicy, MaintenanceCategory, Money,
        ServiceCosts, VehicleKind,
    };
    use uuid::Uuid;

    use super::*;
    use crate::error::AppError;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn store() -> (RecordStore, Uuid) {
        let vehicle = Vehicle::new(
            VehicleKind::Car,
            "Fiat",
            "Panda",
            2019,
            "AB123CD",
            Utc.with_ymd_and_hms(2022, 3, 1, 0, 0, 0).unwrap(),
            Money::new(9_500_00),
            42_000,
        )
        .unwrap();
        let id = vehicle.id;
        let mut store = RecordStore::new(Currency::Eur);
        store.save(vehicle);

        let start = Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap();
        for (days, mileage, cost) in [(0, 42_500, 60_00), (30, 43_100, 58_00), (61, 43_700, 63_00)] {
            let log = FuelLog::new(
                id,
                start + Duration::days(days),
                mileage,
                38.0,
                Money::new(cost),
                FuelType::Benzin,
            )
            .unwrap();
            store.record_fuel_log(log).unwrap();
        }
        let costs = ServiceCosts {
            labor: Money::new(70_00),
            parts: Money::new(45_00),
            tax: Money::new(25_30),
        };
        let oil = MaintenanceRecord::new(id, start, 42_500, MaintenanceCategory::OilChange, costs)
            .unwrap();
        store.record_maintenance(oil).unwrap();
        store.save(
            InsurancePolicy::new(
                id,
                "Generali",
                Money::new(480_00),
                start,
                start + Duration::days(365),
            )
            .unwrap(),
        );
        (store, id)
    }

    #[test]
    fn lists_vehicles() {
        let (store, id) = store();
        let out = run(&store, Command::Vehicles, OutputFormat::Text, now()).unwrap();
        assert!(out.contains(&id.to_string()));
        assert!(out.contains("Fiat Panda (AB123CD)"));
    }

    #[test]
    fn report_as_json_round_trips_through_serde() {
        let (store, id) = store();
        let command = Command::Report {
            vehicle: id,
            as_of: None,
        };
        let out = run(&store, command, OutputFormat::Json, now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["vehicle"]["current_mileage"], 43_700);
        assert_eq!(value["quick_stats"]["total_fuel"], 181_00);
        assert_eq!(value["efficiency_trend"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn text_report_has_every_section() {
        let (store, id) = store();
        let command = Command::Report {
            vehicle: id,
            as_of: Some(now()),
        };
        let out = run(&store, command, OutputFormat::Text, now()).unwrap();
        for section in [
            "Spending",
            "Fuel economy",
            "Maintenance by category",
            "Monthly expenses",
            "Total cost of ownership",
            "Next services",
        ] {
            assert!(out.contains(section), "missing {section}");
        }
    }

    #[test]
    fn monthly_writes_csv() {
        let (store, id) = store();
        let path = std::env::temp_dir().join(format!("garage-monthly-{id}.csv"));
        let command = Command::Monthly {
            vehicle: id,
            csv: Some(path.clone()),
        };
        run(&store, command, OutputFormat::Text, now()).unwrap();

        let csv = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(csv.starts_with("month,fuel,maintenance,insurance,total"));
        assert!(csv.contains("2024-01,"));
    }

    #[test]
    fn odometer_warns_on_lower_reading() {
        let (store, id) = store();
        let command = Command::Odometer {
            vehicle: id,
            mileage: 40_000,
        };
        let out = run(&store, command, OutputFormat::Text, now()).unwrap();
        assert!(out.starts_with("Warning: New mileage is less than current mileage."));
    }

    #[test]
    fn services_skip_recent_oil_change() {
        let (store, id) = store();
        let command = Command::Services { vehicle: id };
        let out = run(&store, command, OutputFormat::Json, now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let categories: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["category"].as_str().unwrap())
            .collect();
        assert!(!categories.contains(&"oil_change"));
        assert!(categories.contains(&"tire_rotation"));
    }

    #[test]
    fn demo_garage_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/garage.json");
        let store = load_store(&path).unwrap();
        let vehicle = store.all::<Vehicle>()[0].id;

        let report = store.report(vehicle, now()).unwrap();
        assert_eq!(report.efficiency_trend.len(), 2);
        assert_eq!(report.trips.trips, 1);
        assert_eq!(report.total_cost_of_ownership.total_modifications, 129.0);
    }

    #[test]
    fn unknown_vehicle_is_an_error() {
        let (store, _) = store();
        let command = Command::Services {
            vehicle: Uuid::nil(),
        };
        let err = run(&store, command, OutputFormat::Text, now()).unwrap_err();
        assert!(matches!(err, AppError::Engine(EngineError::KeyNotFound(_))));
    }
}
