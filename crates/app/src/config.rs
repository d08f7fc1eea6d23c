use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/garage.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON snapshot with every record of the garage.
    pub data: String,
    /// Log level for the `tracing` filter.
    pub level: String,
    pub format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: "garage.json".to_string(),
            level: "info".to_string(),
            format: OutputFormat::Text,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "garage", about = "Vehicle expense tracking and analytics")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the snapshot path.
    #[arg(long)]
    data: Option<String>,
    /// Override the output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Override the log level.
    #[arg(long)]
    level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List the vehicles in the garage.
    Vehicles,
    /// Every analytic of one vehicle.
    Report {
        #[arg(long)]
        vehicle: Uuid,
        /// Instant used for vehicle age and overdue reminders (RFC 3339).
        #[arg(long)]
        as_of: Option<DateTime<Utc>>,
    },
    /// Monthly spending, optionally exported as CSV.
    Monthly {
        #[arg(long)]
        vehicle: Uuid,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Upcoming distance-based services.
    Services {
        #[arg(long)]
        vehicle: Uuid,
    },
    /// Check an odometer reading before recording it.
    Odometer {
        #[arg(long)]
        vehicle: Uuid,
        #[arg(long)]
        mileage: u32,
    },
}

pub fn load() -> Result<(AppConfig, Command)> {
    resolve(Args::parse())
}

/// Layers the config file, `GARAGE_*` environment variables and CLI flags,
/// in increasing priority.
fn resolve(args: Args) -> Result<(AppConfig, Command)> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("GARAGE"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data) = args.data {
        settings.data = data;
    }
    if let Some(format) = args.format {
        settings.format = format;
    }
    if let Some(level) = args.level {
        settings.level = level;
    }

    Ok((settings, args.command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_defaults() {
        let args = Args::try_parse_from([
            "garage",
            "--config",
            "does/not/exist.toml",
            "--data",
            "/tmp/cars.json",
            "--format",
            "json",
            "odometer",
            "--vehicle",
            "6f1c1b4e-59c5-4a43-9a55-0c7f1f1b2a10",
            "--mileage",
            "1200",
        ])
        .unwrap();

        let (settings, command) = resolve(args).unwrap();
        assert_eq!(settings.data, "/tmp/cars.json");
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(
            command,
            Command::Odometer {
                vehicle: Uuid::parse_str("6f1c1b4e-59c5-4a43-9a55-0c7f1f1b2a10").unwrap(),
                mileage: 1200,
            }
        );
    }

    #[test]
    fn report_accepts_rfc3339_as_of() {
        let args = Args::try_parse_from([
            "garage",
            "report",
            "--vehicle",
            "6f1c1b4e-59c5-4a43-9a55-0c7f1f1b2a10",
            "--as-of",
            "2024-06-01T00:00:00Z",
        ])
        .unwrap();

        let Command::Report { as_of, .. } = args.command else {
            panic!("expected report command");
        };
        assert_eq!(as_of.unwrap().to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_invalid_vehicle_id() {
        assert!(Args::try_parse_from(["garage", "services", "--vehicle", "abc"]).is_err());
    }
}
