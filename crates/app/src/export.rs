//! CSV export of the monthly expense rollup.

use std::path::Path;

use csv::Writer;
use engine::analytics::MonthlyExpenseData;
use serde::Serialize;

use crate::error::Result;

#[derive(Serialize)]
struct ExportRow {
    month: String,
    fuel: String,
    maintenance: String,
    insurance: String,
    total: String,
}

impl From<&MonthlyExpenseData> for ExportRow {
    fn from(data: &MonthlyExpenseData) -> Self {
        Self {
            month: data.month.to_string(),
            fuel: format!("{:.2}", data.fuel),
            maintenance: format!("{:.2}", data.maintenance),
            insurance: format!("{:.2}", data.insurance),
            total: format!("{:.2}", data.total),
        }
    }
}

/// Serializes the rollup, one row per month, header included.
pub fn monthly_csv(monthly: &[MonthlyExpenseData]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(vec![]);
    for data in monthly {
        writer.serialize(ExportRow::from(data))?;
    }
    let data = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(data)
}

pub fn write_monthly_csv(path: &Path, monthly: &[MonthlyExpenseData]) -> Result<()> {
    std::fs::write(path, monthly_csv(monthly)?)?;
    tracing::info!(path = %path.display(), rows = monthly.len(), "monthly expenses exported");
    Ok(())
}
