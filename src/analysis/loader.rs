use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::analysis::types::{VoltageSample, VoltageSeries, TIMESTAMP_FORMAT};
use crate::error::DataError;

const VOLTAGE_COLUMN: &str = "Values";
const TIMESTAMP_COLUMN: &str = "Timestamp";

/// Read the whole voltage CSV into memory.
///
/// The header must carry a `Values` column; a `Timestamp` column is optional.
/// Rows whose timestamp fails to parse are dropped; when timestamps are
/// present the series is re-sorted chronologically and re-indexed. A
/// non-numeric voltage fails the whole load.
pub fn load_series(path: &Path) -> Result<VoltageSeries, DataError> {
    if !path.exists() {
        return Err(DataError::FileNotFound(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let voltage_col = headers
        .iter()
        .position(|h| h.trim() == VOLTAGE_COLUMN)
        .ok_or(DataError::MissingColumn(VOLTAGE_COLUMN))?;
    let timestamp_col = headers.iter().position(|h| h.trim() == TIMESTAMP_COLUMN);

    let mut samples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // Header occupies line 1 of the file
        let line = row + 2;

        let raw = record.get(voltage_col).unwrap_or("").trim();
        let voltage: f64 = raw.parse().map_err(|_| DataError::Malformed {
            line,
            value: raw.to_string(),
        })?;

        let timestamp = match timestamp_col {
            Some(col) => {
                let text = record.get(col).unwrap_or("").trim();
                match NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT) {
                    Ok(ts) => Some(ts),
                    Err(_) => {
                        debug!("dropping row at line {line}: unparseable timestamp {text:?}");
                        continue;
                    }
                }
            }
            None => None,
        };

        samples.push(VoltageSample {
            index: samples.len(),
            timestamp,
            voltage,
        });
    }

    if timestamp_col.is_some() {
        samples.sort_by_key(|s| s.timestamp);
    }

    Ok(VoltageSeries::new(samples))
}
