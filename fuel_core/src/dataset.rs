//! WHOOP export loading and embedded-record decoding.
//!
//! The export is a CSV where each row is one observation period, ordered
//! most-recent-first (row 0 = most recent). The `cycle_score` and
//! `recovery_score` cells each hold a serialized record which is decoded once
//! at load through the literal parser. After `load` returns, the dataset and
//! its decoded derivatives are immutable.

use crate::{literal, Error, Literal, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One row of the tabular WHOOP export
#[derive(Clone, Debug, Deserialize)]
pub struct WhoopRow {
    pub cycle_score: String,
    pub recovery_score: String,
    pub workout_start: String,
    pub workout_end: String,
    pub workout_sport_id: i64,
    pub user_measurements_height_meter: f64,
    pub user_measurements_weight_kilogram: f64,
}

/// The loaded export plus its decoded embedded-record sequences
#[derive(Clone, Debug)]
pub struct WhoopDataset {
    rows: Vec<WhoopRow>,
    cycles: Vec<HashMap<String, Literal>>,
    recoveries: Vec<HashMap<String, Literal>>,
}

impl WhoopDataset {
    /// Load the export and decode both embedded-record columns.
    ///
    /// Any cell that fails literal decoding, or decodes to something other
    /// than a record, aborts the load.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

        let mut rows = Vec::new();
        for result in reader.deserialize::<WhoopRow>() {
            rows.push(result?);
        }

        let mut cycles = Vec::with_capacity(rows.len());
        let mut recoveries = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            cycles.push(decode_record(&row.cycle_score, "cycle_score", idx)?);
            recoveries.push(decode_record(&row.recovery_score, "recovery_score", idx)?);
        }

        tracing::info!("Loaded {} rows from {:?}", rows.len(), path);

        Ok(Self {
            rows,
            cycles,
            recoveries,
        })
    }

    /// Build a dataset from already-parsed rows (decodes the embedded records)
    pub fn from_rows(rows: Vec<WhoopRow>) -> Result<Self> {
        let mut cycles = Vec::with_capacity(rows.len());
        let mut recoveries = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            cycles.push(decode_record(&row.cycle_score, "cycle_score", idx)?);
            recoveries.push(decode_record(&row.recovery_score, "recovery_score", idx)?);
        }
        Ok(Self {
            rows,
            cycles,
            recoveries,
        })
    }

    pub fn rows(&self) -> &[WhoopRow] {
        &self.rows
    }

    /// Decoded cycle records, one per row, most recent first
    pub fn cycles(&self) -> &[HashMap<String, Literal>] {
        &self.cycles
    }

    /// Decoded recovery records, one per row, most recent first
    pub fn recoveries(&self) -> &[HashMap<String, Literal>] {
        &self.recoveries
    }
}

fn decode_record(cell: &str, column: &str, row: usize) -> Result<HashMap<String, Literal>> {
    let value = literal::parse(cell)
        .map_err(|e| Error::Decode(format!("{} row {}: {}", column, row, e)))?;
    match value {
        Literal::Dict(map) => Ok(map),
        other => Err(Error::Decode(format!(
            "{} row {}: expected a record, decoded {:?}",
            column, row, other
        ))),
    }
}

/// Fetch a required numeric field from a decoded record.
///
/// Absence of the key is fatal for the statistic that needed it, as is a
/// non-numeric value. Never silently defaulted.
pub fn require_f64(record: &HashMap<String, Literal>, key: &str) -> Result<f64> {
    let value = record
        .get(key)
        .ok_or_else(|| Error::MissingKey(key.to_string()))?;
    value
        .as_f64()
        .ok_or_else(|| Error::Decode(format!("field '{}' is not numeric: {:?}", key, value)))
}
