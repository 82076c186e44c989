//! Output module for persisting crawl results
//!
//! This module writes the accumulated records in two interchangeable
//! canonical forms:
//! - a JSON document (array of record mappings), and
//! - a CSV table whose header is the sorted union of all record keys.
//!
//! The two writes are independent; there is no atomic cross-file guarantee.

mod csv;
mod json;

pub use self::csv::write_csv;
pub use json::{load_records, write_json};

use crate::config::OutputConfig;
use crate::record::PropertyRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Persists the full record sequence in both canonical forms
///
/// Creates the output directory if needed, then writes the JSON document
/// and the CSV table.
///
/// # Arguments
///
/// * `records` - The accumulated records, in discovery order
/// * `config` - Output locations
pub fn save_records(records: &[PropertyRecord], config: &OutputConfig) -> OutputResult<()> {
    std::fs::create_dir_all(&config.data_dir)?;

    write_json(records, &config.json_path())?;
    write_csv(records, &config.csv_path())?;

    tracing::info!(
        "Persisted {} records to {} and {}",
        records.len(),
        config.json_path().display(),
        config.csv_path().display()
    );

    Ok(())
}
