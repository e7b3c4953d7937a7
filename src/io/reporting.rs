// src/io/reporting.rs

use crate::simulation::error::SimError;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Serializes rows as CSV: header row first, no index column.
pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), SimError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
pub fn to_csv_string<T: Serialize>(rows: &[T]) -> Result<String, SimError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows)?;
    // csv only ever emits UTF-8 for these rows
    String::from_utf8(buf)
        .map_err(|e| SimError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Writes rows to a CSV file at `path`.
///
/// # Arguments
/// * `path` - Destination file (e.g., "results/bertrand.csv").
/// * `rows` - Report rows from the results aggregator.
pub fn write_csv_file<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), SimError> {
    write_csv(File::create(path)?, rows)?;
    info!(rows = rows.len(), path = %path.display(), "exported csv");
    Ok(())
}
