// Row ingestion from readings files
pub mod rows;

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::{Checkpoint, Metric};

// Re-export commonly used types
pub use rows::{IngestMode, IngestReport, parse_delimited_rows, parse_json_rows, parse_row};

/// Load a readings file. `.json` files are parsed as a JSON array, anything
/// else as `date,value` lines.
pub fn load_readings_file(path: &Path, metric: Metric, mode: IngestMode) -> Result<IngestReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read readings file: {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let report = if is_json {
        parse_json_rows(&text, metric, mode)
    } else {
        parse_delimited_rows(&text, metric, mode)
    }
    .with_context(|| format!("Failed to parse {} rows from {}", metric, path.display()))?;

    log::info!(
        "Loaded {} {} readings from {}",
        report.series.len(),
        metric,
        path.display()
    );
    Ok(report)
}

/// Load sparse weight checkpoints (same file formats as readings)
pub fn load_checkpoints_file(path: &Path, mode: IngestMode) -> Result<Vec<Checkpoint>> {
    let report = load_readings_file(path, Metric::Weight, mode)?;
    Ok(report.series.iter().map(|&r| r.into()).collect())
}
