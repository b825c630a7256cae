//! Row ingestion from the storage collaborator
//!
//! Two encodings are accepted:
//! * a JSON array of `{"date": "YYYY-MM-DD", "value": <number>}` objects, each
//!   with an optional `"unit"` that must match the metric
//! * `date,value` text lines, with an optional header line
//!
//! Every row is checked for a parseable date, a numeric value and the metric's
//! plausible range. Values are never coerced: `"110"` in JSON is rejected.

use chrono::NaiveDate;

#[cfg(debug_assertions)]
use crate::config::debug::PRINT_INGEST;
use crate::domain::{Metric, Reading, Series};
use crate::error::{Result, TrendError};
use crate::utils::TimeUtils;

/// What to do with a row that fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestMode {
    /// Abort the whole load on the first bad row
    #[default]
    Strict,
    /// Skip bad rows and keep going
    Lenient,
}

/// Outcome of loading a batch of rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub series: Series,
    /// Rows rejected in lenient mode (always empty in strict mode)
    pub skipped: Vec<TrendError>,
    /// Rows whose date was already present (resolved last-write-wins)
    pub replaced: usize,
}

/// Validate one row and build its reading. `row` is 1-based.
pub fn parse_row(row: usize, date: &str, value: &str, metric: Metric) -> Result<Reading> {
    let date = TimeUtils::parse_date(date, row)?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| TrendError::malformed(row, format!("non-numeric value {:?}", value.trim())))?;
    check_value(row, value, metric)?;
    Ok(Reading::new(date, value))
}

fn check_value(row: usize, value: f64, metric: Metric) -> Result<()> {
    if metric.is_plausible(value) {
        Ok(())
    } else {
        let (min, max) = metric.plausible_range();
        Err(TrendError::malformed(
            row,
            format!(
                "{} {} outside plausible range {}..={} {}",
                metric,
                value,
                min,
                max,
                metric.unit()
            ),
        ))
    }
}

fn json_row(row: usize, item: &serde_json::Value, metric: Metric) -> Result<Reading> {
    let object = item
        .as_object()
        .ok_or_else(|| TrendError::malformed(row, "expected an object"))?;

    let date = object
        .get("date")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| TrendError::malformed(row, "missing string field \"date\""))?;
    let date = TimeUtils::parse_date(date, row)?;

    let value = match object.get("value") {
        Some(serde_json::Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| TrendError::malformed(row, "value is not representable as f64"))?,
        Some(other) => {
            return Err(TrendError::malformed(row, format!("non-numeric value {}", other)));
        }
        None => return Err(TrendError::malformed(row, "missing field \"value\"")),
    };
    check_value(row, value, metric)?;

    // An optional unit must name the metric being loaded
    if let Some(unit) = object.get("unit") {
        let unit = unit
            .as_str()
            .ok_or_else(|| TrendError::malformed(row, "\"unit\" must be a string"))?;
        if Metric::from_unit(unit) != Some(metric) {
            return Err(TrendError::malformed(
                row,
                format!("unit {:?} does not match {} ({})", unit, metric, metric.unit()),
            ));
        }
    }

    Ok(Reading::new(date, value))
}

/// Collects row results into a series according to `mode`
fn collect_rows(
    rows: impl IntoIterator<Item = Result<Reading>>,
    mode: IngestMode,
) -> Result<IngestReport> {
    let mut report = IngestReport::default();

    for row in rows {
        match row {
            Ok(reading) => {
                if report.series.append(reading).is_some() {
                    report.replaced += 1;
                    #[cfg(debug_assertions)]
                    if PRINT_INGEST {
                        log::info!(
                            "Row for {} replaced an earlier reading (now {})",
                            TimeUtils::format_date(reading.date),
                            reading.value
                        );
                    }
                }
            }
            Err(err) => match mode {
                IngestMode::Strict => return Err(err),
                IngestMode::Lenient => {
                    log::warn!("Skipping row: {}", err);
                    report.skipped.push(err);
                }
            },
        }
    }

    #[cfg(debug_assertions)]
    if PRINT_INGEST {
        log::info!(
            "Ingested {} readings ({} skipped, {} replaced)",
            report.series.len(),
            report.skipped.len(),
            report.replaced
        );
    }

    Ok(report)
}

/// Parse a JSON array of `{date, value}` objects
pub fn parse_json_rows(text: &str, metric: Metric, mode: IngestMode) -> Result<IngestReport> {
    let items: Vec<serde_json::Value> = serde_json::from_str(text)
        .map_err(|e| TrendError::malformed(0, format!("not a JSON array: {}", e)))?;

    collect_rows(
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| json_row(idx + 1, item, metric)),
        mode,
    )
}

/// A header names its columns: two fields, neither a date nor a number.
/// `Fecha,Lectura` qualifies, while a data row with a bad date does not.
fn is_header(line: &str) -> bool {
    match line.split(',').collect::<Vec<_>>().as_slice() {
        [date, value] => {
            NaiveDate::parse_from_str(date.trim(), TimeUtils::STANDARD_TIME_FORMAT).is_err()
                && value.trim().parse::<f64>().is_err()
        }
        _ => false,
    }
}

/// Parse `date,value` lines. Blank lines and `#` comments are ignored.
/// The first line is skipped only when it is a column header; any other bad
/// first line is a malformed row 1. Row numbers in errors are 1-based line
/// numbers.
pub fn parse_delimited_rows(text: &str, metric: Metric, mode: IngestMode) -> Result<IngestReport> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .peekable();

    if lines.peek().is_some_and(|(_, first)| is_header(first)) {
        lines.next();
    }

    let rows = lines.map(|(row, line)| {
        let fields: Vec<&str> = line.split(',').collect();
        match fields.as_slice() {
            [date, value] => parse_row(row, date, value, metric),
            _ => Err(TrendError::malformed(
                row,
                format!("expected 2 fields (date,value), got {}", fields.len()),
            )),
        }
    });

    collect_rows(rows, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_rows_dedup_last_wins() {
        let text = r#"[
            {"date": "2026-01-02", "value": 110},
            {"date": "2026-01-04", "value": 94},
            {"date": "2026-01-02", "value": 112.5}
        ]"#;
        let report = parse_json_rows(text, Metric::Glucose, IngestMode::Strict).unwrap();

        assert_eq!(report.series.len(), 2);
        assert_eq!(report.replaced, 1);
        let first = report.series.first().unwrap();
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
        assert_eq!(first.value, 112.5);
    }

    #[test]
    fn test_json_string_value_is_not_coerced() {
        let text = r#"[{"date": "2026-01-02", "value": "110"}]"#;
        let err = parse_json_rows(text, Metric::Glucose, IngestMode::Strict).unwrap_err();
        assert!(matches!(err, TrendError::MalformedInput { row: 1, .. }));
    }

    #[test]
    fn test_json_unit_must_match_metric() {
        let text = r#"[
            {"date": "2026-01-02", "value": 110, "unit": "mg/dL"},
            {"date": "2026-01-03", "value": 112, "unit": "kg"}
        ]"#;
        let err = parse_json_rows(text, Metric::Glucose, IngestMode::Strict).unwrap_err();
        assert!(matches!(err, TrendError::MalformedInput { row: 2, .. }));

        let report = parse_json_rows(text, Metric::Glucose, IngestMode::Lenient).unwrap();
        assert_eq!(report.series.values(), vec![110.0]);
    }

    #[test]
    fn test_json_not_an_array() {
        let err = parse_json_rows("{}", Metric::Glucose, IngestMode::Strict).unwrap_err();
        assert!(matches!(err, TrendError::MalformedInput { row: 0, .. }));
    }

    #[test]
    fn test_delimited_with_header() {
        let text = "Fecha,Lectura\n2026-01-02,110\n2026-01-04,94\n\n# late entry\n2026-01-05,107\n";
        let report = parse_delimited_rows(text, Metric::Glucose, IngestMode::Strict).unwrap();
        assert_eq!(report.series.values(), vec![110.0, 94.0, 107.0]);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_delimited_bad_first_row_is_not_a_header() {
        let text = "Feb 1 2026,110\n2026-02-02,112\n";
        let err = parse_delimited_rows(text, Metric::Glucose, IngestMode::Strict).unwrap_err();
        assert!(matches!(err, TrendError::MalformedInput { row: 1, .. }));

        let report = parse_delimited_rows(text, Metric::Glucose, IngestMode::Lenient).unwrap();
        assert_eq!(report.series.len(), 1);
        assert!(matches!(report.skipped[0], TrendError::MalformedInput { row: 1, .. }));
    }

    #[test]
    fn test_header_detection() {
        assert!(is_header("date,value"));
        assert!(is_header("Fecha , Lectura"));
        assert!(!is_header("Feb 1 2026,110"));
        assert!(!is_header("2026-02-01,abc"));
        assert!(!is_header("date,value,unit"));
    }

    #[test]
    fn test_delimited_strict_rejects_bad_date_row() {
        let text = "2026-01-02,110\n2026-13-40,94\n";
        let err = parse_delimited_rows(text, Metric::Glucose, IngestMode::Strict).unwrap_err();
        assert!(matches!(err, TrendError::MalformedInput { row: 2, .. }));
    }

    #[test]
    fn test_delimited_lenient_skips_bad_rows() {
        let text = "date,value\n2026-01-02,110\n2026-01-03,abc\n\
                    2026-01-04,999\n2026-01-05,1,2\n2026-01-06,101\n";
        let report = parse_delimited_rows(text, Metric::Glucose, IngestMode::Lenient).unwrap();

        assert_eq!(report.series.values(), vec![110.0, 101.0]);
        assert_eq!(report.skipped.len(), 3);
        assert!(matches!(report.skipped[0], TrendError::MalformedInput { row: 3, .. }));
    }

    #[test]
    fn test_weight_range_differs_from_glucose() {
        assert!(parse_row(1, "2026-01-02", "40.5", Metric::Weight).is_ok());
        assert!(parse_row(1, "2026-01-02", "40.5", Metric::Glucose).is_err());
    }
}
