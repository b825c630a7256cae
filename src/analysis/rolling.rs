//! Trailing rolling averages
//!
//! Every window is causal: the value at index `i` only sees readings `..=i`.
//! Points whose trailing window holds fewer than `min_periods` readings are
//! `None` rather than a sentinel number.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::Series;
use crate::error::{Result, TrendError};
use crate::utils::maths_utils::mean;

/// Window length and the minimum number of readings needed to report a mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollingWindow {
    pub size: usize,
    pub min_periods: usize,
}

impl RollingWindow {
    /// Strict window: `min_periods == size`
    pub fn new(size: usize) -> Result<Self> {
        Self::with_min_periods(size, size)
    }

    pub fn with_min_periods(size: usize, min_periods: usize) -> Result<Self> {
        if size == 0 {
            return Err(TrendError::invalid_parameter("window size must be >= 1"));
        }
        if min_periods == 0 || min_periods > size {
            return Err(TrendError::invalid_parameter(format!(
                "min_periods must be within 1..={}, got {}",
                size, min_periods
            )));
        }
        Ok(Self { size, min_periods })
    }
}

/// One point of a rolling-average curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RollingPoint {
    pub date: NaiveDate,
    pub mean: Option<f64>,
}

/// Rolling mean over a raw slice. Output has the same length as `values`.
pub fn rolling_mean(values: &[f64], window: RollingWindow) -> Result<Vec<Option<f64>>> {
    if values.is_empty() {
        return Err(TrendError::EmptySeries);
    }

    let means = (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window.size);
            let trailing = &values[start..=i];
            if trailing.len() < window.min_periods {
                None
            } else {
                mean(trailing)
            }
        })
        .collect();

    Ok(means)
}

/// Rolling mean of a series, one dated point per reading
pub fn rolling_average(series: &Series, window: RollingWindow) -> Result<Vec<RollingPoint>> {
    let means = rolling_mean(&series.values(), window)?;
    Ok(series
        .iter()
        .zip(means)
        .map(|(reading, mean)| RollingPoint {
            date: reading.date,
            mean,
        })
        .collect())
}

/// Independent rolling averages for several window sizes over the same series
pub fn rolling_averages(
    series: &Series,
    windows: &[RollingWindow],
) -> Result<Vec<(RollingWindow, Vec<RollingPoint>)>> {
    windows
        .iter()
        .map(|&window| -> Result<_> { Ok((window, rolling_average(series, window)?)) })
        .collect()
}

/// Mean of the last up-to-`window.size` readings (the dashboard's "last N days" KPI).
/// `None` if fewer than `window.min_periods` readings exist.
pub fn tail_mean(series: &Series, window: RollingWindow) -> Result<Option<f64>> {
    if series.is_empty() {
        return Err(TrendError::EmptySeries);
    }
    let values = series.values();
    let start = values.len().saturating_sub(window.size);
    let tail = &values[start..];
    if tail.len() < window.min_periods {
        return Ok(None);
    }
    Ok(mean(tail))
}
