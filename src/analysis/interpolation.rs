//! Dense daily series from sparse checkpoints
//!
//! Between two checkpoints values are linearly interpolated. Outside the
//! checkpoint range the nearest checkpoint's value is held flat; there is no
//! linear extrapolation. Checkpoint dates always return their exact value.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use itertools::Itertools;

use crate::domain::{Checkpoint, Reading, Series};
use crate::error::{Result, TrendError};
use crate::utils::TimeUtils;
use crate::utils::maths_utils::lerp;

/// Checkpoints sorted by date, one per day (last write wins)
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointCurve {
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointCurve {
    pub fn new(checkpoints: &[Checkpoint]) -> Result<Self> {
        if checkpoints.is_empty() {
            return Err(TrendError::EmptySeries);
        }
        if let Some(bad) = checkpoints.iter().find(|c| !c.value.is_finite()) {
            return Err(TrendError::invalid_parameter(format!(
                "checkpoint on {} has non-finite value",
                TimeUtils::format_date(bad.date)
            )));
        }

        // BTreeMap insert keeps the last value per date and sorts by date
        let by_date: BTreeMap<NaiveDate, f64> =
            checkpoints.iter().map(|c| (c.date, c.value)).collect();

        Ok(Self {
            checkpoints: by_date
                .into_iter()
                .map(|(date, value)| Checkpoint::new(date, value))
                .collect(),
        })
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn first_date(&self) -> NaiveDate {
        self.checkpoints[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.checkpoints[self.checkpoints.len() - 1].date
    }

    /// Value on any calendar day, flat outside the checkpoint range
    pub fn value_on(&self, date: NaiveDate) -> f64 {
        match self.checkpoints.binary_search_by_key(&date, |c| c.date) {
            Ok(idx) => self.checkpoints[idx].value,
            Err(0) => self.checkpoints[0].value,
            Err(idx) if idx == self.checkpoints.len() => self.checkpoints[idx - 1].value,
            Err(idx) => segment_value(&self.checkpoints[idx - 1], &self.checkpoints[idx], date),
        }
    }

    /// One reading per day from the first to the last checkpoint, inclusive
    pub fn daily(&self) -> Series {
        let mut readings: Vec<Reading> = Vec::new();

        for (left, right) in self.checkpoints.iter().tuple_windows() {
            // Right endpoint is emitted by the next segment (or the final push)
            for offset in 0..TimeUtils::days_between(left.date, right.date) {
                let date = TimeUtils::add_days(left.date, offset as u64);
                readings.push(Reading::new(date, segment_value(left, right, date)));
            }
        }
        let last = self.checkpoints[self.checkpoints.len() - 1];
        readings.push(last.into());

        Series::from_readings(readings)
    }

    /// One reading per day over `[start, end]`, inclusive, flat beyond the checkpoints
    pub fn daily_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Series> {
        if end < start {
            return Err(TrendError::invalid_parameter(format!(
                "range end {} is before start {}",
                TimeUtils::format_date(end),
                TimeUtils::format_date(start)
            )));
        }
        let days = TimeUtils::days_between(start, end);
        Ok((0..=days)
            .map(|offset| {
                let date = TimeUtils::add_days(start, offset as u64);
                Reading::new(date, self.value_on(date))
            })
            .collect())
    }
}

fn segment_value(left: &Checkpoint, right: &Checkpoint, date: NaiveDate) -> f64 {
    let span = TimeUtils::days_between(left.date, right.date) as f64;
    let elapsed = TimeUtils::days_between(left.date, date) as f64;
    lerp(left.value, right.value, elapsed / span)
}

/// Dense daily series spanning the checkpoints (see [`CheckpointCurve::daily`])
pub fn interpolate(checkpoints: &[Checkpoint]) -> Result<Series> {
    Ok(CheckpointCurve::new(checkpoints)?.daily())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::maths_utils::approx_eq;

    fn day(offset: u64) -> NaiveDate {
        TimeUtils::add_days(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(), offset)
    }

    #[test]
    fn test_midpoint() {
        let checkpoints = [Checkpoint::new(day(0), 127.0), Checkpoint::new(day(10), 123.5)];
        let series = interpolate(&checkpoints).unwrap();

        assert_eq!(series.len(), 11);
        let mid = series.get(day(5)).unwrap().value;
        assert!(approx_eq(mid, 125.25, 1e-12));
    }

    #[test]
    fn test_checkpoint_dates_are_exact() {
        let checkpoints = [
            Checkpoint::new(day(0), 125.6),
            Checkpoint::new(day(7), 128.3622899),
            Checkpoint::new(day(19), 129.1098325),
            Checkpoint::new(day(50), 122.7486554),
        ];
        let series = interpolate(&checkpoints).unwrap();

        assert_eq!(series.len(), 51);
        for c in &checkpoints {
            assert_eq!(series.get(c.date).unwrap().value, c.value);
        }
    }

    #[test]
    fn test_single_checkpoint_is_constant() {
        let curve = CheckpointCurve::new(&[Checkpoint::new(day(3), 124.0)]).unwrap();
        let dense = curve.daily();
        assert_eq!(dense.values(), vec![124.0]);

        let wide = curve.daily_between(day(0), day(6)).unwrap();
        assert_eq!(wide.len(), 7);
        assert!(wide.iter().all(|r| r.value == 124.0));
    }

    #[test]
    fn test_flat_extrapolation() {
        let curve = CheckpointCurve::new(&[
            Checkpoint::new(day(5), 130.0),
            Checkpoint::new(day(10), 120.0),
        ])
        .unwrap();

        assert_eq!(curve.value_on(day(0)), 130.0);
        assert_eq!(curve.value_on(day(40)), 120.0);
        assert!(approx_eq(curve.value_on(day(6)), 128.0, 1e-12));
    }

    #[test]
    fn test_duplicate_checkpoints_last_wins_and_unsorted_input() {
        let curve = CheckpointCurve::new(&[
            Checkpoint::new(day(4), 120.0),
            Checkpoint::new(day(0), 100.0),
            Checkpoint::new(day(4), 140.0),
        ])
        .unwrap();

        assert_eq!(curve.checkpoints().len(), 2);
        assert_eq!(curve.first_date(), day(0));
        assert_eq!(curve.last_date(), day(4));
        assert_eq!(curve.value_on(day(4)), 140.0);
        assert!(approx_eq(curve.value_on(day(2)), 120.0, 1e-12));
    }

    #[test]
    fn test_empty_and_invalid() {
        assert_eq!(interpolate(&[]), Err(TrendError::EmptySeries));
        assert!(CheckpointCurve::new(&[Checkpoint::new(day(0), f64::NAN)]).is_err());

        let curve = CheckpointCurve::new(&[Checkpoint::new(day(0), 1.0)]).unwrap();
        assert!(curve.daily_between(day(3), day(1)).is_err());
    }
}
