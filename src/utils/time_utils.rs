use chrono::{Days, NaiveDate};

use crate::error::{Result, TrendError};

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";

    /// Parse an ISO-8601 calendar date (`2026-01-02`).
    /// `row` is only used to label the error.
    pub fn parse_date(text: &str, row: usize) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), Self::STANDARD_TIME_FORMAT)
            .map_err(|e| TrendError::malformed(row, format!("unparseable date {:?}: {}", text, e)))
    }

    pub fn format_date(date: NaiveDate) -> String {
        date.format(Self::STANDARD_TIME_FORMAT).to_string()
    }

    /// Whole days from `from` to `to` (negative when `to` is earlier)
    pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
        (to - from).num_days()
    }

    /// `date` shifted forward by `days`. Saturates at chrono's max date.
    pub fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
        date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
    }
}
