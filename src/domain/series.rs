//! Ordered, date-unique series of readings
//!
//! `Series` keeps its readings sorted by date with at most one reading per day.
//! Writing a date that already exists replaces the old reading (last write wins),
//! which is how repeated rows from the storage file are resolved.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::reading::Reading;

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Series {
    readings: Vec<Reading>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from rows in any order. Later rows win on duplicate dates.
    pub fn from_readings(readings: impl IntoIterator<Item = Reading>) -> Self {
        let mut series = Self::new();
        series.merge(readings);
        series
    }

    /// Insert one reading in date order, replacing any reading on the same date.
    /// Returns the replaced reading, if there was one.
    pub fn append(&mut self, reading: Reading) -> Option<Reading> {
        // Fast path: the usual case is today's reading landing at the end
        if self.readings.last().is_none_or(|last| last.date < reading.date) {
            self.readings.push(reading);
            return None;
        }

        match self.readings.binary_search_by_key(&reading.date, |r| r.date) {
            Ok(idx) => Some(std::mem::replace(&mut self.readings[idx], reading)),
            Err(idx) => {
                self.readings.insert(idx, reading);
                None
            }
        }
    }

    /// Bulk load. Returns how many existing dates were overwritten.
    pub fn merge(&mut self, readings: impl IntoIterator<Item = Reading>) -> usize {
        let mut replaced = 0;
        for reading in readings {
            if self.append(reading).is_some() {
                replaced += 1;
            }
        }
        replaced
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.readings.iter()
    }

    pub fn values(&self) -> Vec<f64> {
        self.readings.iter().map(|r| r.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.readings.iter().map(|r| r.date).collect()
    }

    pub fn first(&self) -> Option<&Reading> {
        self.readings.first()
    }

    pub fn last(&self) -> Option<&Reading> {
        self.readings.last()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Reading> {
        self.readings
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|idx| &self.readings[idx])
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Reading;
    type IntoIter = std::slice::Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter()
    }
}

impl FromIterator<Reading> for Series {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        Series::from_readings(iter)
    }
}
