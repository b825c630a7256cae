use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated measurement (one per calendar day)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub date: NaiveDate,
    pub value: f64,
}

impl Reading {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Reading { date, value }
    }
}

/// A sparse, manually supplied measurement used to anchor interpolation
/// (weight milestones rather than daily glucose readings).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl Checkpoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Checkpoint { date, value }
    }
}

impl From<Reading> for Checkpoint {
    fn from(reading: Reading) -> Self {
        Checkpoint::new(reading.date, reading.value)
    }
}

impl From<Checkpoint> for Reading {
    fn from(checkpoint: Checkpoint) -> Self {
        Reading::new(checkpoint.date, checkpoint.value)
    }
}
