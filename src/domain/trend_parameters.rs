use serde::Serialize;

use crate::domain::reading::Reading;
use crate::domain::series::Series;
use crate::error::{Result, TrendError};

/// Parameters of one decay-projection run. Validated on construction and
/// immutable afterwards.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct TrendParameters {
    asymptote: f64,
    decay_constant: f64,
    base_point: Reading,
    horizon_days: usize,
}

impl TrendParameters {
    pub fn new(
        asymptote: f64,
        decay_constant: f64,
        base_point: Reading,
        horizon_days: usize,
    ) -> Result<Self> {
        if !asymptote.is_finite() {
            return Err(TrendError::invalid_parameter(format!(
                "asymptote must be finite, got {}",
                asymptote
            )));
        }
        if !decay_constant.is_finite() || decay_constant <= 0.0 {
            return Err(TrendError::invalid_parameter(format!(
                "decay constant must be > 0, got {}",
                decay_constant
            )));
        }
        if !base_point.value.is_finite() {
            return Err(TrendError::invalid_parameter(format!(
                "base value must be finite, got {}",
                base_point.value
            )));
        }
        if horizon_days == 0 {
            return Err(TrendError::invalid_parameter(
                "projection horizon must be at least 1 day",
            ));
        }

        Ok(Self {
            asymptote,
            decay_constant,
            base_point,
            horizon_days,
        })
    }

    /// Seed the projection from the most recent reading of `series`
    pub fn from_latest(
        series: &Series,
        asymptote: f64,
        decay_constant: f64,
        horizon_days: usize,
    ) -> Result<Self> {
        let base_point = *series.last().ok_or(TrendError::EmptySeries)?;
        Self::new(asymptote, decay_constant, base_point, horizon_days)
    }

    pub fn asymptote(&self) -> f64 {
        self.asymptote
    }

    pub fn decay_constant(&self) -> f64 {
        self.decay_constant
    }

    pub fn base_point(&self) -> Reading {
        self.base_point
    }

    pub fn base_value(&self) -> f64 {
        self.base_point.value
    }

    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }
}
