//! Runtime settings: the compile-time defaults from [`ANALYSIS`] with
//! caller overrides applied.

use serde::{Deserialize, Serialize};

use crate::config::analysis::ANALYSIS;
use crate::domain::Reading;
use crate::error::{Result, TrendError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendSettings {
    pub windows: Vec<usize>,
    pub kpi_windows: Vec<usize>,
    pub asymptote: f64,
    pub decay_constant: f64,
    pub horizon_days: usize,
    pub milestones: Vec<f64>,
    pub safe_zone: (f64, f64),
    pub height_m: f64,
    /// Projection base point; `None` seeds from the latest reading
    pub base: Option<Reading>,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            windows: ANALYSIS.rolling.windows.to_vec(),
            kpi_windows: ANALYSIS.rolling.kpi_windows.to_vec(),
            asymptote: ANALYSIS.projection.asymptote,
            decay_constant: ANALYSIS.projection.decay_constant,
            horizon_days: ANALYSIS.projection.horizon_days,
            milestones: ANALYSIS.projection.milestones.to_vec(),
            safe_zone: (ANALYSIS.safe_zone.low, ANALYSIS.safe_zone.high),
            height_m: ANALYSIS.body.height_m,
            base: None,
        }
    }
}

impl TrendSettings {
    /// Cheap structural checks. Parameter-specific checks (k > 0, horizon >= 1, ...)
    /// happen again where the values are used.
    pub fn validate(&self) -> Result<()> {
        if self.windows.iter().chain(&self.kpi_windows).any(|&w| w == 0) {
            return Err(TrendError::invalid_parameter("window sizes must be >= 1"));
        }
        let (low, high) = self.safe_zone;
        if !(low.is_finite() && high.is_finite()) || low > high {
            return Err(TrendError::invalid_parameter(format!(
                "safe zone {}..={} is not a valid band",
                low, high
            )));
        }
        Ok(())
    }
}
