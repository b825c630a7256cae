//! Dashboard summary
//!
//! Everything the dashboard shows, derived in one pass from the glucose series,
//! optional weight checkpoints and [`TrendSettings`]: headline trailing means,
//! rolling curves, the decay projection seeded from the latest reading (or an
//! explicit base point), milestone ETAs, safe-zone occupancy and BMI from the
//! latest weight.

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::analysis::body_mass::{BodyMassIndex, body_mass_index};
use crate::analysis::interpolation::CheckpointCurve;
use crate::analysis::projection::{Milestone, ProjectionPoint, milestone_etas, project};
use crate::analysis::rolling::{RollingPoint, RollingWindow, rolling_averages, tail_mean};
use crate::config::TrendSettings;
#[cfg(debug_assertions)]
use crate::config::debug::{PRINT_MILESTONES, PRINT_SUMMARY_STEPS};
use crate::domain::{Checkpoint, Reading, Series, TrendParameters};
use crate::error::{Result, TrendError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowKpi {
    pub window: usize,
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingCurve {
    pub window: usize,
    pub points: Vec<RollingPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two readings
    pub std_dev: Option<f64>,
}

impl SeriesStats {
    pub fn from_series(series: &Series) -> Result<Self> {
        if series.is_empty() {
            return Err(TrendError::EmptySeries);
        }
        let values = series.values();
        let std_dev = if values.len() < 2 {
            None
        } else {
            Some(Statistics::std_dev(values.iter()))
        };

        Ok(Self {
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
            mean: Statistics::mean(values.iter()),
            std_dev,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafeZoneStats {
    pub low: f64,
    pub high: f64,
    pub inside: usize,
    pub inside_pct: f64,
    pub latest_inside: bool,
}

impl SafeZoneStats {
    pub fn from_series(series: &Series, (low, high): (f64, f64)) -> Result<Self> {
        let latest = series.last().ok_or(TrendError::EmptySeries)?;
        let in_band = |value: f64| value >= low && value <= high;
        let inside = series.iter().filter(|r| in_band(r.value)).count();

        Ok(Self {
            low,
            high,
            inside,
            inside_pct: inside as f64 / series.len() as f64 * 100.0,
            latest_inside: in_band(latest.value),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightSummary {
    pub latest: Reading,
    pub bmi: BodyMassIndex,
    /// Daily weight interpolated between checkpoints
    pub daily: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub latest: Reading,
    pub readings: usize,
    pub stats: SeriesStats,
    pub kpis: Vec<WindowKpi>,
    pub rolling: Vec<RollingCurve>,
    pub parameters: TrendParameters,
    /// Latest reading minus the asymptotic target
    pub distance_to_target: f64,
    pub projection: Vec<ProjectionPoint>,
    pub milestones: Vec<Milestone>,
    pub safe_zone: SafeZoneStats,
    pub weight: Option<WeightSummary>,
}

impl DashboardSummary {
    pub fn build(
        glucose: &Series,
        checkpoints: Option<&[Checkpoint]>,
        settings: &TrendSettings,
    ) -> Result<Self> {
        settings.validate()?;
        let latest = *glucose.last().ok_or(TrendError::EmptySeries)?;

        // Headline means follow `tail(n).mean()`: a short history still yields a value
        let kpis = settings
            .kpi_windows
            .iter()
            .map(|&window| -> Result<WindowKpi> {
                let relaxed = RollingWindow::with_min_periods(window, 1)?;
                Ok(WindowKpi {
                    window,
                    mean: tail_mean(glucose, relaxed)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let windows = settings
            .windows
            .iter()
            .map(|&size| RollingWindow::new(size))
            .collect::<Result<Vec<_>>>()?;
        let rolling = rolling_averages(glucose, &windows)?
            .into_iter()
            .map(|(window, points)| RollingCurve {
                window: window.size,
                points,
            })
            .collect();

        // An explicit base point overrides seeding from the latest reading
        let parameters = match settings.base {
            Some(base) => TrendParameters::new(
                settings.asymptote,
                settings.decay_constant,
                base,
                settings.horizon_days,
            )?,
            None => TrendParameters::from_latest(
                glucose,
                settings.asymptote,
                settings.decay_constant,
                settings.horizon_days,
            )?,
        };
        let projection = project(&parameters);
        let milestones = milestone_etas(&parameters, &settings.milestones)?;

        #[cfg(debug_assertions)]
        if PRINT_MILESTONES {
            for milestone in &milestones {
                log::info!("Milestone {:.1}: {}", milestone.threshold, milestone.eta);
            }
        }

        let weight = match checkpoints {
            Some(checkpoints) => {
                let curve = CheckpointCurve::new(checkpoints)?;
                let daily = curve.daily();
                let latest_weight = *daily.last().ok_or(TrendError::EmptySeries)?;
                Some(WeightSummary {
                    latest: latest_weight,
                    bmi: body_mass_index(latest_weight.value, settings.height_m)?,
                    daily,
                })
            }
            None => None,
        };

        let summary = Self {
            latest,
            readings: glucose.len(),
            stats: SeriesStats::from_series(glucose)?,
            kpis,
            rolling,
            parameters,
            distance_to_target: latest.value - settings.asymptote,
            projection,
            milestones,
            safe_zone: SafeZoneStats::from_series(glucose, settings.safe_zone)?,
            weight,
        };

        #[cfg(debug_assertions)]
        if PRINT_SUMMARY_STEPS {
            log::info!(
                "Summary: {} readings, latest {:.1}, kpis {:?}, stats {:?}",
                summary.readings,
                summary.latest.value,
                summary.kpis,
                summary.stats
            );
        }

        Ok(summary)
    }

    pub fn kpi(&self, window: usize) -> Option<f64> {
        self.kpis
            .iter()
            .find(|kpi| kpi.window == window)
            .and_then(|kpi| kpi.mean)
    }
}
