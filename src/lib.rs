// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod utils;

// Re-export commonly used types
pub use analysis::{DashboardSummary, Eta, RollingWindow};
pub use config::TrendSettings;
pub use domain::{Checkpoint, Metric, Reading, Series, TrendParameters};
pub use error::{Result, TrendError};

// CLI argument parsing
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use utils::TimeUtils;

fn parse_cli_date(text: &str) -> std::result::Result<NaiveDate, String> {
    TimeUtils::parse_date(text, 0).map_err(|_| {
        format!("expected a date in {} form, got {:?}", TimeUtils::STANDARD_TIME_FORMAT, text)
    })
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Glucose readings file (`.json` array or `date,value` lines)
    pub readings: PathBuf,

    /// Weight checkpoints file, interpolated to a daily series for BMI
    #[arg(long)]
    pub weights: Option<PathBuf>,

    /// Asymptotic target of the projection (mg/dL)
    #[arg(long)]
    pub target: Option<f64>,

    /// Decay constant k of the projection (> 0)
    #[arg(long)]
    pub decay: Option<f64>,

    /// Number of projected days
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Date to start the projection from instead of the latest reading
    #[arg(long, value_parser = parse_cli_date, requires = "base_value")]
    pub base_date: Option<NaiveDate>,

    /// Value to start the projection from (requires --base-date)
    #[arg(long, requires = "base_date")]
    pub base_value: Option<f64>,

    /// Rolling-average window in readings (repeatable)
    #[arg(long = "window")]
    pub windows: Vec<usize>,

    /// Trailing-mean KPI window in readings (repeatable)
    #[arg(long = "kpi-window")]
    pub kpi_windows: Vec<usize>,

    /// Threshold to report an ETA for (repeatable)
    #[arg(long = "milestone")]
    pub milestones: Vec<f64>,

    /// Lower bound of the safe zone (mg/dL)
    #[arg(long)]
    pub safe_low: Option<f64>,

    /// Upper bound of the safe zone (mg/dL)
    #[arg(long)]
    pub safe_high: Option<f64>,

    /// Height in metres, for BMI
    #[arg(long)]
    pub height: Option<f64>,

    /// Skip malformed rows instead of rejecting the file
    #[arg(long, default_value_t = false)]
    pub lenient: bool,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Cli {
    /// Defaults from `config::ANALYSIS` with any flags applied on top
    pub fn settings(&self) -> TrendSettings {
        let mut settings = TrendSettings::default();
        if let Some(target) = self.target {
            settings.asymptote = target;
        }
        if let Some(decay) = self.decay {
            settings.decay_constant = decay;
        }
        if let Some(horizon) = self.horizon {
            settings.horizon_days = horizon;
        }
        if let (Some(date), Some(value)) = (self.base_date, self.base_value) {
            settings.base = Some(Reading::new(date, value));
        }
        if !self.windows.is_empty() {
            settings.windows = self.windows.clone();
        }
        if !self.kpi_windows.is_empty() {
            settings.kpi_windows = self.kpi_windows.clone();
        }
        if !self.milestones.is_empty() {
            settings.milestones = self.milestones.clone();
        }
        if let Some(low) = self.safe_low {
            settings.safe_zone.0 = low;
        }
        if let Some(high) = self.safe_high {
            settings.safe_zone.1 = high;
        }
        if let Some(height) = self.height {
            settings.height_m = height;
        }
        settings
    }

    pub fn ingest_mode(&self) -> data::IngestMode {
        if self.lenient {
            data::IngestMode::Lenient
        } else {
            data::IngestMode::Strict
        }
    }
}
