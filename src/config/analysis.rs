//! Analysis and computation configuration

/// Rolling-average settings
pub struct RollingConfig {
    // Trailing window lengths (in readings) shown on the dashboard
    pub windows: &'static [usize],
    // Window lengths reported as headline KPIs ("last N days" means)
    pub kpi_windows: &'static [usize],
}

/// Settings for the exponential-decay projection
pub struct ProjectionConfig {
    // Long-run target the projection approaches (mg/dL)
    pub asymptote: f64,
    // Rate of approach. 0.1 is a firm but realistic change; some dashboards used 0.08
    pub decay_constant: f64,
    // Number of projected days, starting at the latest reading
    pub horizon_days: usize,
    // Thresholds whose ETA is reported
    pub milestones: &'static [f64],
}

/// Target band drawn under the chart
pub struct SafeZoneConfig {
    pub low: f64,
    pub high: f64,
}

pub struct BodyConfig {
    // Used for BMI from the latest weight
    pub height_m: f64,
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    pub rolling: RollingConfig,
    pub projection: ProjectionConfig,
    pub safe_zone: SafeZoneConfig,
    pub body: BodyConfig,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    rolling: RollingConfig {
        windows: &[8, 15, 30, 45],
        kpi_windows: &[8, 15],
    },

    projection: ProjectionConfig {
        asymptote: 90.0,
        decay_constant: 0.1,
        horizon_days: 30,
        milestones: &[110.0, 100.0],
    },

    safe_zone: SafeZoneConfig {
        low: 70.0,
        high: 100.0,
    },

    body: BodyConfig { height_m: 1.75 },
};
