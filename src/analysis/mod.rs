// Trend engine: pure functions over readings, no state kept between calls
pub mod body_mass;
pub mod interpolation;
pub mod projection;
pub mod rolling;
pub mod summary;

pub use body_mass::{BmiCategory, BodyMassIndex, body_mass_index};
pub use interpolation::{CheckpointCurve, interpolate};
pub use projection::{
    Eta, Milestone, ProjectionPoint, UnreachableReason, eta_to_threshold, milestone_etas, project,
    value_at,
};
pub use rolling::{
    RollingPoint, RollingWindow, rolling_average, rolling_averages, rolling_mean, tail_mean,
};
pub use summary::DashboardSummary;
