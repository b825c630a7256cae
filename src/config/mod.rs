//! Configuration module for the trend dashboard.

pub mod analysis;
pub mod debug;
pub mod settings;

// Re-export commonly used items
pub use analysis::ANALYSIS;
pub use settings::TrendSettings;
