// Domain types and value objects
pub mod metric;
pub mod reading;
pub mod series;
pub mod trend_parameters;

// Re-export commonly used types
pub use metric::Metric;
pub use reading::{Checkpoint, Reading};
pub use series::Series;
pub use trend_parameters::TrendParameters;
