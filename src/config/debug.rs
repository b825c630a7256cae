//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. All flags are further gated by `cfg(debug_assertions)`.

/// Emit one line per skipped or replaced row while ingesting readings.
pub const PRINT_INGEST: bool = false;

/// Emit the intermediate values used to build the dashboard summary.
pub const PRINT_SUMMARY_STEPS: bool = false;

/// Emit every milestone ETA as it is solved.
pub const PRINT_MILESTONES: bool = false;
