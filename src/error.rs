//! Error types for the trend engine

use thiserror::Error;

/// Errors reported by the trend engine and row ingestion.
///
/// Missing rolling-average points are not errors: they surface as `None`.
/// Unreachable milestones are an [`crate::analysis::Eta::Unreachable`] value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrendError {
    #[error("Malformed input at row {row}: {reason}")]
    MalformedInput { row: usize, reason: String },

    #[error("Empty series: nothing to compute")]
    EmptySeries,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Domain error: {0}")]
    Domain(String),
}

impl TrendError {
    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            row,
            reason: reason.into(),
        }
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, TrendError>;
