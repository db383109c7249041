//! Core error types for pomogoal-core.
//!
//! Every failure the ledger can report is a local, recoverable condition;
//! the presentation layer decides how to surface it. Persistence failures
//! are never masked: losing goal progress silently is worse than an error.

use thiserror::Error;

use crate::ledger::{MAX_GOALS, MAX_TARGET_HOURS, MIN_TARGET_HOURS};

/// Core error type for pomogoal-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Bad goal input (name or target hours)
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Ledger already holds the maximum number of goals
    #[error("goal limit reached: a ledger holds at most {} goals", MAX_GOALS)]
    Capacity,

    /// Index out of bounds on edit/delete/select/progress
    #[error("index {index} out of bounds for goals (length: {len})")]
    OutOfBounds { index: usize, len: usize },

    /// Progress asked of a ledger with no goals at all
    #[error("no goals in the ledger")]
    EmptyLedger,

    /// IO errors from the persistence layer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for goal input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("goal name must not be empty")]
    EmptyName,

    #[error(
        "target hours must be between {} and {}, got {value}",
        MIN_TARGET_HOURS,
        MAX_TARGET_HOURS
    )]
    TargetOutOfRange { value: f64 },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
