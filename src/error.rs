//! Error types for the planner.
//!
//! Input-shape problems (bad clock strings, inverted windows, malformed
//! tasks, broken configuration) surface as [`PlanError`] before any model is
//! built. Solver outcomes, including infeasibility, are reported as data via
//! [`SolveResult`](crate::models::SolveResult) and never through this type.

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while preparing a planning problem.
#[derive(Error, Debug)]
pub enum PlanError {
    /// A clock string is not a valid 24-hour `HH:MM` value.
    #[error("invalid time format '{input}': expected 24-hour HH:MM")]
    InvalidTimeFormat { input: String },

    /// An availability window does not satisfy `start < end`.
    #[error("invalid availability window [{start}, {end}): start must be before end")]
    InvalidWindow { start: i64, end: i64 },

    /// One or more tasks failed engine-side validation.
    #[error("invalid task input: {}", join_messages(.0))]
    InvalidTask(Vec<ValidationError>),

    /// Planner configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML could not be deserialized.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value outside its allowed range.
    #[error("invalid value for '{field}': {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for planner operations.
pub type PlanResult<T> = Result<T, PlanError>;
