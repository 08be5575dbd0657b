//! Core error types for burpee-core.
//!
//! All failures are detected synchronously: plan validation happens before
//! any engine state exists, and the running engine itself cannot fail.

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::CycleKind;

/// Core error type for burpee-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Workout plan validation errors
    #[error("invalid workout: {0}")]
    Plan(#[from] PlanError),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Plan validation errors.
///
/// All variants are raised by [`crate::timer::WorkoutPlan::new`] before a
/// workout starts; a plan that constructs successfully cannot fail later.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// Duration or repetition count is not positive.
    #[error("workout duration and burpee count must both be positive")]
    InvalidInput,

    /// Custom per-burpee time is under the floor for the chosen variant.
    #[error("time per burpee must be at least {floor_secs}s for a {cycle} burpee")]
    BelowMinimum { cycle: CycleKind, floor_secs: f64 },

    /// Custom per-burpee time does not fit the per-burpee share of the
    /// workout duration.
    #[error("not enough time: need {shortfall_secs:.1}s more per burpee")]
    InsufficientTime { shortfall_secs: f64 },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
