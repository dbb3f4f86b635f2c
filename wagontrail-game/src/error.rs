//! Error types shared across the simulation core.
use thiserror::Error;

use crate::mode::{ModeCategory, StateId};

/// Result alias for mode stack and state table operations.
pub type ModeResult<T> = Result<T, ModeError>;

/// Failures raised by the mode manager and its factories.
///
/// None of these are recoverable at runtime: they indicate an incomplete
/// registration table or a caller ordering bug, so they propagate straight to
/// the simulation driver.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ModeError {
    #[error("no constructor registered for mode category {0}")]
    UnknownModeCategory(ModeCategory),
    #[error("no constructor registered for state type {0}")]
    UnknownStateType(StateId),
    #[error("removal sweep requested while no mode is active")]
    NoActiveMode,
}

/// Errors raised when simulation configuration invariants are violated.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
    #[error("start date {year}-{month:02}-{day:02} is not a calendar date")]
    InvalidStartDate { year: i32, month: u32, day: u32 },
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u32),
}

/// Errors raised while loading trail tables.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("trail data could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("trail `{0}` has no locations")]
    EmptyTrail(String),
}

/// Aggregate error returned while building a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Mode(#[from] ModeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Data(#[from] DataError),
}
