//! Error types for recurrence-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    /// The recurrence rule can never be expanded meaningfully
    /// (zero interval, zero count, contradictory wire fields).
    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("Invalid date or time: {0}")]
    InvalidDate(String),

    /// An unbounded rule was expanded without a horizon to stop at.
    #[error("Unbounded recurrence requires an expansion horizon")]
    MissingHorizon,

    #[error("Occurrence not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, RecurrenceError>;
