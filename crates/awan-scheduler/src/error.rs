//! Error types for the scheduler.

use thiserror::Error;

/// Errors that can occur in scheduler operations.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A schedule entry's time string could not be parsed.
    #[error("invalid schedule time for slot {label}: {value:?} (expected HH:MM)")]
    InvalidTime { label: String, value: String },

    /// Two schedule entries share the same label.
    #[error("duplicate slot label: {0}")]
    DuplicateSlot(String),

    /// A bounded retry policy ran out of attempts.
    #[error("retry attempts exhausted after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },
}
