//! Error types for recall-core.

use thiserror::Error;

/// Rejected scheduling input.
///
/// Raised at the boundary where stored or client-supplied numbers become a
/// [`ScheduleState`](crate::types::ScheduleState). The engine itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("interval must be at least 1 day, got {0}")]
    InvalidInterval(i64),

    #[error("ease factor must be a number of at least {minimum}, got {value}")]
    InvalidEase { value: f64, minimum: f64 },

    #[error("repetitions must not be negative, got {0}")]
    InvalidRepetitions(i64),
}

/// Rejected session transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot start a session without items")]
    EmptyItems,
}
