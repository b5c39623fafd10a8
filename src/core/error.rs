use crate::core::models::Phase;
use std::fmt;

/// Errors raised by the playback core and the routine repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The routine cannot be played (no exercises, bad values, ...).
    InvalidRoutine(String),

    /// `advance` was asked to leave a phase that has no successor.
    InvalidTransition { phase: Phase },

    /// The clock was ticked before a phase began or after a reset.
    NotRunning,

    /// No routine is stored under this name.
    NotFound(String),
}

impl TimerError {
    pub fn invalid_routine(reason: impl Into<String>) -> Self {
        TimerError::InvalidRoutine(reason.into())
    }
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::InvalidRoutine(reason) => write!(f, "Invalid routine: {}", reason),
            TimerError::InvalidTransition { phase } => {
                write!(f, "Cannot advance from the {:?} phase", phase)
            }
            TimerError::NotRunning => write!(f, "Clock is not running"),
            TimerError::NotFound(name) => write!(f, "Routine '{}' not found", name),
        }
    }
}

impl std::error::Error for TimerError {}
