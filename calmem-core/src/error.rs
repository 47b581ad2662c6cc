//! Error types for the calmem core.

use thiserror::Error;

use crate::validate::FieldErrors;

/// Errors reported through the normal result channel.
///
/// Infrastructure faults (entropy-source failure, a poisoned store lock) are
/// deliberately absent: they abort the in-flight operation by panicking
/// instead of surfacing as a value a caller might retry.
#[derive(Error, Debug)]
pub enum CalmemError {
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),
}

/// Result type alias for calmem operations.
pub type CalmemResult<T> = Result<T, CalmemError>;
