//! Error types for calendar operations.

use thiserror::Error;

/// Errors that can occur in calendar operations.
///
/// `NotFound` covers both a missing event and an event owned by another user,
/// so callers cannot probe for other users' events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("event not found")]
    NotFound,

    #[error("invalid user id")]
    InvalidUserId,

    #[error("empty title")]
    EmptyTitle,

    #[error("invalid date")]
    InvalidDate,
}

/// Result type alias for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
