//! Calendar event types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// Store-assigned event identifier. Positive once assigned.
pub type EventId = i64;

/// Owner of an event. Valid ids are positive.
pub type UserId = i64;

/// A titled event on a single date, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub user_id: UserId,
    /// Naive calendar timestamp; compared without any timezone handling.
    pub date: NaiveDateTime,
    pub title: String,
}

/// Check the fields a caller supplies for a new or updated event.
///
/// `date` is `None` when the caller could not produce a calendar date.
pub fn validate_fields(
    user_id: UserId,
    date: Option<NaiveDateTime>,
    title: &str,
) -> CalendarResult<NaiveDateTime> {
    if user_id <= 0 {
        return Err(CalendarError::InvalidUserId);
    }

    if title.is_empty() {
        return Err(CalendarError::EmptyTitle);
    }

    date.ok_or(CalendarError::InvalidDate)
}
