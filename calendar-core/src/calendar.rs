//! Calendar operations: input validation on top of the event store.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::date_range::DateRange;
use crate::error::{CalendarError, CalendarResult};
use crate::event::{Event, EventId, UserId, validate_fields};
use crate::store::EventStore;

/// Entry point for the transport layer. All validation happens here, before
/// the store is touched.
#[derive(Debug, Default)]
pub struct Calendar {
    store: EventStore,
}

impl Calendar {
    pub fn new() -> Self {
        Calendar {
            store: EventStore::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &EventStore {
        &self.store
    }

    /// Create an event for `user_id`.
    ///
    /// `date` is `None` when the caller could not parse one.
    pub fn create_event(
        &self,
        user_id: UserId,
        date: Option<NaiveDateTime>,
        title: &str,
    ) -> CalendarResult<Event> {
        let date = validate_fields(user_id, date, title).inspect_err(log_rejected)?;
        Ok(self.store.create(user_id, date, title.to_string()))
    }

    /// Change the date and title of an event owned by `user_id`.
    pub fn update_event(
        &self,
        id: EventId,
        user_id: UserId,
        date: Option<NaiveDateTime>,
        title: &str,
    ) -> CalendarResult<Event> {
        let date = validate_fields(user_id, date, title).inspect_err(log_rejected)?;
        self.store.update(id, user_id, date, title.to_string())
    }

    pub fn delete_event(&self, id: EventId, user_id: UserId) -> CalendarResult<()> {
        if user_id <= 0 {
            log_rejected(&CalendarError::InvalidUserId);
            return Err(CalendarError::InvalidUserId);
        }
        // Store ids start at 1
        if id <= 0 {
            return Err(CalendarError::NotFound);
        }
        self.store.delete(id, user_id)
    }

    pub fn events_for_day(
        &self,
        user_id: UserId,
        reference: NaiveDate,
    ) -> CalendarResult<Vec<Event>> {
        self.events_in(user_id, DateRange::day(reference)?)
    }

    /// Rolling seven days from `reference`.
    pub fn events_for_week(
        &self,
        user_id: UserId,
        reference: NaiveDate,
    ) -> CalendarResult<Vec<Event>> {
        self.events_in(user_id, DateRange::week(reference)?)
    }

    pub fn events_for_month(
        &self,
        user_id: UserId,
        reference: NaiveDate,
    ) -> CalendarResult<Vec<Event>> {
        self.events_in(user_id, DateRange::month(reference)?)
    }

    fn events_in(&self, user_id: UserId, range: DateRange) -> CalendarResult<Vec<Event>> {
        debug!(user_id, start = %range.start, end = %range.end, "querying events");
        self.store.query_range(user_id, &range)
    }
}

fn log_rejected(err: &CalendarError) {
    debug!(error = %err, "rejected event input");
}
