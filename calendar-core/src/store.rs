//! In-memory event storage.
//!
//! The event table and the per-user index live in one struct behind a single
//! read-write lock. Writes hold the lock for the whole mutation, so the two
//! structures are never observed out of sync.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use parking_lot::RwLock;
use tracing::debug;

use crate::date_range::DateRange;
use crate::error::{CalendarError, CalendarResult};
use crate::event::{Event, EventId, UserId};

#[derive(Debug)]
struct Inner {
    events: HashMap<EventId, Event>,
    /// Event ids per user, in creation order.
    user_events: HashMap<UserId, Vec<EventId>>,
    next_id: EventId,
}

impl Inner {
    /// Look up an event the caller owns. Absence and foreign ownership look the same.
    fn owned_mut(&mut self, id: EventId, user_id: UserId) -> CalendarResult<&mut Event> {
        match self.events.get_mut(&id) {
            Some(event) if event.user_id == user_id => Ok(event),
            _ => Err(CalendarError::NotFound),
        }
    }
}

/// Thread-safe store of all events. Share it through an `Arc`.
#[derive(Debug)]
pub struct EventStore {
    inner: RwLock<Inner>,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore {
    pub fn new() -> Self {
        EventStore {
            inner: RwLock::new(Inner {
                events: HashMap::new(),
                user_events: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Store a new event under the next sequential id.
    /// Inputs are trusted; validation belongs to the caller.
    pub fn create(&self, user_id: UserId, date: NaiveDateTime, title: String) -> Event {
        let mut inner = self.inner.write();

        let id = inner.next_id;
        inner.next_id += 1;

        let event = Event {
            id,
            user_id,
            date,
            title,
        };
        inner.events.insert(id, event.clone());
        inner.user_events.entry(user_id).or_default().push(id);

        debug!(event_id = id, user_id, "created event");
        event
    }

    /// Replace the date and title of an event owned by `user_id`.
    pub fn update(
        &self,
        id: EventId,
        user_id: UserId,
        date: NaiveDateTime,
        title: String,
    ) -> CalendarResult<Event> {
        let mut inner = self.inner.write();
        let event = inner.owned_mut(id, user_id)?;

        event.date = date;
        event.title = title;

        debug!(event_id = id, user_id, "updated event");
        Ok(event.clone())
    }

    /// Remove an event owned by `user_id` from both the table and the user index.
    pub fn delete(&self, id: EventId, user_id: UserId) -> CalendarResult<()> {
        let mut inner = self.inner.write();
        inner.owned_mut(id, user_id)?;
        inner.events.remove(&id);

        if let Some(ids) = inner.user_events.get_mut(&user_id) {
            if let Some(pos) = ids.iter().position(|&e| e == id) {
                ids.remove(pos);
            }
            // An emptied index is dropped so the user reads as unknown again
            if ids.is_empty() {
                inner.user_events.remove(&user_id);
            }
        }

        debug!(event_id = id, user_id, "deleted event");
        Ok(())
    }

    /// Events of `user_id` dated inside `range`, in creation order.
    ///
    /// Returns `NotFound` when the user owns no events at all. A user whose
    /// events all fall outside the range gets an empty list.
    pub fn query_range(&self, user_id: UserId, range: &DateRange) -> CalendarResult<Vec<Event>> {
        let inner = self.inner.read();
        let ids = inner
            .user_events
            .get(&user_id)
            .ok_or(CalendarError::NotFound)?;

        let events = ids
            .iter()
            .filter_map(|id| inner.events.get(id))
            .filter(|event| range.contains(&event.date))
            .cloned()
            .collect();

        Ok(events)
    }

    pub fn len(&self) -> usize {
        self.inner.read().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> DateRange {
        DateRange::day(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
    }

    fn titles(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_create_assigns_sequential_ids_across_users() {
        let store = EventStore::new();
        let a = store.create(1, at(2025, 1, 1, 9), "a".into());
        let b = store.create(2, at(2025, 1, 1, 9), "b".into());
        let c = store.create(1, at(2025, 1, 2, 9), "c".into());

        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_create_indexes_event_for_owner() {
        let store = EventStore::new();
        let created = store.create(1, at(2025, 3, 20, 15), "test".into());

        let inner = store.inner.read();
        assert_eq!(inner.events[&created.id].title, "test");
        assert_eq!(inner.user_events[&1], vec![created.id]);
    }

    #[test]
    fn test_update_changes_only_date_and_title() {
        let store = EventStore::new();
        let created = store.create(2, at(2025, 3, 20, 15), "original".into());

        let updated = store
            .update(created.id, 2, at(2025, 3, 20, 16), "updated".into())
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.user_id, 2);
        assert_eq!(updated.title, "updated");
        assert_eq!(updated.date, at(2025, 3, 20, 16));
    }

    #[test]
    fn test_update_foreign_or_missing_event_is_not_found() {
        let store = EventStore::new();
        let created = store.create(2, at(2025, 3, 20, 15), "original".into());

        let foreign = store.update(created.id, 99, at(2025, 3, 21, 0), "x".into());
        assert_eq!(foreign, Err(CalendarError::NotFound));

        let missing = store.update(333, 2, at(2025, 3, 21, 0), "x".into());
        assert_eq!(missing, Err(CalendarError::NotFound));

        // The rejected update left the event alone
        let events = store.query_range(2, &day(2025, 3, 20)).unwrap();
        assert_eq!(titles(&events), vec!["original"]);
    }

    #[test]
    fn test_delete_removes_from_table_and_index() {
        let store = EventStore::new();
        let created = store.create(1, at(2025, 3, 20, 15), "test".into());

        store.delete(created.id, 1).unwrap();

        assert!(store.is_empty());
        assert!(!store.inner.read().user_events.contains_key(&1));
        assert_eq!(store.delete(created.id, 1), Err(CalendarError::NotFound));
        assert_eq!(
            store.update(created.id, 1, at(2025, 3, 20, 15), "x".into()),
            Err(CalendarError::NotFound)
        );
    }

    #[test]
    fn test_delete_foreign_event_is_not_found() {
        let store = EventStore::new();
        let created = store.create(1, at(2025, 3, 20, 15), "test".into());

        assert_eq!(store.delete(created.id, 99), Err(CalendarError::NotFound));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_preserves_order_of_remaining_events() {
        let store = EventStore::new();
        for title in ["a", "b", "c", "d"] {
            store.create(5, at(2025, 6, 1, 10), title.into());
        }

        store.delete(2, 5).unwrap();

        let events = store.query_range(5, &day(2025, 6, 1)).unwrap();
        assert_eq!(titles(&events), vec!["a", "c", "d"]);
        assert_eq!(store.inner.read().user_events[&5], vec![1, 3, 4]);
    }

    #[test]
    fn test_query_range_is_half_open() {
        let store = EventStore::new();
        store.create(1, at(2025, 10, 30, 0), "at start".into());
        store.create(1, at(2025, 10, 31, 0), "at end".into());

        let events = store.query_range(1, &day(2025, 10, 30)).unwrap();
        assert_eq!(titles(&events), vec!["at start"]);
    }

    #[test]
    fn test_query_range_only_returns_callers_events() {
        let store = EventStore::new();
        store.create(1, at(2025, 10, 30, 9), "mine".into());
        store.create(2, at(2025, 10, 30, 9), "theirs".into());

        let events = store.query_range(1, &day(2025, 10, 30)).unwrap();
        assert_eq!(titles(&events), vec!["mine"]);
    }

    #[test]
    fn test_query_range_unknown_user_is_not_found() {
        let store = EventStore::new();
        store.create(1, at(2025, 10, 30, 9), "x".into());

        assert_eq!(store.query_range(3, &day(2025, 10, 30)), Err(CalendarError::NotFound));
    }

    #[test]
    fn test_query_range_known_user_outside_window_is_empty() {
        let store = EventStore::new();
        store.create(1, at(2025, 10, 30, 9), "x".into());

        assert_eq!(store.query_range(1, &day(2025, 11, 30)), Ok(vec![]));
    }

    #[test]
    fn test_query_range_after_last_delete_is_not_found() {
        let store = EventStore::new();
        let created = store.create(1, at(2025, 10, 30, 9), "x".into());
        store.delete(created.id, 1).unwrap();

        assert_eq!(store.query_range(1, &day(2025, 10, 30)), Err(CalendarError::NotFound));
    }

    #[test]
    fn test_concurrent_creates_get_unique_ids() {
        let store = EventStore::new();
        let threads = 8;
        let per_thread = 50;

        std::thread::scope(|s| {
            for t in 0..threads {
                let store = &store;
                s.spawn(move || {
                    for i in 0..per_thread {
                        store.create(t + 1, at(2025, 1, 1, 0), format!("{t}-{i}"));
                        let _ = store.query_range(t + 1, &day(2025, 1, 1));
                    }
                });
            }
        });

        let total = (threads * per_thread) as usize;
        assert_eq!(store.len(), total);

        let inner = store.inner.read();
        let ids: HashSet<EventId> = inner.events.keys().copied().collect();
        assert_eq!(ids, (1..=total as EventId).collect::<HashSet<_>>());

        for (user, ids) in &inner.user_events {
            assert_eq!(ids.len(), per_thread as usize);
            // Per-user index keeps creation order
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            assert!(ids.iter().all(|id| inner.events[id].user_id == *user));
        }
    }
}
