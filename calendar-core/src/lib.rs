//! Core of the calendar service.
//!
//! - `store` holds every event in memory and answers range queries
//! - `date_range` derives day, week and month windows
//! - `calendar` validates input and is what the HTTP layer talks to

pub mod calendar;
pub mod date_range;
pub mod error;
pub mod event;
pub mod store;

pub use calendar::Calendar;
pub use date_range::{DateRange, parse_date};
pub use error::{CalendarError, CalendarResult};
pub use event::{Event, EventId, UserId};
pub use store::EventStore;
