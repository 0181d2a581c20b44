//! Date ranges for filtering events.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{CalendarError, CalendarResult};

/// Format accepted for dates coming in from clients.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// The 24 hours starting at midnight of `reference`.
    pub fn day(reference: NaiveDate) -> CalendarResult<Self> {
        Self::from_midnight(reference, Duration::days(1))
    }

    /// Rolling 7-day window starting at midnight of `reference`.
    /// This is not a calendar (Mon-Sun) week.
    pub fn week(reference: NaiveDate) -> CalendarResult<Self> {
        Self::from_midnight(reference, Duration::days(7))
    }

    /// From the first day of `reference`'s month up to the first day of the next month.
    pub fn month(reference: NaiveDate) -> CalendarResult<Self> {
        let first = reference
            .with_day(1)
            .ok_or(CalendarError::InvalidDate)?;
        let next_first = first
            .checked_add_months(Months::new(1))
            .ok_or(CalendarError::InvalidDate)?;

        Ok(DateRange {
            start: first.and_time(NaiveTime::MIN),
            end: next_first.and_time(NaiveTime::MIN),
        })
    }

    /// Inclusive start, exclusive end.
    pub fn contains(&self, date: &NaiveDateTime) -> bool {
        self.start <= *date && *date < self.end
    }

    fn from_midnight(reference: NaiveDate, length: Duration) -> CalendarResult<Self> {
        let start = reference.and_time(NaiveTime::MIN);
        let end = start
            .checked_add_signed(length)
            .ok_or(CalendarError::InvalidDate)?;
        Ok(DateRange { start, end })
    }
}

/// Parse a YYYY-MM-DD string.
pub fn parse_date(s: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| CalendarError::InvalidDate)
}
