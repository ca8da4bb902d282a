//! Deadline assembly at commit time.
//!
//! Combines what the temporal parser extracted with the date/time the user
//! set explicitly (the `--date`/`--time` flags).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::datetime::combine;

/// A date and time pair, either of which may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Calendar date.
    pub date: Option<NaiveDate>,
    /// Wall-clock time.
    pub time: Option<NaiveTime>,
}

impl Schedule {
    /// Create a schedule from its parts.
    #[must_use]
    pub const fn new(date: Option<NaiveDate>, time: Option<NaiveTime>) -> Self {
        Self { date, time }
    }
}

/// Build the deadline passed to task creation.
///
/// - A parsed date wins outright, with the parsed time or midnight.
/// - Otherwise a manual date is used, with the parsed time, else the manual
///   time, else midnight.
/// - Without any date there is no deadline; a lone time is dropped.
#[must_use]
pub fn assemble_deadline(parsed: Schedule, manual: Schedule) -> Option<NaiveDateTime> {
    if let Some(date) = parsed.date {
        return Some(combine(date, parsed.time));
    }
    manual
        .date
        .map(|date| combine(date, parsed.time.or(manual.time)))
}
