//! Shared traits for scheduled items.

use chrono::{NaiveDate, NaiveDateTime};

/// Trait for items that may carry a deadline.
///
/// All checks take the reference instant explicitly so callers decide what
/// "now" means.
pub trait Schedulable {
    /// The deadline, if any.
    fn deadline(&self) -> Option<NaiveDateTime>;

    /// Whether the item has been completed.
    fn is_completed(&self) -> bool;

    /// Open and past its deadline.
    fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.is_completed() && self.deadline().is_some_and(|d| d < now)
    }

    /// Deadline falls on `date`.
    fn is_due_on(&self, date: NaiveDate) -> bool {
        self.deadline().is_some_and(|d| d.date() == date)
    }

    /// Deadline falls in `[start, end)`.
    fn is_due_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.deadline().is_some_and(|d| d >= start && d < end)
    }
}
