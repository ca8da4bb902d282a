//! Date and time helpers.
//!
//! Calendar arithmetic shared by the temporal parser, deadline assembly and
//! statistics, plus the strict formats accepted by CLI flags. Everything works
//! on local wall-clock values (`NaiveDate`, `NaiveTime`, `NaiveDateTime`).

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Format used for dates in output and CLI flags.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for wall-clock times in output and CLI flags.
pub const TIME_FORMAT: &str = "%H:%M";

/// Current local wall-clock instant.
#[must_use]
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Midnight, the time used when a date has no explicit time.
#[must_use]
pub fn midnight() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default()
}

/// Combine a date with an optional time, falling back to midnight.
#[must_use]
pub fn combine(date: NaiveDate, time: Option<NaiveTime>) -> NaiveDateTime {
    date.and_time(time.unwrap_or_else(midnight))
}

/// Add a (possibly negative) number of days, `None` on calendar overflow.
#[must_use]
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

/// Days from `from` forward to the next `target` weekday, in `0..7`.
///
/// Weekdays are Sunday-indexed, so the result is `(target - from + 7) % 7`.
#[must_use]
pub fn days_until_weekday(from: Weekday, target: Weekday) -> i64 {
    let from = i64::from(from.num_days_from_sunday());
    let target = i64::from(target.num_days_from_sunday());
    (target - from + 7) % 7
}

/// Parse an English weekday name or abbreviation (case-insensitive).
#[must_use]
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "sunday" | "sun" => Some(Weekday::Sun),
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        _ => None,
    }
}

/// Format a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a time as `HH:MM`.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Format a deadline as `YYYY-MM-DD HH:MM`.
#[must_use]
pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Parse a `YYYY-MM-DD` date flag.
///
/// # Errors
///
/// Returns a message suitable for clap when the value is not a valid date.
pub fn parse_date_arg(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD, got '{input}': {e}"))
}

/// Parse an `HH:MM` time flag.
///
/// # Errors
///
/// Returns a message suitable for clap when the value is not a valid time.
pub fn parse_time_arg(input: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT)
        .map_err(|e| format!("expected HH:MM, got '{input}': {e}"))
}

/// Parse a date-time flag.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM` and either of
/// the latter two with seconds. A bare date means midnight.
///
/// # Errors
///
/// Returns a message suitable for clap when no format matches.
pub fn parse_datetime_arg(input: &str) -> Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
    ];
    let input = input.trim();

    for format in FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(value);
        }
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map(|date| combine(date, None))
        .map_err(|_| format!("expected YYYY-MM-DD[ HH:MM], got '{input}'"))
}
