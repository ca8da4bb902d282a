//! Temporal expression parser.
//!
//! Pulls an implied date and/or wall-clock time out of a task description
//! such as "tomorrow at 15:30 team sync" and returns the description with
//! the temporal words removed.
//!
//! Rules run in a fixed order of phases:
//!
//! 1. relative days (`day after tomorrow`, `tomorrow`, `today`), first hit wins
//! 2. `next week <weekday>`, overwrites any date so far
//! 3. `this week <weekday>`, overwrites any date so far
//! 4. `<hour> o'clock [<minute> minutes]` with an optional morning/afternoon marker
//! 5. bare `H:MM`, overwrites any time so far
//!
//! Only when none of these hit does the fallback path try an ISO
//! `YYYY-MM-DD[ HH:MM]` and then a bare `HH:MM` on the untouched input.
//! Primary results that are not strictly in the future are discarded;
//! fallback results are returned as found.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::rules::{
    Rule, BARE_TIME_RULE, CLOCK_TIME_RULE, COLON_TIME_RULE, ISO_DATETIME_RULE, NEXT_WEEK_RULE,
    RELATIVE_DAY_RULES, THIS_WEEK_RULE,
};
use crate::core::{combine, format_date, format_time, Schedule};

/// Result of extracting temporal information from a task description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// The input with every matched temporal phrase removed.
    pub cleaned_text: String,
    /// Extracted calendar date.
    pub date: Option<NaiveDate>,
    /// Extracted wall-clock time.
    pub time: Option<NaiveTime>,
}

impl ParseResult {
    /// True when neither a date nor a time was extracted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none()
    }

    /// The date as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_iso(&self) -> Option<String> {
        self.date.map(format_date)
    }

    /// The time as `HH:MM`.
    #[must_use]
    pub fn time_hhmm(&self) -> Option<String> {
        self.time.map(format_time)
    }
}

impl From<&ParseResult> for Schedule {
    fn from(result: &ParseResult) -> Self {
        Self::new(result.date, result.time)
    }
}

/// Working text and partial result threaded through the phases.
#[derive(Debug, Clone)]
struct Extraction {
    text: String,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    matched: bool,
}

impl Extraction {
    fn new(raw: &str) -> Self {
        Self {
            text: raw.to_string(),
            date: None,
            time: None,
            matched: false,
        }
    }

    /// Run `rule` against the working text, stripping its match on success.
    fn apply<R: Rule>(self, rule: &R, today: NaiveDate) -> (Self, Option<R::Value>) {
        match rule.find(&self.text, today) {
            Some(hit) => {
                let text = hit.strip(&self.text);
                (
                    Self {
                        text,
                        matched: true,
                        ..self
                    },
                    Some(hit.value),
                )
            },
            None => (self, None),
        }
    }

    fn into_result(self) -> ParseResult {
        ParseResult {
            cleaned_text: self.text.trim().to_string(),
            date: self.date,
            time: self.time,
        }
    }
}

/// Extract a date and/or time from `raw`, relative to the local instant `now`.
///
/// Never fails: without a match the result carries the trimmed input and no
/// date or time.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use quickdue::features::nlp::parse;
///
/// let now = NaiveDate::from_ymd_opt(2024, 6, 10)
///     .unwrap()
///     .and_hms_opt(10, 0, 0)
///     .unwrap();
///
/// let result = parse("tomorrow 15:30 meeting", now);
/// assert_eq!(result.cleaned_text, "meeting");
/// assert_eq!(result.date_iso().as_deref(), Some("2024-06-11"));
/// assert_eq!(result.time_hhmm().as_deref(), Some("15:30"));
/// ```
#[must_use]
pub fn parse(raw: &str, now: NaiveDateTime) -> ParseResult {
    let today = now.date();

    let state = Extraction::new(raw);
    let state = relative_day_phase(state, today);
    let state = weekday_phase(state, &*NEXT_WEEK_RULE, today);
    let state = weekday_phase(state, &*THIS_WEEK_RULE, today);
    let state = time_phase(state, &*CLOCK_TIME_RULE, today);
    let state = time_phase(state, &*COLON_TIME_RULE, today);

    if !state.matched {
        return fallback(raw, today);
    }

    validate(state, now).into_result()
}

/// First relative-day keyword present wins; later ones are not considered.
fn relative_day_phase(state: Extraction, today: NaiveDate) -> Extraction {
    for rule in RELATIVE_DAY_RULES.iter() {
        if let (next, Some(date)) = state.clone().apply(rule, today) {
            return Extraction {
                date: Some(date),
                ..next
            };
        }
    }
    state
}

/// Always attempted; a hit replaces whatever date is already set.
fn weekday_phase<R>(state: Extraction, rule: &R, today: NaiveDate) -> Extraction
where
    R: Rule<Value = NaiveDate>,
{
    match state.apply(rule, today) {
        (next, Some(date)) => Extraction {
            date: Some(date),
            ..next
        },
        (next, None) => next,
    }
}

/// Always attempted; a hit replaces whatever time is already set.
fn time_phase<R>(state: Extraction, rule: &R, today: NaiveDate) -> Extraction
where
    R: Rule<Value = NaiveTime>,
{
    match state.apply(rule, today) {
        (next, Some(time)) => Extraction {
            time: Some(time),
            ..next
        },
        (next, None) => next,
    }
}

/// Drop date and time together unless date+time is strictly after `now`.
///
/// A time without a date is kept as is.
fn validate(state: Extraction, now: NaiveDateTime) -> Extraction {
    let expired = state
        .date
        .is_some_and(|date| combine(date, state.time) <= now);
    if expired {
        Extraction {
            date: None,
            time: None,
            ..state
        }
    } else {
        state
    }
}

/// ISO date-time, then bare time, both on the original input.
///
/// Results are returned without the future-only check.
fn fallback(raw: &str, today: NaiveDate) -> ParseResult {
    if let Some(hit) = ISO_DATETIME_RULE.find(raw, today) {
        let cleaned_text = hit.strip(raw).trim().to_string();
        let (date, time) = hit.value;
        return ParseResult {
            cleaned_text,
            date: Some(date),
            time,
        };
    }

    if let Some(hit) = BARE_TIME_RULE.find(raw, today) {
        return ParseResult {
            cleaned_text: hit.strip(raw).trim().to_string(),
            date: None,
            time: Some(hit.value),
        };
    }

    ParseResult {
        cleaned_text: raw.trim().to_string(),
        ..ParseResult::default()
    }
}
