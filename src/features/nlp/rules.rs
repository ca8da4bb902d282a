//! Rule table for temporal extraction.
//!
//! Each rule finds its trigger in the current working text and reports the
//! value it extracted together with the byte spans to strip. Rules never
//! mutate text themselves; the parser threads the stripped text from one
//! phase to the next.

use std::ops::Range;

use chrono::{Datelike, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::core::{add_days, days_until_weekday, weekday_from_name};

/// Optional trailing particle consumed with a trigger ("tomorrow at", "friday until").
const PARTICLE: &str = r"(?:\s+(?:until|from|at)\b)?";

/// English weekday names and abbreviations, longest alternatives first.
const WEEKDAY: &str = r"(?P<weekday>sunday|monday|tuesday|wednesday|thursday|friday|saturday|sun|mon|tues|tue|wed|thurs|thur|thu|fri|sat)\b";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("Invalid temporal regex {pattern}: {e}"))
}

/// A successful rule hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte ranges of the matched text, in ascending order.
    pub spans: Vec<Range<usize>>,
}

impl<T> RuleMatch<T> {
    fn single(value: T, span: Range<usize>) -> Self {
        Self {
            value,
            spans: vec![span],
        }
    }

    /// Remove every matched span from `text`.
    ///
    /// The text on either side of a removed span is joined with one space, or
    /// with nothing when the span sat at the start or end.
    #[must_use]
    pub fn strip(&self, text: &str) -> String {
        let mut out = text.to_string();
        for span in self.spans.iter().rev() {
            let left = out[..span.start].trim_end();
            let right = out[span.end..].trim_start();
            out = if left.is_empty() || right.is_empty() {
                format!("{left}{right}")
            } else {
                format!("{left} {right}")
            };
        }
        out
    }
}

/// A matching strategy evaluated against the working text.
pub trait Rule {
    /// What a hit produces.
    type Value;

    /// Find this rule's trigger in `text`, resolving relative values against `today`.
    fn find(&self, text: &str, today: NaiveDate) -> Option<RuleMatch<Self::Value>>;
}

/// "today", "tomorrow", "day after tomorrow".
#[derive(Debug)]
pub struct RelativeDayRule {
    offset_days: i64,
    pattern: Regex,
}

impl RelativeDayRule {
    fn new(keyword: &str, offset_days: i64) -> Self {
        Self {
            offset_days,
            pattern: compile(&format!(r"(?i)\b{keyword}\b{PARTICLE}")),
        }
    }

}

impl Rule for RelativeDayRule {
    type Value = NaiveDate;


    /// Every occurrence of the keyword is reported so none survives stripping.
    fn find(&self, text: &str, today: NaiveDate) -> Option<RuleMatch<NaiveDate>> {
        let spans: Vec<_> = self.pattern.find_iter(text).map(|m| m.range()).collect();
        if spans.is_empty() {
            return None;
        }
        let value = add_days(today, self.offset_days)?;
        Some(RuleMatch { value, spans })
    }
}

/// Which calendar week a weekday rule targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekScope {
    /// "next week friday": always in the following week.
    Next,
    /// "this week friday": the coming occurrence, never today.
    This,
}

impl WeekScope {
    /// Offset in days from `today` to `target` for this scope.
    #[must_use]
    pub fn offset(self, today: chrono::Weekday, target: chrono::Weekday) -> i64 {
        let base = days_until_weekday(today, target);
        match self {
            Self::Next => 7 + base,
            Self::This if base == 0 => 7,
            Self::This => base,
        }
    }
}

/// "next week <weekday>" and "this week <weekday>".
#[derive(Debug)]
pub struct WeekdayRule {
    scope: WeekScope,
    pattern: Regex,
}

impl WeekdayRule {
    fn new(lead: &str, scope: WeekScope) -> Self {
        Self {
            scope,
            pattern: compile(&format!(r"(?i)\b{lead}\s+week\s+{WEEKDAY}{PARTICLE}")),
        }
    }
}

impl Rule for WeekdayRule {
    type Value = NaiveDate;


    fn find(&self, text: &str, today: NaiveDate) -> Option<RuleMatch<NaiveDate>> {
        let caps = self.pattern.captures(text)?;
        let target = weekday_from_name(caps.name("weekday")?.as_str())?;
        let value = add_days(today, self.scope.offset(today.weekday(), target))?;
        Some(RuleMatch::single(value, caps.get(0)?.range()))
    }
}

/// "3 o'clock", "afternoon 3 o'clock 30 minutes", "am 12 o'clock".
#[derive(Debug)]
pub struct ClockTimeRule {
    pattern: Regex,
}

impl ClockTimeRule {
    fn new() -> Self {
        Self {
            pattern: compile(&format!(
                r"(?i)(?:\b(?P<marker>morning|afternoon|am|pm)\s+)?\b(?P<hour>\d{{1,2}})\s*o['’]?clock\b(?:\s*(?P<minute>\d{{1,2}})\s*min(?:ute)?s?\b)?{PARTICLE}"
            )),
        }
    }
}

impl Rule for ClockTimeRule {
    type Value = NaiveTime;


    /// Candidates with an impossible hour or minute are skipped.
    fn find(&self, text: &str, _today: NaiveDate) -> Option<RuleMatch<NaiveTime>> {
        self.pattern.captures_iter(text).find_map(|caps| {
            let value = clock_time(&caps)?;
            Some(RuleMatch::single(value, caps.get(0)?.range()))
        })
    }
}

fn clock_time(caps: &Captures<'_>) -> Option<NaiveTime> {
    let mut hour: u32 = caps.name("hour")?.as_str().parse().ok()?;
    let minute: u32 = match caps.name("minute") {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    match caps.name("marker").map(|m| m.as_str().to_lowercase()).as_deref() {
        Some("afternoon" | "pm") if hour < 12 => hour += 12,
        Some("morning" | "am") if hour == 12 => hour = 0,
        _ => {},
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Bare `H:MM` / `HH:MM`.
///
/// A two-digit time glued to an ISO date (`2024-06-09 08:00`) is left for the
/// fallback date-time rule.
#[derive(Debug)]
pub struct ColonTimeRule {
    pattern: Regex,
}

impl ColonTimeRule {
    fn new() -> Self {
        Self {
            pattern: compile(
                r"(?:(?P<iso>\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2})|\b(?P<hour>\d{1,2}):(?P<minute>\d{2}))\b",
            ),
        }
    }
}

impl Rule for ColonTimeRule {
    type Value = NaiveTime;


    fn find(&self, text: &str, _today: NaiveDate) -> Option<RuleMatch<NaiveTime>> {
        self.pattern
            .captures_iter(text)
            .filter(|caps| caps.name("iso").is_none())
            .find_map(|caps| {
                let span = caps.get(0)?.range();
                if has_seconds(text, span.end) {
                    return None;
                }
                let value = hour_minute(&caps)?;
                Some(RuleMatch::single(value, span))
            })
    }
}

/// `text[end..]` continues with `:<digit>`, i.e. the match is the front of `H:MM:SS`.
fn has_seconds(text: &str, end: usize) -> bool {
    let mut rest = text[end..].chars();
    rest.next() == Some(':') && rest.next().is_some_and(|c| c.is_ascii_digit())
}

fn hour_minute(caps: &Captures<'_>) -> Option<NaiveTime> {
    let hour: u32 = caps.name("hour")?.as_str().parse().ok()?;
    let minute: u32 = caps.name("minute")?.as_str().parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Fallback: `YYYY-MM-DD` with an optional ` HH:MM` / `THH:MM`.
#[derive(Debug)]
pub struct IsoDateTimeRule {
    pattern: Regex,
}

impl IsoDateTimeRule {
    fn new() -> Self {
        Self {
            pattern: compile(&format!(
                r"(?i)(?P<date>\d{{4}}-\d{{2}}-\d{{2}})(?:[ T](?P<hour>\d{{2}}):(?P<minute>\d{{2}}))?{PARTICLE}"
            )),
        }
    }
}

impl Rule for IsoDateTimeRule {
    type Value = (NaiveDate, Option<NaiveTime>);


    /// Invalid dates or times are skipped in favor of a later stamp.
    fn find(&self, text: &str, _today: NaiveDate) -> Option<RuleMatch<Self::Value>> {
        self.pattern.captures_iter(text).find_map(|caps| {
            let date = NaiveDate::parse_from_str(caps.name("date")?.as_str(), "%Y-%m-%d").ok()?;
            let time = if caps.name("hour").is_some() {
                Some(hour_minute(&caps)?)
            } else {
                None
            };
            Some(RuleMatch::single((date, time), caps.get(0)?.range()))
        })
    }
}

/// Fallback: bare two-digit `HH:MM`.
#[derive(Debug)]
pub struct BareTimeRule {
    pattern: Regex,
}

impl BareTimeRule {
    fn new() -> Self {
        Self {
            pattern: compile(&format!(
                r"(?i)\b(?P<hour>\d{{2}}):(?P<minute>\d{{2}})\b{PARTICLE}"
            )),
        }
    }
}

impl Rule for BareTimeRule {
    type Value = NaiveTime;


    fn find(&self, text: &str, _today: NaiveDate) -> Option<RuleMatch<NaiveTime>> {
        self.pattern.captures_iter(text).find_map(|caps| {
            let span = caps.get(0)?.range();
            if has_seconds(text, span.end) {
                return None;
            }
            let value = hour_minute(&caps)?;
            Some(RuleMatch::single(value, span))
        })
    }
}

/// Relative-day rules in evaluation order; the first hit wins.
///
/// "day after tomorrow" precedes "tomorrow" because it contains it.
pub static RELATIVE_DAY_RULES: Lazy<[RelativeDayRule; 3]> = Lazy::new(|| {
    [
        RelativeDayRule::new(r"day\s+after\s+tomorrow", 2),
        RelativeDayRule::new("tomorrow", 1),
        RelativeDayRule::new("today", 0),
    ]
});

pub static NEXT_WEEK_RULE: Lazy<WeekdayRule> =
    Lazy::new(|| WeekdayRule::new("next", WeekScope::Next));

pub static THIS_WEEK_RULE: Lazy<WeekdayRule> =
    Lazy::new(|| WeekdayRule::new("this", WeekScope::This));

pub static CLOCK_TIME_RULE: Lazy<ClockTimeRule> = Lazy::new(ClockTimeRule::new);

pub static COLON_TIME_RULE: Lazy<ColonTimeRule> = Lazy::new(ColonTimeRule::new);

pub static ISO_DATETIME_RULE: Lazy<IsoDateTimeRule> = Lazy::new(IsoDateTimeRule::new);

pub static BARE_TIME_RULE: Lazy<BareTimeRule> = Lazy::new(BareTimeRule::new);

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_strip_joins_with_single_space() {
        let hit = RuleMatch::single((), 5..13);
        assert_eq!(hit.strip("call tomorrow mom"), "call mom");

        let hit = RuleMatch::single((), 0..8);
        assert_eq!(hit.strip("tomorrow   mom"), "mom");

        let hit = RuleMatch::single((), 5..13);
        assert_eq!(hit.strip("call tomorrow"), "call");
    }

    #[test]
    fn test_strip_multiple_spans() {
        let hit = RuleMatch {
            value: (),
            spans: vec![0..5, 10..15],
        };
        assert_eq!(hit.strip("today and today"), "and");
    }

    #[test]
    fn test_relative_day_rules_order() {
        let dates: Vec<_> = RELATIVE_DAY_RULES
            .iter()
            .zip(["day after tomorrow", "tomorrow", "today"])
            .map(|(rule, text)| rule.find(text, monday()).unwrap().value)
            .collect();
        let expected: Vec<_> = [12, 11, 10]
            .into_iter()
            .map(|d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap())
            .collect();
        assert_eq!(dates, expected);
        assert!(RELATIVE_DAY_RULES[0].find("tomorrow", monday()).is_none());
    }

    #[test]
    fn test_relative_day_consumes_particle() {
        let rule = &RELATIVE_DAY_RULES[1];
        let hit = rule.find("report tomorrow until noon", monday()).unwrap();
        assert_eq!(hit.value, NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());
        assert_eq!(hit.strip("report tomorrow until noon"), "report noon");
    }

    #[test]
    fn test_relative_day_requires_word_boundary() {
        let rule = &RELATIVE_DAY_RULES[2];
        assert!(rule.find("todays news", monday()).is_none());
        assert!(rule.find("TODAY", monday()).is_some());
    }

    #[test]
    fn test_week_scope_offsets() {
        use chrono::Weekday::{Fri, Mon, Sun};
        assert_eq!(WeekScope::Next.offset(Mon, Fri), 11);
        assert_eq!(WeekScope::Next.offset(Mon, Mon), 7);
        assert_eq!(WeekScope::Next.offset(Mon, Sun), 13);
        assert_eq!(WeekScope::This.offset(Mon, Fri), 4);
        assert_eq!(WeekScope::This.offset(Mon, Mon), 7);
        assert_eq!(WeekScope::This.offset(Fri, Mon), 3);
    }

    #[test]
    fn test_weekday_rule_abbreviation_and_particle() {
        let hit = NEXT_WEEK_RULE.find("demo next week fri at 3", monday()).unwrap();
        assert_eq!(hit.value, NaiveDate::from_ymd_opt(2024, 6, 21).unwrap());
        assert_eq!(hit.strip("demo next week fri at 3"), "demo 3");
    }

    #[test]
    fn test_weekday_rule_rejects_partial_words() {
        assert!(THIS_WEEK_RULE.find("this week fridays", monday()).is_none());
        assert!(THIS_WEEK_RULE.find("this friday", monday()).is_none());
    }

    #[test]
    fn test_clock_time_markers() {
        let rule = &*CLOCK_TIME_RULE;
        assert_eq!(rule.find("3 o'clock", monday()).unwrap().value, hm(3, 0));
        assert_eq!(rule.find("afternoon 3 o'clock", monday()).unwrap().value, hm(15, 0));
        assert_eq!(rule.find("pm 12 o'clock", monday()).unwrap().value, hm(12, 0));
        assert_eq!(rule.find("morning 12 o'clock", monday()).unwrap().value, hm(0, 0));
        assert_eq!(
            rule.find("pm 2 o'clock 45 minutes", monday()).unwrap().value,
            hm(14, 45)
        );
        assert_eq!(rule.find("7 oclock", monday()).unwrap().value, hm(7, 0));
    }

    #[test]
    fn test_clock_time_skips_invalid_candidate() {
        let text = "25 o'clock then 3 o'clock";
        let hit = CLOCK_TIME_RULE.find(text, monday()).unwrap();
        assert_eq!(hit.value, hm(3, 0));
        assert_eq!(hit.strip(text), "25 o'clock then");

        assert!(CLOCK_TIME_RULE.find("3 o'clock 75 min", monday()).is_none());
    }

    #[test]
    fn test_clock_time_requires_unit() {
        let rule = &*CLOCK_TIME_RULE;
        assert!(rule.find("buy 3 apples", monday()).is_none());
        assert!(rule.find("25 o'clock", monday()).is_none());
    }

    #[test]
    fn test_clock_time_minute_without_unit_is_left() {
        let text = "9 o'clock 30";
        let hit = CLOCK_TIME_RULE.find(text, monday()).unwrap();
        assert_eq!(hit.value, hm(9, 0));
        assert_eq!(hit.strip(text), "30");
    }

    #[test]
    fn test_colon_time() {
        let rule = &*COLON_TIME_RULE;
        assert_eq!(rule.find("call 9:05", monday()).unwrap().value, hm(9, 5));
        assert_eq!(rule.find("at 14:30 sharp", monday()).unwrap().value, hm(14, 30));
        assert!(rule.find("ratio 1:2", monday()).is_none());
    }

    #[test]
    fn test_colon_time_skips_invalid_candidates() {
        let hit = COLON_TIME_RULE.find("99:99 or 10:15", monday()).unwrap();
        assert_eq!(hit.value, hm(10, 15));
    }

    #[test]
    fn test_colon_time_ignores_seconds_stamp() {
        assert!(COLON_TIME_RULE.find("meet 10:30:45", monday()).is_none());

        let hit = COLON_TIME_RULE.find("10:30:45 or 11:15", monday()).unwrap();
        assert_eq!(hit.value, hm(11, 15));
    }

    #[test]
    fn test_colon_time_leaves_iso_datetime() {
        assert!(COLON_TIME_RULE.find("2024-06-09 08:00", monday()).is_none());
        assert!(COLON_TIME_RULE.find("2024-06-09T08:00", monday()).is_none());
        assert_eq!(
            COLON_TIME_RULE.find("2024-06-09 8:00", monday()).unwrap().value,
            hm(8, 0)
        );
    }

    #[test]
    fn test_iso_datetime_rule() {
        let hit = ISO_DATETIME_RULE.find("launch 2024-12-25T09:30 from", monday()).unwrap();
        assert_eq!(
            hit.value,
            (NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(), Some(hm(9, 30)))
        );
        assert_eq!(hit.strip("launch 2024-12-25T09:30 from"), "launch");

        let hit = ISO_DATETIME_RULE.find("2024-12-25", monday()).unwrap();
        assert_eq!(hit.value.1, None);

        assert!(ISO_DATETIME_RULE.find("2024-02-30", monday()).is_none());
    }

    #[test]
    fn test_iso_rule_skips_invalid_date() {
        let text = "2024-13-01 then 2024-06-20";
        let hit = ISO_DATETIME_RULE.find(text, monday()).unwrap();
        assert_eq!(hit.value, (NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(), None));
        assert_eq!(hit.strip(text), "2024-13-01 then");
    }

    #[test]
    fn test_bare_time_rule() {
        let hit = BARE_TIME_RULE.find("standup 09:15 at", monday()).unwrap();
        assert_eq!(hit.value, hm(9, 15));
        assert_eq!(hit.strip("standup 09:15 at"), "standup");
        assert!(BARE_TIME_RULE.find("9:15", monday()).is_none());
    }
}
