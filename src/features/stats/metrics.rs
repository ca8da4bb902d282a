//! Metric calculations for statistics.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::{add_days, combine, Schedulable};
use crate::tasks::{CategoryCount, Task};

/// Rounded percentage, 0 when `whole` is 0.
fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part * 200 + whole) / (whole * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Overall completion summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// All tasks
    pub total: usize,
    /// Completed tasks
    pub completed: usize,
    /// Open tasks
    pub pending: usize,
    /// Open tasks past their deadline
    pub overdue: usize,
    /// Completed / total, rounded percent
    pub completion_rate: u32,
}

impl TaskSummary {
    /// Calculate the summary at `now`.
    #[must_use]
    pub fn calculate(tasks: &[Task], now: NaiveDateTime) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let overdue = tasks.iter().filter(|t| t.is_overdue(now)).count();

        Self {
            total,
            completed,
            pending: total - completed,
            overdue,
            completion_rate: percent(completed, total),
        }
    }
}

/// Reporting window, each starting at a calendar boundary before `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Since midnight today.
    #[default]
    Day,
    /// Since midnight on the most recent Sunday.
    Week,
    /// Since the first of the month.
    Month,
}

impl Period {
    /// Start of the period containing `now`.
    #[must_use]
    pub fn start(self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date();
        let first: NaiveDate = match self {
            Self::Day => today,
            Self::Week => add_days(today, -i64::from(today.weekday().num_days_from_sunday()))
                .unwrap_or(today),
            Self::Month => today.with_day(1).unwrap_or(today),
        };
        combine(first, None)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        })
    }
}

/// Completed and failed tasks within a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodReport {
    /// Reporting window
    pub period: Period,
    /// Window start
    pub start: NaiveDateTime,
    /// Tasks created, completed or due inside the window
    pub total: usize,
    /// Completed inside the window
    pub completed: Vec<Task>,
    /// Open with a deadline that fell inside the window and has passed
    pub failed: Vec<Task>,
    /// Completed / total, rounded percent
    pub success_rate: u32,
}

impl PeriodReport {
    /// Build the report for `period` at `now`.
    #[must_use]
    pub fn calculate(tasks: &[Task], period: Period, now: NaiveDateTime) -> Self {
        let start = period.start(now);
        let after_start = |value: Option<NaiveDateTime>| value.is_some_and(|v| v >= start);

        let in_period: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.created_at >= start || after_start(t.completed_at) || after_start(t.deadline))
            .collect();

        let completed: Vec<Task> = in_period
            .iter()
            .filter(|t| t.completed && after_start(t.completed_at))
            .map(|t| (*t).clone())
            .collect();

        let failed: Vec<Task> = in_period
            .iter()
            .filter(|t| !t.completed && t.is_due_between(start, now))
            .map(|t| (*t).clone())
            .collect();

        Self {
            period,
            start,
            total: in_period.len(),
            success_rate: percent(completed.len(), in_period.len()),
            completed,
            failed,
        }
    }
}

/// Tasks whose deadline falls on `now`'s calendar date.
#[must_use]
pub fn todays_tasks(tasks: &[Task], now: NaiveDateTime) -> Vec<Task> {
    let today = now.date();
    tasks.iter().filter(|t| t.is_due_on(today)).cloned().collect()
}

/// Pending tasks per configured category, in configuration order.
#[must_use]
pub fn category_counts(tasks: &[Task], categories: &[String]) -> Vec<CategoryCount> {
    categories
        .iter()
        .map(|name| CategoryCount {
            name: name.clone(),
            pending: tasks
                .iter()
                .filter(|t| !t.completed && t.category.eq_ignore_ascii_case(name))
                .count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::Priority;

    fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    /// Monday 2024-06-10 10:00.
    fn now() -> NaiveDateTime {
        at(6, 10, 10)
    }

    fn task(id: i64, category: &str, created_at: NaiveDateTime) -> Task {
        Task {
            id,
            text: format!("task {id}"),
            completed: false,
            priority: Priority::Medium,
            category: category.to_string(),
            deadline: None,
            created_at,
            completed_at: None,
        }
    }

    fn sample() -> Vec<Task> {
        let mut done_today = task(1, "Work", at(6, 3, 9));
        done_today.completed = true;
        done_today.completed_at = Some(at(6, 10, 8));

        let mut overdue = task(2, "Work", at(6, 1, 9));
        overdue.deadline = Some(at(6, 10, 9));

        let mut upcoming = task(3, "Health", at(6, 10, 9));
        upcoming.deadline = Some(at(6, 10, 18));

        let mut old_done = task(4, "Personal", at(5, 1, 9));
        old_done.completed = true;
        old_done.completed_at = Some(at(5, 2, 9));

        vec![done_today, overdue, upcoming, old_done]
    }

    #[test]
    fn test_percent_rounds_half_up() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(4, 4), 100);
    }

    #[test]
    fn test_summary() {
        let summary = TaskSummary::calculate(&sample(), now());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.overdue, 1);
        assert_eq!(summary.completion_rate, 50);
    }

    #[test]
    fn test_summary_empty() {
        let summary = TaskSummary::calculate(&[], now());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.completion_rate, 0);
    }

    #[test]
    fn test_period_starts() {
        assert_eq!(Period::Day.start(now()), at(6, 10, 0));
        assert_eq!(Period::Week.start(now()), at(6, 9, 0));
        assert_eq!(Period::Month.start(now()), at(6, 1, 0));
        // Sunday is its own week start.
        assert_eq!(Period::Week.start(at(6, 9, 15)), at(6, 9, 0));
    }

    #[test]
    fn test_day_report() {
        let report = PeriodReport::calculate(&sample(), Period::Day, now());
        // Tasks 1 (completed today), 2 (due today) and 3 (created today).
        assert_eq!(report.total, 3);
        assert_eq!(report.completed.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(report.failed.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(report.success_rate, 33);
    }

    #[test]
    fn test_month_report_excludes_older_tasks() {
        let report = PeriodReport::calculate(&sample(), Period::Month, now());
        assert_eq!(report.total, 3);
        assert!(report.completed.iter().all(|t| t.id != 4));
    }

    #[test]
    fn test_todays_tasks() {
        let ids: Vec<_> = todays_tasks(&sample(), now()).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_category_counts() {
        let categories = vec!["Work".to_string(), "Health".to_string(), "Learning".to_string()];
        let counts = category_counts(&sample(), &categories);
        assert_eq!(
            counts,
            vec![
                CategoryCount { name: "Work".to_string(), pending: 1 },
                CategoryCount { name: "Health".to_string(), pending: 1 },
                CategoryCount { name: "Learning".to_string(), pending: 0 },
            ]
        );
    }

    #[test]
    fn test_period_display() {
        assert_eq!(Period::Week.to_string(), "week");
    }
}
