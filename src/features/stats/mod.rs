//! Task statistics.
//!
//! Computed on demand from the task list against an explicit `now`:
//! - Completion summary and overdue count
//! - Tasks due today
//! - Day/week/month period reports
//! - Pending counts per category

pub mod metrics;

pub use metrics::{category_counts, todays_tasks, Period, PeriodReport, TaskSummary};
