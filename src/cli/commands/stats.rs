//! Statistics command implementation.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::cli::args::OutputFormat;
use crate::error::QuickdueError;
use crate::features::stats::{Period, PeriodReport, TaskSummary};
use crate::output::format_stats;
use crate::tasks::TaskStore;

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if the tasks cannot be loaded or output formatting fails.
pub fn stats(
    store: &impl TaskStore,
    period: Period,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, QuickdueError> {
    let tasks = store.list()?;
    let summary = TaskSummary::calculate(&tasks, now);
    let report = PeriodReport::calculate(&tasks, period, now);
    debug!(%period, total = report.total, rate = report.success_rate, "computed stats");

    format_stats(&summary, &report, format)
}
