//! Parse command implementation.
//!
//! Preview mode of the deadline parser: the result is printed and dropped.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::cli::args::OutputFormat;
use crate::error::QuickdueError;
use crate::features::nlp::parse;
use crate::output::format_parse;

/// Execute the parse command.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn preview(text: &str, now: NaiveDateTime, format: OutputFormat) -> Result<String, QuickdueError> {
    let result = parse(text, now);
    debug!(date = ?result.date, time = ?result.time, "preview");
    format_parse(&result, format)
}
