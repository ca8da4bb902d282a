//! JSON output formatting.

use serde::Serialize;
use serde_json::json;

use crate::error::QuickdueError;
use crate::features::nlp::ParseResult;
use crate::features::stats::{PeriodReport, TaskSummary};
use crate::tasks::{CategoryCount, Task};

/// Format a parse preview as JSON.
///
/// # Errors
///
/// Returns `QuickdueError::Parse` if JSON serialization fails.
pub fn format_parse_json(result: &ParseResult) -> Result<String, QuickdueError> {
    let output = json!({
        "cleaned_text": result.cleaned_text,
        "date": result.date_iso(),
        "time": result.time_hhmm(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format tasks as JSON.
///
/// # Errors
///
/// Returns `QuickdueError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task], list_name: &str) -> Result<String, QuickdueError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format categories as JSON.
///
/// # Errors
///
/// Returns `QuickdueError::Parse` if JSON serialization fails.
pub fn format_categories_json(categories: &[CategoryCount]) -> Result<String, QuickdueError> {
    let output = json!({
        "count": categories.len(),
        "items": categories
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the summary and period report together.
///
/// # Errors
///
/// Returns `QuickdueError::Parse` if JSON serialization fails.
pub fn format_stats_json(
    summary: &TaskSummary,
    report: &PeriodReport,
) -> Result<String, QuickdueError> {
    let output = json!({
        "summary": summary,
        "period": report,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type.
///
/// # Errors
///
/// Returns `QuickdueError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, QuickdueError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::stats::Period;
    use crate::tasks::Priority;
    use chrono::{NaiveDate, NaiveTime};
    use serde_json::Value;

    fn make_task(id: i64, text: &str) -> Task {
        Task {
            id,
            text: text.to_string(),
            completed: false,
            priority: Priority::High,
            category: "Work".to_string(),
            deadline: NaiveDate::from_ymd_opt(2024, 6, 11)
                .unwrap()
                .and_hms_opt(15, 30, 0),
            created_at: NaiveDate::from_ymd_opt(2024, 6, 10)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            completed_at: None,
        }
    }

    #[test]
    fn test_format_parse_json_full() {
        let result = ParseResult {
            cleaned_text: "meeting".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 11),
            time: NaiveTime::from_hms_opt(15, 30, 0),
        };
        let parsed: Value = serde_json::from_str(&format_parse_json(&result).unwrap()).unwrap();

        assert_eq!(parsed["cleaned_text"], "meeting");
        assert_eq!(parsed["date"], "2024-06-11");
        assert_eq!(parsed["time"], "15:30");
    }

    #[test]
    fn test_format_parse_json_nulls() {
        let result = ParseResult {
            cleaned_text: "buy milk".to_string(),
            ..ParseResult::default()
        };
        let parsed: Value = serde_json::from_str(&format_parse_json(&result).unwrap()).unwrap();

        assert!(parsed["date"].is_null());
        assert!(parsed["time"].is_null());
    }

    #[test]
    fn test_format_tasks_json() {
        let tasks = vec![make_task(1, "ship"), make_task(2, "review")];
        let parsed: Value =
            serde_json::from_str(&format_tasks_json(&tasks, "Tasks").unwrap()).unwrap();

        assert_eq!(parsed["list"], "Tasks");
        assert_eq!(parsed["count"], 2);
        assert_eq!(parsed["items"][0]["text"], "ship");
        assert_eq!(parsed["items"][1]["priority"], "high");
    }

    #[test]
    fn test_format_tasks_json_empty() {
        let parsed: Value = serde_json::from_str(&format_tasks_json(&[], "Today").unwrap()).unwrap();
        assert_eq!(parsed["count"], 0);
        assert!(parsed["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_format_categories_json() {
        let categories = vec![CategoryCount {
            name: "Health".to_string(),
            pending: 3,
        }];
        let parsed: Value =
            serde_json::from_str(&format_categories_json(&categories).unwrap()).unwrap();
        assert_eq!(parsed["items"][0]["name"], "Health");
        assert_eq!(parsed["items"][0]["pending"], 3);
    }

    #[test]
    fn test_format_stats_json() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 12)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let tasks = vec![make_task(1, "ship")];
        let summary = TaskSummary::calculate(&tasks, now);
        let report = PeriodReport::calculate(&tasks, Period::Week, now);

        let parsed: Value =
            serde_json::from_str(&format_stats_json(&summary, &report).unwrap()).unwrap();
        assert_eq!(parsed["summary"]["total"], 1);
        assert_eq!(parsed["summary"]["overdue"], 1);
        assert_eq!(parsed["period"]["period"], "week");
        assert_eq!(parsed["period"]["failed"][0]["id"], 1);
    }
}
