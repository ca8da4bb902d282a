use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::core::{parse_date_arg, parse_datetime_arg, parse_time_arg};
use crate::features::stats::Period;
use crate::tasks::Priority;

#[derive(Parser)]
#[command(name = "quickdue")]
#[command(about = "A task CLI that pulls deadlines out of plain-English task descriptions")]
#[command(long_about = "quickdue - tasks with deadlines written the way you say them

Write the deadline into the task text and quickdue extracts it:
relative days (today, tomorrow, day after tomorrow), weekdays
(next week friday, this week monday), clock times (3 o'clock,
pm 2 o'clock 30 min, 15:30) and ISO stamps (2024-06-11 15:30).

QUICK START:
  quickdue parse \"tomorrow 15:30 meeting\"   Preview what would be extracted
  quickdue add \"report next week friday\"    Add a task with a deadline
  quickdue today                            Tasks due today
  quickdue stats --period week              Weekly completion report

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Treat this instant as the current time (YYYY-MM-DD[ HH:MM])
    #[arg(long, global = true, env = "QUICKDUE_NOW", value_parser = parse_datetime_arg)]
    pub now: Option<NaiveDateTime>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preview what would be extracted from a task description
    ///
    /// Nothing is stored.
    ///
    /// # Examples
    ///
    ///   quickdue parse "tomorrow 15:30 meeting"
    ///   quickdue p "next week friday 3 o'clock review" -o json
    #[command(alias = "p")]
    Parse {
        /// Task description
        text: String,
    },

    /// Add a task, extracting its deadline from the text
    ///
    /// # Supported Patterns
    ///
    ///   Days:     today, tomorrow, day after tomorrow
    ///   Weekdays: next week friday, this week monday
    ///   Times:    3 o'clock, pm 2 o'clock 30 min, 15:30
    ///   Stamps:   2024-06-11 15:30, 2024-06-11
    ///
    /// A trailing "until", "from" or "at" after a match is removed too.
    ///
    /// # Examples
    ///
    ///   quickdue add "tomorrow 15:30 dentist" --category health
    ///   quickdue a "submit report" --date 2024-06-14 --time 17:00
    #[command(alias = "a")]
    Add(AddArgs),

    /// List tasks, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Tasks due today
    Today,

    /// Show a single task
    Show {
        /// Task ID
        id: i64,
    },

    /// Toggle a task between done and open
    Done {
        /// Task ID
        id: i64,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },

    /// Change fields of an existing task
    Edit(EditArgs),

    /// Configured categories with pending counts
    Categories,

    /// Completion summary and period report
    Stats {
        /// Reporting window
        #[arg(long, short, value_enum, default_value = "day")]
        period: Period,
    },

    /// Generate shell completions
    ///
    /// Example: quickdue completions bash > ~/.bash_completion.d/quickdue
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Filters for `list`; all given filters must match.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Only tasks in this category
    #[arg(long, short)]
    pub category: Option<String>,

    /// Hide completed tasks
    #[arg(long)]
    pub pending: bool,

    /// Only completed tasks
    #[arg(long, conflicts_with = "pending")]
    pub completed: bool,

    /// Only pending tasks whose deadline has passed
    #[arg(long)]
    pub overdue: bool,

    /// Case-insensitive match against text and category
    #[arg(long, short)]
    pub search: Option<String>,
}

/// Arguments for `add`.
#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// Task description with an optional natural-language deadline
    pub text: String,

    /// Task priority (defaults to `tasks.default_priority`)
    #[arg(long, short, value_enum)]
    pub priority: Option<Priority>,

    /// Task category (defaults to `tasks.default_category`)
    #[arg(long, short)]
    pub category: Option<String>,

    /// Deadline date used when the text has none (YYYY-MM-DD)
    #[arg(long, short, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Deadline time used when the text has none (HH:MM)
    #[arg(long, short, value_parser = parse_time_arg)]
    pub time: Option<NaiveTime>,

    /// Show what would be created without storing it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `edit`.
#[derive(Args, Debug, Clone, Default)]
pub struct EditArgs {
    /// Task ID
    pub id: i64,

    /// New text, used verbatim
    #[arg(long)]
    pub text: Option<String>,

    /// New priority
    #[arg(long, short, value_enum)]
    pub priority: Option<Priority>,

    /// New category
    #[arg(long, short)]
    pub category: Option<String>,

    /// New deadline (YYYY-MM-DD[ HH:MM])
    #[arg(long, value_parser = parse_datetime_arg, conflicts_with = "clear_deadline")]
    pub deadline: Option<NaiveDateTime>,

    /// Remove the deadline
    #[arg(long)]
    pub clear_deadline: bool,
}
