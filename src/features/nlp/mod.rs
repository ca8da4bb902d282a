//! Natural language extraction of dates and times from task descriptions.
//!
//! Handles input like:
//! - "tomorrow 15:30 meeting"
//! - "next week friday demo"
//! - "report this week thursday afternoon 4 o'clock"
//! - "release 2024-07-01T18:00"

mod parser;
pub mod rules;

pub use parser::{parse, ParseResult};
