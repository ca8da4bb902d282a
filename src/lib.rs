//! quickdue - tasks with deadlines written in plain English
//!
//! The core is [`features::nlp::parse`], which pulls a date and time out of
//! a task description relative to an injected "now". Around it sit a
//! `SQLite` task store, statistics and the CLI.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tasks;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::QuickdueError;
pub use features::nlp::{parse, ParseResult};
