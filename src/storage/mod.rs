//! Storage layer for quickdue.
//!
//! `SQLite` persistence for tasks, with versioned schema migrations.

mod database;
mod migrations;

pub use database::Database;
