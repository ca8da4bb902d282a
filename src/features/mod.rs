//! Feature implementations for quickdue.
//!
//! - Natural-language deadline extraction
//! - Task statistics

pub mod nlp;
pub mod stats;
