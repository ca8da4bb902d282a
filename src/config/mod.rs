//! Configuration management for quickdue.
//!
//! This module handles loading and saving configuration from `~/.quickdue/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, TasksConfig};
