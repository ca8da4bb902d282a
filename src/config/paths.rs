//! Path resolution for quickdue configuration and data files.
//!
//! Everything lives under `~/.quickdue/`:
//! - `config.yaml` - settings
//! - `quickdue.db` - task database

use std::path::PathBuf;

use crate::error::QuickdueError;

/// Paths to quickdue files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.quickdue/`
    pub root: PathBuf,
    /// Config file: `~/.quickdue/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.quickdue/quickdue.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOME` is not set.
    pub fn new() -> Result<Self, QuickdueError> {
        let home = std::env::var("HOME").map_err(|_| {
            QuickdueError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".quickdue")))
    }

    /// Create paths under a custom root.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("quickdue.db"),
            root,
        }
    }

    /// Create the root directory if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), QuickdueError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                QuickdueError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}
