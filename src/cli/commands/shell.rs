//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::QuickdueError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns `InvalidInput` if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, QuickdueError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "quickdue", &mut buf);
    String::from_utf8(buf)
        .map_err(|e| QuickdueError::InvalidInput(format!("UTF-8 error in completions: {e}")))
}
