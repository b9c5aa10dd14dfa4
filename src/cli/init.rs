//! Initialize a ruleplan project
//!
//! Writes a starter ruleplan.toml.

use crate::config::DEFAULT_CONFIG;
use std::fs;
use std::path::Path;

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path error
    #[error("Path error: {0}")]
    Path(String),
}

/// What happened to the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Skipped,
    Overwritten,
}

/// Run the init command
///
/// # Arguments
/// * `path` - Where to write the configuration
/// * `force` - If true, overwrite an existing file. If false, leave it alone.
///
/// # Returns
/// * `Ok(InitOutcome)` - Whether the file was created, skipped or overwritten
/// * `Err(InitError)` - If the path is a directory or an I/O error occurred
pub fn run_init(path: &Path, force: bool) -> Result<InitOutcome, InitError> {
    if path.is_dir() {
        return Err(InitError::Path(format!(
            "Path '{}' is a directory",
            path.display()
        )));
    }

    if path.exists() {
        if !force {
            return Ok(InitOutcome::Skipped);
        }
        fs::write(path, DEFAULT_CONFIG)?;
        return Ok(InitOutcome::Overwritten);
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG)?;
    Ok(InitOutcome::Created)
}

/// Message printed for an init outcome
pub fn describe_outcome(path: &Path, outcome: InitOutcome) -> String {
    match outcome {
        InitOutcome::Created => format!(
            "Created {}. Add field declarations under [fields] to start compiling.",
            path.display()
        ),
        InitOutcome::Skipped => format!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        ),
        InitOutcome::Overwritten => format!("Overwrote {}.", path.display()),
    }
}
