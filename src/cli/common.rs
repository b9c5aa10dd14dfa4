//! Common helper functions shared across CLI commands
//!
//! This module provides shared functionality for loading configuration,
//! building the rule registry, resolving output settings and installing the
//! tracing subscriber.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::config::{ColorOption, Config, OutputConfig};
use crate::error::{ConfigError, RuleError};
use crate::rules::ValidatorRegistry;
use std::path::Path;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Install the stderr tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output.
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "ruleplan=debug" } else { "ruleplan=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load the configuration file
///
/// # Errors
///
/// Returns `ConfigError::Io` if the file does not exist or cannot be read.
/// Returns `ConfigError::Parse` or `ConfigError::Validation` if it is invalid.
pub(crate) fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!(
                "{} not found. Run 'ruleplan init' to create it.",
                path.display()
            ),
        )));
    }

    Config::load(path)
}

/// Load the configuration file if present
///
/// Commands that work without configuration fall back to builtins only.
pub(crate) fn load_optional_config(path: &Path) -> Result<Option<Config>, ConfigError> {
    if !path.exists() {
        warn!(config = %path.display(), "Configuration not found, using builtin rules only");
        return Ok(None);
    }
    Config::load(path).map(Some)
}

/// Build the rule registry from an optional configuration
///
/// # Errors
///
/// Returns `RuleError` if a custom rule is invalid.
pub(crate) fn build_registry(config: Option<&Config>) -> Result<ValidatorRegistry, RuleError> {
    match config {
        Some(config) => ValidatorRegistry::build_from_config(config),
        None => Ok(ValidatorRegistry::with_builtins()),
    }
}

/// Merge command-line output overrides over the configured settings
pub(crate) fn resolve_output(
    config: Option<&Config>,
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> OutputConfig {
    let configured = config.map(|c| c.output).unwrap_or_default();
    OutputConfig {
        format: format.map(Into::into).unwrap_or(configured.format),
        color: color.map(ColorOption::from).unwrap_or(configured.color),
    }
}

/// Exit code for a configuration error
pub(crate) fn config_exit_code(error: &ConfigError) -> i32 {
    match error {
        ConfigError::Parse(_) | ConfigError::Validation(_) => EXIT_PARSE_ERROR,
        ConfigError::Io(_) => EXIT_ERROR,
    }
}
