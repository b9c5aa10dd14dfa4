//! List command implementation
//!
//! This module implements the `ruleplan list` command, which prints every
//! rule the registry resolves: builtins left enabled by the configuration
//! plus configured custom rules, with their source and description.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_ERROR, EXIT_SUCCESS, build_registry, config_exit_code, load_optional_config,
    resolve_output,
};
use crate::config;
use crate::output::{HumanFormatter, JsonlFormatter};

/// Error type specific to list command
#[derive(Debug, thiserror::Error)]
enum ListError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::error::ConfigError),

    #[error("Rule error: {0}")]
    Rule(#[from] crate::error::RuleError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the list command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error
/// - 3: Parse error (invalid ruleplan.toml)
pub fn run_list(
    config_path: &std::path::Path,
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> i32 {
    match run_list_inner(config_path, format, color) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                ListError::Config(ref config_error) => config_exit_code(config_error),
                _ => EXIT_ERROR,
            }
        }
    }
}

fn run_list_inner(
    config_path: &std::path::Path,
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> Result<(), ListError> {
    let config = load_optional_config(config_path)?;
    let registry = build_registry(config.as_ref())?;
    let output = resolve_output(config.as_ref(), format, color);

    match output.format {
        config::OutputFormat::Human => {
            if registry.is_empty() {
                println!("No rules are enabled.");
                return Ok(());
            }
            HumanFormatter::new(output.color).write_rules_to_stdout(registry.iter_rules())?;
        }
        config::OutputFormat::Jsonl => {
            print!("{}", JsonlFormatter::new().format_rules(registry.iter_rules()));
        }
    }

    Ok(())
}
