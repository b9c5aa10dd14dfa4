//! Compile and explain command implementations
//!
//! `ruleplan compile` loads the configuration, builds the rule registry and
//! compiles every configured field (or the requested subset) into grouped
//! execution plans. `ruleplan explain` compiles one declaration given on the
//! command line.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_ERROR, EXIT_FAILURE, EXIT_SUCCESS, build_registry, config_exit_code, load_config,
    load_optional_config, resolve_output,
};
use crate::config::{self, OutputConfig};
use crate::engine::{CompileResult, PlanCompiler};
use crate::error::{ConfigError, RuleError};
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::rules::RuleDeclaration;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Error type specific to compile and explain commands
#[derive(Debug, thiserror::Error)]
pub(crate) enum CompileError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Field '{0}' is not declared in [fields]")]
    UnknownField(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    fn exit_code(&self) -> i32 {
        match self {
            CompileError::Config(e) => config_exit_code(e),
            _ => EXIT_ERROR,
        }
    }
}

/// Run the compile command
///
/// # Returns
///
/// Exit code:
/// - 0: Success (every field compiled)
/// - 1: One or more fields failed to compile
/// - 2: Error (missing configuration, unknown field, I/O error)
/// - 3: Parse error (invalid ruleplan.toml)
pub fn run_compile(
    config_path: &Path,
    fields: &[String],
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> i32 {
    finish(run_compile_inner(config_path, fields, format, color))
}

/// Run the explain command
///
/// Uses the configured registry when the configuration exists and the
/// builtins otherwise. Exit codes match [`run_compile`].
pub fn run_explain(
    config_path: &Path,
    declaration: &str,
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> i32 {
    finish(run_explain_inner(config_path, declaration, format, color))
}

fn finish(outcome: Result<bool, CompileError>) -> i32 {
    match outcome {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run_compile_inner(
    config_path: &Path,
    fields: &[String],
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> Result<bool, CompileError> {
    let config = load_config(config_path)?;
    let registry = build_registry(Some(&config))?;
    let selected = select_fields(&config.fields, fields)?;

    debug!(
        fields = selected.len(),
        rules = registry.len(),
        "Compiling configured fields"
    );

    let result = PlanCompiler::new(registry).compile_fields(&selected);
    print_result(&result, resolve_output(Some(&config), format, color))?;
    Ok(result.is_ok())
}

fn run_explain_inner(
    config_path: &Path,
    declaration: &str,
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> Result<bool, CompileError> {
    let config = load_optional_config(config_path)?;
    let registry = build_registry(config.as_ref())?;

    let mut fields = BTreeMap::new();
    fields.insert(declaration.to_string(), RuleDeclaration::from(declaration));

    let result = PlanCompiler::new(registry).compile_fields(&fields);
    print_result(&result, resolve_output(config.as_ref(), format, color))?;
    Ok(result.is_ok())
}

/// Restrict the configured fields to the requested names
///
/// An empty request selects every field.
fn select_fields(
    configured: &BTreeMap<String, RuleDeclaration>,
    requested: &[String],
) -> Result<BTreeMap<String, RuleDeclaration>, CompileError> {
    if requested.is_empty() {
        return Ok(configured.clone());
    }

    let mut selected = BTreeMap::new();
    for field in requested {
        let decl = configured
            .get(field)
            .ok_or_else(|| CompileError::UnknownField(field.clone()))?;
        selected.insert(field.clone(), decl.clone());
    }
    Ok(selected)
}

fn print_result(result: &CompileResult, output: OutputConfig) -> std::io::Result<()> {
    match output.format {
        config::OutputFormat::Human => HumanFormatter::new(output.color).write_to_stdout(result),
        config::OutputFormat::Jsonl => {
            JsonlFormatter::new().write_to_stdout(result);
            Ok(())
        }
    }
}
