//! Parsing and validation for ruleplan.toml configuration files

use crate::error::ConfigError;
use crate::path::PathExpression;
use crate::rules::{CustomRuleDefinition, RuleDeclaration};
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE: &str = "ruleplan.toml";

/// Main configuration struct for ruleplan.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// ruleplan metadata
    pub ruleplan: RuleplanMeta,

    /// Rule configuration
    #[serde(default)]
    pub rules: RulesConfig,

    /// Field declarations keyed by field path
    #[serde(default)]
    pub fields: BTreeMap<String, RuleDeclaration>,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.ruleplan.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.ruleplan.version
            )));
        }

        for (name, def) in &self.rules.custom {
            if name.is_empty() {
                return Err(ConfigError::Validation(
                    "Custom rule names must not be empty".to_string(),
                ));
            }
            Regex::new(&def.pattern).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid pattern '{}' for custom rule '{}': {}",
                    def.pattern, name, e
                ))
            })?;
        }

        for field in self.fields.keys() {
            if !PathExpression::parse(field).is_well_formed() {
                return Err(ConfigError::Validation(format!(
                    "Invalid field path '{}': segments must not be empty",
                    field
                )));
            }
        }

        Ok(())
    }
}

/// ruleplan metadata section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleplanMeta {
    /// Configuration version (must be "1")
    pub version: String,
}

/// Rules configuration section
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RulesConfig {
    /// Builtin toggles (flattened from `[rules]`, excluding `[rules.custom]`)
    #[serde(flatten)]
    pub builtin: HashMap<String, bool>,

    /// Custom regex rules from `[rules.custom.<name>]`
    #[serde(default)]
    pub custom: BTreeMap<String, CustomRuleDefinition>,
}

/// Output configuration section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// Starter configuration written by `ruleplan init`
pub const DEFAULT_CONFIG: &str = r#"# ruleplan configuration
[ruleplan]
version = "1"

# Disable builtin rules by setting them to false.
[rules]
# email = false

# Custom rules match a field's value against a regular expression.
# [rules.custom.postal_code]
# pattern = "^[0-9]{5}$"
# description = "Five digit postal code"

# Field declarations: a pipe string or a list of tokens and [name, args...] lists.
# `bail` makes every later rule halt on failure; `^` makes a single rule halt.
[fields]
email = "bail|required|email"
# "profile.age" = ["^required", ["between", 18, 99]]

[output]
format = "human"
color = "auto"
"#;
