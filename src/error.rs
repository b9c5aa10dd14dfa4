//! Error types for ruleplan
//!
//! This module defines the error types used throughout ruleplan, following
//! a hierarchical structure with specific error variants for different
//! error categories.

use std::path::PathBuf;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML syntax or shape
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration parsed but failed validation
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Rule-related errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A string-form rule token named a rule the registry does not know.
    ///
    /// Carries the name as written, before modifier stripping and normalization.
    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    /// Invalid rule definition
    #[error("Invalid rule definition: {0}")]
    InvalidDefinition(String),

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),
}

/// Errors reading or writing the JSON documents handed to the path commands
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// Document could not be read or written
    #[error("Failed to access {file}: {source}")]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document or value is not valid JSON
    #[error("Invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error type for ruleplan
#[derive(Debug, thiserror::Error)]
pub enum RuleplanError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Path document error
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
