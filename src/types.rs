#![forbid(unsafe_code)]

//! Core domain types for ruleplan
//!
//! This module defines the small value types shared by the rule compiler
//! and its output formatters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-rule modifier parsed from the head of a rule name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// No modifier
    #[default]
    None,
    /// Leading `^`: this rule halts the chain on failure
    BailPrefix,
}

impl Modifier {
    /// Marker character that introduces [`Modifier::BailPrefix`]
    pub const BAIL_MARKER: char = '^';

    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::None => "none",
            Modifier::BailPrefix => "bail_prefix",
        }
    }

    /// Returns true for [`Modifier::BailPrefix`]
    pub fn is_bail(&self) -> bool {
        matches!(self, Modifier::BailPrefix)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a registered rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSource {
    Builtin,
    Custom,
}

impl RuleSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSource::Builtin => "builtin",
            RuleSource::Custom => "custom",
        }
    }
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
