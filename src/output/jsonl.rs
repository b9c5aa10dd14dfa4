#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in a deterministic order:
//! 1. All group records (sorted by field, then group order)
//! 2. All error records (sorted by field)
//! 3. One status record

use crate::engine::CompileResult;
use crate::rules::{CanonicalRule, RegisteredRule};
use crate::types::{Modifier, RuleSource};
use serde::Serialize;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format a compile result as JSONL
    pub fn format(&self, result: &CompileResult) -> String {
        let mut output = String::new();

        for plan in &result.plans {
            for (index, group) in plan.groups.iter().enumerate() {
                push_line(
                    &mut output,
                    &GroupRecord {
                        record_type: "group",
                        field: &plan.field,
                        index,
                        bail: group.bail,
                        rules: group.rules.iter().map(RuleRecord::from).collect(),
                    },
                );
            }
        }

        for error in &result.errors {
            push_line(
                &mut output,
                &ErrorRecord {
                    record_type: "error",
                    field: &error.field,
                    message: error.error.to_string(),
                },
            );
        }

        push_line(
            &mut output,
            &StatusRecord {
                record_type: "status",
                passed: result.is_ok(),
                fields_compiled: result.plans.len() as u64,
                fields_failed: result.errors.len() as u64,
            },
        );

        output
    }

    /// Format registry entries as JSONL, one record per rule
    pub fn format_rules<'a>(&self, rules: impl IntoIterator<Item = &'a RegisteredRule>) -> String {
        let mut output = String::new();
        for rule in rules {
            push_line(
                &mut output,
                &RuleListRecord {
                    record_type: "rule",
                    name: &rule.name,
                    source: rule.source,
                    description: &rule.description,
                },
            );
        }
        output
    }

    /// Write a compile result to stdout
    pub fn write_to_stdout(&self, result: &CompileResult) {
        print!("{}", self.format(result));
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_line<T: Serialize>(output: &mut String, record: &T) {
    if let Ok(json) = serde_json::to_string(record) {
        output.push_str(&json);
        output.push('\n');
    }
}

/// One rule inside a group record
#[derive(Debug, Serialize)]
struct RuleRecord<'a> {
    name: Option<&'a str>,
    args: &'a [String],
    modifier: Modifier,
}

impl<'a> From<&'a CanonicalRule> for RuleRecord<'a> {
    fn from(rule: &'a CanonicalRule) -> Self {
        RuleRecord {
            name: rule.name.as_deref(),
            args: &rule.args,
            modifier: rule.modifier,
        }
    }
}

/// Group record for JSONL output
#[derive(Debug, Serialize)]
struct GroupRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    field: &'a str,
    index: usize,
    bail: bool,
    rules: Vec<RuleRecord<'a>>,
}

/// Error record for JSONL output
#[derive(Debug, Serialize)]
struct ErrorRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    field: &'a str,
    message: String,
}

/// Status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    fields_compiled: u64,
    fields_failed: u64,
}

/// Registry entry record for JSONL output
#[derive(Debug, Serialize)]
struct RuleListRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    name: &'a str,
    source: RuleSource,
    description: &'a str,
}
