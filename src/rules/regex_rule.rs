#![forbid(unsafe_code)]

//! Regex-backed custom validators
//!
//! Custom rules are declared in `ruleplan.toml` under `[rules.custom.<name>]`
//! and match a field's scalar value against a regular expression.

use crate::error::RuleError;
use crate::rules::builtin::scalar_text;
use crate::rules::rule::Validator;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// TOML structure for a custom rule definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRuleDefinition {
    /// Pattern the value must match
    pub pattern: String,

    /// Human-readable description shown by `ruleplan list`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A validator that matches a value's text form against a compiled regex
pub struct RegexValidator {
    name: String,
    description: String,
    pattern: Regex,
}

impl std::fmt::Debug for RegexValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexValidator")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl RegexValidator {
    /// Compile a custom rule definition
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidDefinition` if the name is empty and
    /// `RuleError::InvalidRegex` if the pattern does not compile.
    pub fn from_definition(name: &str, def: &CustomRuleDefinition) -> Result<Self, RuleError> {
        if name.is_empty() {
            return Err(RuleError::InvalidDefinition(
                "Custom rule name must not be empty".to_string(),
            ));
        }

        let pattern = Regex::new(&def.pattern).map_err(|e| {
            RuleError::InvalidRegex(format!(
                "Failed to compile pattern '{}' for rule '{}': {}",
                def.pattern, name, e
            ))
        })?;

        Ok(RegexValidator {
            name: name.to_string(),
            description: def
                .description
                .clone()
                .unwrap_or_else(|| format!("Value matches /{}/", def.pattern)),
            pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &Value, _args: &[String]) -> bool {
        scalar_text(value).is_some_and(|text| self.pattern.is_match(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definition(pattern: &str) -> CustomRuleDefinition {
        CustomRuleDefinition {
            pattern: pattern.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_from_toml_definition() {
        let def: CustomRuleDefinition = toml::from_str(
            r#"
pattern = "^\\d{5}$"
description = "Postal code"
"#,
        )
        .unwrap();

        let rule = RegexValidator::from_definition("postalCode", &def).unwrap();
        assert_eq!(rule.name(), "postalCode");
        assert_eq!(rule.description(), "Postal code");
        assert!(rule.validate(&json!("12345"), &[]));
        assert!(rule.validate(&json!(12345), &[]));
        assert!(!rule.validate(&json!("1234"), &[]));
    }

    #[test]
    fn test_default_description_mentions_pattern() {
        let rule = RegexValidator::from_definition("hex", &definition("^[0-9a-f]+$")).unwrap();
        assert!(rule.description().contains("^[0-9a-f]+$"));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = RegexValidator::from_definition("broken", &definition("(unclosed"));
        match result {
            Err(RuleError::InvalidRegex(msg)) => {
                assert!(msg.contains("broken"));
                assert!(msg.contains("(unclosed"));
            }
            other => panic!("Expected InvalidRegex, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = RegexValidator::from_definition("", &definition("x"));
        assert!(matches!(result, Err(RuleError::InvalidDefinition(_))));
    }

    #[test]
    fn test_non_scalar_values_fail() {
        let rule = RegexValidator::from_definition("any", &definition(".*")).unwrap();
        assert!(!rule.validate(&Value::Null, &[]));
        assert!(!rule.validate(&json!({"a": 1}), &[]));
    }
}
