#![forbid(unsafe_code)]

//! Rule declarations, the validator registry, and execution grouping

mod bail;
mod builtin;
mod modifier;
mod parser;
mod regex_rule;
mod registry;
mod rule;

// Re-export core types
pub use bail::group_bails;
pub use modifier::{camelize, resolve_modifier};
pub use parser::{
    ARG_SEPARATOR, ARGS_SEPARATOR, RULE_SEPARATOR, RuleDeclaration, RuleElement, RuleHead,
    parse_one, parse_rules,
};
pub use regex_rule::{CustomRuleDefinition, RegexValidator};
pub use registry::{Lookup, RegisteredRule, RuleRegistry, ValidatorRegistry};
pub use rule::{CanonicalRule, RuleGroup, Validator, ValidatorRef, same_validator, validator};
