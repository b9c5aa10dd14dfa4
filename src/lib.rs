#![forbid(unsafe_code)]

//! ruleplan: compile field validation rules into bail-aware execution plans
//!
//! A field declaration such as `"bail|required|min:3"` is parsed against a
//! registry of named validators into canonical rules, then partitioned into
//! groups that an executor runs in order, stopping after a failing group
//! marked `bail`. Field paths like `addresses[0].city` address nested values
//! through [`get_nested`] and [`set_nested`].

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod path;
pub mod rules;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, PathError, RuleError, RuleplanError};

// Re-export core domain types for convenient access
pub use engine::{PlanCompiler, compile_rules};
pub use path::{PathExpression, get_nested, set_nested};
pub use rules::{
    CanonicalRule, RuleDeclaration, RuleElement, RuleGroup, ValidatorRegistry, group_bails,
    parse_rules,
};
pub use types::{Modifier, RuleSource};
