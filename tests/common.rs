//! Test utilities for ruleplan integration tests

#![allow(dead_code)]

use ruleplan::rules::{CanonicalRule, RuleDeclaration, ValidatorRegistry, parse_rules};
use std::path::PathBuf;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Registry holding every builtin rule
pub fn builtins() -> ValidatorRegistry {
    ValidatorRegistry::with_builtins()
}

/// Parse a pipe declaration against the builtins, panicking on error
pub fn rules(decl: &str) -> Vec<CanonicalRule> {
    match parse_rules(&RuleDeclaration::from(decl), &builtins()) {
        Ok(rules) => rules,
        Err(e) => panic!("failed to parse {:?}: {}", decl, e),
    }
}

/// Path to a configuration fixture
pub fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("config")
        .join(filename)
}
