#![forbid(unsafe_code)]

//! Builtin validator vocabulary
//!
//! These are the rule names every default registry knows. Names are the
//! camelCase keys produced by [`camelize`](crate::rules::camelize), so a
//! declaration may spell them `not_in` or `notIn`.

use crate::rules::rule::{ValidatorRef, validator};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Name, description and constructor for each builtin
pub(crate) const BUILTINS: &[(&str, &str, fn() -> ValidatorRef)] = &[
    ("bail", "Control token: later rules halt the chain on failure", || validator(bail)),
    ("required", "Value is present and not empty", || validator(required)),
    ("min", "Number, length or size is at least the argument", || validator(min)),
    ("max", "Number, length or size is at most the argument", || validator(max)),
    ("between", "Number, length or size lies within two arguments", || validator(between)),
    ("in", "Value is one of the arguments", || validator(one_of)),
    ("notIn", "Value is none of the arguments", || validator(not_one_of)),
    ("numeric", "Value is a number or numeric string", || validator(numeric)),
    ("integer", "Value is an integer or integer string", || validator(integer)),
    ("alpha", "Value contains only letters", || validator(alpha)),
    ("alphaNum", "Value contains only letters and digits", || validator(alpha_num)),
    ("email", "Value looks like an email address", || validator(email)),
    ("regex", "Value matches the pattern argument", || validator(matches_pattern)),
];

/// The `bail` keyword is a control token and never fails on its own.
fn bail(_value: &Value, _args: &[String]) -> bool {
    true
}

fn required(value: &Value, _args: &[String]) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Numeric value of a number, character count of a string, length of a sequence
fn magnitude(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        _ => None,
    }
}

fn numeric_arg(args: &[String], index: usize) -> Option<f64> {
    args.get(index).and_then(|a| a.trim().parse::<f64>().ok())
}

fn min(value: &Value, args: &[String]) -> bool {
    match (magnitude(value), numeric_arg(args, 0)) {
        (Some(size), Some(bound)) => size >= bound,
        _ => false,
    }
}

fn max(value: &Value, args: &[String]) -> bool {
    match (magnitude(value), numeric_arg(args, 0)) {
        (Some(size), Some(bound)) => size <= bound,
        _ => false,
    }
}

fn between(value: &Value, args: &[String]) -> bool {
    match (magnitude(value), numeric_arg(args, 0), numeric_arg(args, 1)) {
        (Some(size), Some(low), Some(high)) => size >= low && size <= high,
        _ => false,
    }
}

/// Text form used for membership checks
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn one_of(value: &Value, args: &[String]) -> bool {
    scalar_text(value).is_some_and(|text| args.iter().any(|a| *a == text))
}

fn not_one_of(value: &Value, args: &[String]) -> bool {
    match scalar_text(value) {
        Some(text) => !args.iter().any(|a| *a == text),
        None => true,
    }
}

fn numeric(value: &Value, _args: &[String]) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    }
}

fn integer(value: &Value, _args: &[String]) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => s.trim().parse::<i64>().is_ok(),
        _ => false,
    }
}

fn alpha(value: &Value, _args: &[String]) -> bool {
    value
        .as_str()
        .is_some_and(|s| !s.is_empty() && s.chars().all(char::is_alphabetic))
}

fn alpha_num(value: &Value, _args: &[String]) -> bool {
    value
        .as_str()
        .is_some_and(|s| !s.is_empty() && s.chars().all(char::is_alphanumeric))
}

fn email(value: &Value, _args: &[String]) -> bool {
    value.as_str().is_some_and(|s| EMAIL_PATTERN.is_match(s))
}

/// Token arguments are split on commas, so the pattern is rejoined first.
fn matches_pattern(value: &Value, args: &[String]) -> bool {
    if args.is_empty() {
        return false;
    }
    let Ok(pattern) = Regex::new(&args.join(",")) else {
        return false;
    };
    scalar_text(value).is_some_and(|text| pattern.is_match(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_builtin_names_are_unique() {
        let mut names: Vec<&str> = BUILTINS.iter().map(|(name, _, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUILTINS.len());
    }

    #[test]
    fn test_builtin_names_are_camel_case() {
        for (name, _, _) in BUILTINS {
            assert_eq!(crate::rules::camelize(name), *name);
        }
    }

    #[test]
    fn test_required() {
        assert!(!required(&Value::Null, &[]));
        assert!(!required(&json!("  "), &[]));
        assert!(!required(&json!([]), &[]));
        assert!(required(&json!("a"), &[]));
        assert!(required(&json!(0), &[]));
        assert!(required(&json!(false), &[]));
    }

    #[test]
    fn test_min_max_on_numbers_and_strings() {
        assert!(min(&json!(10), &args(&["10"])));
        assert!(!min(&json!(9), &args(&["10"])));
        assert!(min(&json!("hello"), &args(&["5"])));
        assert!(max(&json!("hi"), &args(&["2"])));
        assert!(!max(&json!([1, 2, 3]), &args(&["2"])));
        assert!(!min(&json!(10), &args(&["ten"])));
        assert!(!min(&json!(10), &[]));
    }

    #[test]
    fn test_between() {
        assert!(between(&json!(18), &args(&["18", "99"])));
        assert!(!between(&json!(100), &args(&["18", "99"])));
        assert!(!between(&json!(50), &args(&["18"])));
    }

    #[test]
    fn test_membership() {
        assert!(one_of(&json!("a"), &args(&["a", "b"])));
        assert!(one_of(&json!(2), &args(&["1", "2"])));
        assert!(!one_of(&json!("c"), &args(&["a", "b"])));
        assert!(not_one_of(&json!("c"), &args(&["a", "b"])));
        assert!(!not_one_of(&json!("a"), &args(&["a", "b"])));
    }

    #[test]
    fn test_numeric_and_integer() {
        assert!(numeric(&json!(1.5), &[]));
        assert!(numeric(&json!("1.5"), &[]));
        assert!(!numeric(&json!("abc"), &[]));
        assert!(!numeric(&json!("NaN"), &[]));
        assert!(integer(&json!(3), &[]));
        assert!(!integer(&json!(3.5), &[]));
        assert!(integer(&json!("-7"), &[]));
    }

    #[test]
    fn test_alpha() {
        assert!(alpha(&json!("abc"), &[]));
        assert!(!alpha(&json!("abc1"), &[]));
        assert!(alpha_num(&json!("abc1"), &[]));
        assert!(!alpha_num(&json!(""), &[]));
    }

    #[test]
    fn test_email() {
        assert!(email(&json!("user@example.com"), &[]));
        assert!(!email(&json!("user@example"), &[]));
        assert!(!email(&json!(42), &[]));
    }

    #[test]
    fn test_regex_rejoins_comma_split_args() {
        assert!(matches_pattern(&json!("aaa"), &args(&["^a{1", "3}$"])));
        assert!(!matches_pattern(&json!("aaaa"), &args(&["^a{1", "3}$"])));
        assert!(!matches_pattern(&json!("x"), &args(&["("])));
        assert!(!matches_pattern(&json!("x"), &[]));
    }
}
