#![forbid(unsafe_code)]

//! Validator capability and the compiled rule types built on top of it

use crate::types::Modifier;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A validator capability
///
/// Validators receive the field value and the string arguments attached to
/// the rule invocation (`min:10` passes `["10"]`). The trait is `Send + Sync`
/// so compiled plans can be shared across threads.
pub trait Validator: Send + Sync {
    /// Returns true when `value` satisfies the rule
    fn validate(&self, value: &Value, args: &[String]) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&Value, &[String]) -> bool + Send + Sync,
{
    fn validate(&self, value: &Value, args: &[String]) -> bool {
        self(value, args)
    }
}

/// Shared handle to a validator
pub type ValidatorRef = Arc<dyn Validator>;

/// Wraps a closure as a [`ValidatorRef`]
pub fn validator<F>(f: F) -> ValidatorRef
where
    F: Fn(&Value, &[String]) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Returns true when both handles point at the same validator
pub fn same_validator(a: &ValidatorRef, b: &ValidatorRef) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

/// One fully resolved validation step
///
/// Produced by the parser in declaration order and never mutated afterwards.
#[derive(Clone)]
pub struct CanonicalRule {
    /// Validator to invoke
    pub validator: ValidatorRef,

    /// String arguments, in declaration order
    pub args: Vec<String>,

    /// Normalized (camelCased, modifier-stripped) rule name
    ///
    /// `None` when the rule was given directly as a callable.
    pub name: Option<String>,

    /// Modifier parsed from the rule head
    pub modifier: Modifier,
}

impl CanonicalRule {
    /// Name used in diagnostics and output
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<callable>")
    }

    /// True when this rule is the global `bail` control token
    pub fn is_bail_keyword(&self) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case("bail"))
    }

    /// Runs the validator against `value` with this rule's arguments
    pub fn check(&self, value: &Value) -> bool {
        self.validator.validate(value, &self.args)
    }
}

impl fmt::Debug for CanonicalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanonicalRule")
            .field("validator", &"<Validator>")
            .field("args", &self.args)
            .field("name", &self.name)
            .field("modifier", &self.modifier)
            .finish()
    }
}

impl PartialEq for CanonicalRule {
    fn eq(&self, other: &Self) -> bool {
        same_validator(&self.validator, &other.validator)
            && self.args == other.args
            && self.name == other.name
            && self.modifier == other.modifier
    }
}

/// A contiguous batch of rules sharing one halt-on-failure flag
///
/// When `bail` is true the executor stops the whole chain as soon as the
/// group's first rule fails. When false, every rule in the group runs and
/// failures accumulate. Groups are never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleGroup {
    pub rules: Vec<CanonicalRule>,
    pub bail: bool,
}

impl RuleGroup {
    pub fn new(rules: Vec<CanonicalRule>, bail: bool) -> Self {
        Self { rules, bail }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in group order
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(CanonicalRule::display_name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule(name: Option<&str>, validator: ValidatorRef) -> CanonicalRule {
        CanonicalRule {
            validator,
            args: vec![],
            name: name.map(str::to_string),
            modifier: Modifier::None,
        }
    }

    #[test]
    fn test_closure_is_validator() {
        let non_empty = validator(|value, _args| value.as_str().is_some_and(|s| !s.is_empty()));
        assert!(non_empty.validate(&json!("x"), &[]));
        assert!(!non_empty.validate(&json!(""), &[]));
    }

    #[test]
    fn test_check_passes_args() {
        let min_len = validator(|value, args| {
            let min: usize = args.first().and_then(|a| a.parse().ok()).unwrap_or(0);
            value.as_str().is_some_and(|s| s.len() >= min)
        });
        let mut r = rule(Some("min"), min_len);
        r.args = vec!["3".to_string()];
        assert!(r.check(&json!("abcd")));
        assert!(!r.check(&json!("ab")));
    }

    #[test]
    fn test_bail_keyword_is_case_insensitive() {
        let v = validator(|_, _| true);
        assert!(rule(Some("bail"), v.clone()).is_bail_keyword());
        assert!(rule(Some("BAIL"), v.clone()).is_bail_keyword());
        assert!(!rule(Some("bailout"), v.clone()).is_bail_keyword());
        assert!(!rule(None, v).is_bail_keyword());
    }

    #[test]
    fn test_equality_uses_validator_identity() {
        let a = validator(|_, _| true);
        let b = validator(|_, _| true);
        assert_eq!(rule(Some("x"), a.clone()), rule(Some("x"), a.clone()));
        assert_ne!(rule(Some("x"), a), rule(Some("x"), b));
    }

    #[test]
    fn test_display_name_for_callable() {
        let r = rule(None, validator(|_, _| true));
        assert_eq!(r.display_name(), "<callable>");
    }

    #[test]
    fn test_canonical_rule_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<CanonicalRule>();
        assert_sync::<CanonicalRule>();
        assert_send::<RuleGroup>();
    }
}
