#![forbid(unsafe_code)]

//! Rule declaration parsing
//!
//! Turns a raw declaration such as `"bail|required|min:10"` or
//! `["^required", ["between", 18, 99]]` into an ordered list of
//! [`CanonicalRule`]s, resolving every name against a [`RuleRegistry`].
//!
//! String tokens and sequence elements treat unknown names differently: an
//! unknown string token fails the whole declaration with
//! [`RuleError::UnknownRule`], while a sequence whose head is unknown is
//! dropped without error.

use crate::error::RuleError;
use crate::rules::modifier::resolve_modifier;
use crate::rules::registry::{Lookup, RuleRegistry};
use crate::rules::rule::{CanonicalRule, ValidatorRef};
use crate::types::Modifier;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

/// Separator between rules in a pipe declaration
pub const RULE_SEPARATOR: char = '|';

/// Separator between a rule name and its arguments
pub const ARGS_SEPARATOR: char = ':';

/// Separator between arguments
pub const ARG_SEPARATOR: char = ',';

/// Head of a sequence element: a rule name or a validator given directly
#[derive(Clone)]
pub enum RuleHead {
    Name(String),
    Callable(ValidatorRef),
}

impl fmt::Debug for RuleHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleHead::Name(name) => f.debug_tuple("Name").field(name).finish(),
            RuleHead::Callable(_) => f.write_str("Callable(<Validator>)"),
        }
    }
}

impl From<&str> for RuleHead {
    fn from(name: &str) -> Self {
        RuleHead::Name(name.to_string())
    }
}

impl From<String> for RuleHead {
    fn from(name: String) -> Self {
        RuleHead::Name(name)
    }
}

impl From<ValidatorRef> for RuleHead {
    fn from(validator: ValidatorRef) -> Self {
        RuleHead::Callable(validator)
    }
}

/// One element of a list declaration
#[derive(Clone)]
pub enum RuleElement {
    /// A validator with no name and no arguments
    Callable(ValidatorRef),

    /// `[head, ...args]`
    Sequence { head: RuleHead, args: Vec<String> },

    /// `"name:a,b,c"`
    Token(String),

    /// Anything else; contributes no rule
    Other,
}

impl RuleElement {
    /// Build a `[head, ...args]` element
    pub fn sequence<H, I, S>(head: H, args: I) -> Self
    where
        H: Into<RuleHead>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RuleElement::Sequence {
            head: head.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Map one JSON array item onto an element
    ///
    /// Strings are tokens. Non-empty arrays with a string head are sequences,
    /// their remaining items stringified. Everything else is [`RuleElement::Other`].
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(token) => RuleElement::Token(token.clone()),
            Value::Array(items) => match items.split_first() {
                Some((Value::String(head), rest)) => RuleElement::Sequence {
                    head: RuleHead::Name(head.clone()),
                    args: rest.iter().map(json_arg_text).collect(),
                },
                _ => RuleElement::Other,
            },
            _ => RuleElement::Other,
        }
    }
}

impl fmt::Debug for RuleElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleElement::Callable(_) => f.write_str("Callable(<Validator>)"),
            RuleElement::Sequence { head, args } => f
                .debug_struct("Sequence")
                .field("head", head)
                .field("args", args)
                .finish(),
            RuleElement::Token(token) => f.debug_tuple("Token").field(token).finish(),
            RuleElement::Other => f.write_str("Other"),
        }
    }
}

impl From<&str> for RuleElement {
    fn from(token: &str) -> Self {
        RuleElement::Token(token.to_string())
    }
}

impl From<String> for RuleElement {
    fn from(token: String) -> Self {
        RuleElement::Token(token)
    }
}

impl From<ValidatorRef> for RuleElement {
    fn from(validator: ValidatorRef) -> Self {
        RuleElement::Callable(validator)
    }
}

fn json_arg_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A raw rule declaration as written in a field definition
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Value")]
pub enum RuleDeclaration {
    /// No rules
    #[default]
    Empty,

    /// Pipe-delimited string, e.g. `"required|min:10"`
    Pipe(String),

    /// Ordered list of elements
    List(Vec<RuleElement>),
}

impl RuleDeclaration {
    /// Map dynamic data onto a declaration
    ///
    /// `null`, `false`, `0` and `""` are empty. Strings are pipe declarations
    /// and arrays are lists. Any other value declares no rules.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) if !s.is_empty() => RuleDeclaration::Pipe(s.clone()),
            Value::Array(items) => {
                RuleDeclaration::List(items.iter().map(RuleElement::from_json).collect())
            }
            _ => RuleDeclaration::Empty,
        }
    }

    /// Returns true when the declaration can contribute no rules
    pub fn is_empty(&self) -> bool {
        match self {
            RuleDeclaration::Empty => true,
            RuleDeclaration::Pipe(s) => s.is_empty(),
            RuleDeclaration::List(items) => items.is_empty(),
        }
    }
}

impl From<Value> for RuleDeclaration {
    fn from(value: Value) -> Self {
        RuleDeclaration::from_json(&value)
    }
}

impl From<&str> for RuleDeclaration {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            RuleDeclaration::Empty
        } else {
            RuleDeclaration::Pipe(s.to_string())
        }
    }
}

impl From<String> for RuleDeclaration {
    fn from(s: String) -> Self {
        if s.is_empty() {
            RuleDeclaration::Empty
        } else {
            RuleDeclaration::Pipe(s)
        }
    }
}

impl From<Vec<RuleElement>> for RuleDeclaration {
    fn from(items: Vec<RuleElement>) -> Self {
        RuleDeclaration::List(items)
    }
}

/// Parse a declaration into canonical rules, preserving declaration order
///
/// # Errors
///
/// Returns `RuleError::UnknownRule` when a string token names a rule the
/// registry does not contain. The whole declaration is rejected.
pub fn parse_rules<R>(decl: &RuleDeclaration, registry: &R) -> Result<Vec<CanonicalRule>, RuleError>
where
    R: RuleRegistry + ?Sized,
{
    let rules = match decl {
        RuleDeclaration::Empty => Vec::new(),
        RuleDeclaration::Pipe(s) if s.is_empty() => Vec::new(),
        RuleDeclaration::Pipe(s) => {
            let mut rules = Vec::new();
            for token in s.split(RULE_SEPARATOR) {
                if let Some(rule) = parse_token(token, registry)? {
                    rules.push(rule);
                }
            }
            rules
        }
        RuleDeclaration::List(items) => {
            let mut rules = Vec::with_capacity(items.len());
            for item in items {
                if let Some(rule) = parse_one(item, registry)? {
                    rules.push(rule);
                }
            }
            rules
        }
    };

    debug!(rules = rules.len(), "Parsed rule declaration");
    Ok(rules)
}

/// Parse a single list element
///
/// Returns `Ok(None)` for elements that are dropped.
///
/// # Errors
///
/// Returns `RuleError::UnknownRule` for a string token with an unknown name.
pub fn parse_one<R>(elem: &RuleElement, registry: &R) -> Result<Option<CanonicalRule>, RuleError>
where
    R: RuleRegistry + ?Sized,
{
    match elem {
        RuleElement::Callable(validator) => Ok(Some(CanonicalRule {
            validator: validator.clone(),
            args: Vec::new(),
            name: None,
            modifier: Modifier::None,
        })),
        RuleElement::Sequence { head, args } => Ok(parse_sequence(head, args, registry)),
        RuleElement::Token(token) => parse_token(token, registry),
        RuleElement::Other => {
            debug!("Dropped unsupported rule element");
            Ok(None)
        }
    }
}

fn parse_sequence<R>(head: &RuleHead, args: &[String], registry: &R) -> Option<CanonicalRule>
where
    R: RuleRegistry + ?Sized,
{
    match head {
        RuleHead::Name(raw_name) => {
            let (name, modifier) = resolve_modifier(raw_name);
            match registry.lookup(&name) {
                Lookup::Found(validator) => Some(CanonicalRule {
                    validator,
                    args: args.to_vec(),
                    name: Some(name),
                    modifier,
                }),
                Lookup::NotFound => {
                    warn!(rule = %raw_name, "Dropped sequence rule with unknown name");
                    None
                }
            }
        }
        RuleHead::Callable(validator) => Some(CanonicalRule {
            validator: validator.clone(),
            args: args.to_vec(),
            name: None,
            modifier: Modifier::None,
        }),
    }
}

fn parse_token<R>(token: &str, registry: &R) -> Result<Option<CanonicalRule>, RuleError>
where
    R: RuleRegistry + ?Sized,
{
    let (raw_name, raw_args) = match token.split_once(ARGS_SEPARATOR) {
        Some((name, args)) => (name, Some(args)),
        None => (token, None),
    };

    let (name, modifier) = resolve_modifier(raw_name);
    let validator = match registry.lookup(&name) {
        Lookup::Found(validator) => validator,
        Lookup::NotFound => {
            warn!(rule = %raw_name, "Unknown rule in declaration");
            return Err(RuleError::UnknownRule(raw_name.to_string()));
        }
    };

    let args = match raw_args {
        Some(raw_args) => raw_args.split(ARG_SEPARATOR).map(str::to_string).collect(),
        None => Vec::new(),
    };

    Ok(Some(CanonicalRule {
        validator,
        args,
        name: Some(name),
        modifier,
    }))
}
