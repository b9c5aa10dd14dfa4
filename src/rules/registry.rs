#![forbid(unsafe_code)]

//! Rule registry: the closed vocabulary of validator names
//!
//! The parser only needs membership checks and lookups, expressed by the
//! [`RuleRegistry`] trait. [`ValidatorRegistry`] is the concrete registry
//! used by the compiler and the CLI. It is responsible for:
//! - Registering the builtin validators
//! - Loading custom regex rules from configuration
//! - Disabling rules the configuration turns off

use crate::config::ruleplan_toml::{Config, RulesConfig};
use crate::error::RuleError;
use crate::rules::builtin::BUILTINS;
use crate::rules::camelize;
use crate::rules::regex_rule::{CustomRuleDefinition, RegexValidator};
use crate::rules::rule::ValidatorRef;
use crate::types::RuleSource;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of looking a rule name up in a registry
#[derive(Clone)]
pub enum Lookup {
    Found(ValidatorRef),
    NotFound,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn into_option(self) -> Option<ValidatorRef> {
        match self {
            Lookup::Found(validator) => Some(validator),
            Lookup::NotFound => None,
        }
    }
}

impl std::fmt::Debug for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::Found(_) => f.write_str("Found(<Validator>)"),
            Lookup::NotFound => f.write_str("NotFound"),
        }
    }
}

/// A mapping from normalized rule name to validator
pub trait RuleRegistry {
    /// Look up a normalized (camelCase, modifier-free) rule name
    fn lookup(&self, name: &str) -> Lookup;

    /// Returns true if `name` is registered
    fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_found()
    }
}

impl RuleRegistry for HashMap<String, ValidatorRef> {
    fn lookup(&self, name: &str) -> Lookup {
        match self.get(name) {
            Some(validator) => Lookup::Found(Arc::clone(validator)),
            None => Lookup::NotFound,
        }
    }
}

/// A registered validator plus the metadata shown by `ruleplan list`
#[derive(Clone)]
pub struct RegisteredRule {
    pub name: String,
    pub validator: ValidatorRef,
    pub source: RuleSource,
    pub description: String,
}

impl std::fmt::Debug for RegisteredRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredRule")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("description", &self.description)
            .finish()
    }
}

/// Registry for storing and managing validators by name
#[derive(Debug, Clone, Default)]
pub struct ValidatorRegistry {
    rules: HashMap<String, RegisteredRule>,
}

impl ValidatorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Create a registry holding every builtin validator
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for &(name, description, make) in BUILTINS {
            registry.register_with(name, make(), RuleSource::Builtin, description);
        }
        registry
    }

    /// Build a registry from configuration
    ///
    /// Starts from the builtins, drops the ones the configuration disables,
    /// then adds the configured custom rules.
    ///
    /// # Errors
    ///
    /// Returns `RuleError` if a custom rule is invalid or collides with an
    /// enabled rule name.
    pub fn build_from_config(config: &Config) -> Result<Self, RuleError> {
        let mut registry = Self::with_builtins();
        registry.filter_by_config(&config.rules);
        registry.load_custom_rules(&config.rules.custom)?;
        debug!(rules = registry.len(), "Built rule registry");
        Ok(registry)
    }

    /// Register a custom validator under `name`, replacing any previous entry
    ///
    /// `name` is stored as given; the parser looks rules up by their
    /// camelCase form.
    pub fn register(&mut self, name: impl Into<String>, validator: ValidatorRef) -> Option<ValidatorRef> {
        self.register_with(name, validator, RuleSource::Custom, "")
    }

    /// Register a validator with explicit metadata
    pub fn register_with(
        &mut self,
        name: impl Into<String>,
        validator: ValidatorRef,
        source: RuleSource,
        description: &str,
    ) -> Option<ValidatorRef> {
        let name = name.into();
        let entry = RegisteredRule {
            name: name.clone(),
            validator,
            source,
            description: description.to_string(),
        };
        self.rules.insert(name, entry).map(|old| old.validator)
    }

    /// Remove a rule, returning its validator
    pub fn remove(&mut self, name: &str) -> Option<ValidatorRef> {
        self.rules.remove(name).map(|entry| entry.validator)
    }

    /// Load regex rules declared in configuration
    ///
    /// Names are normalized with [`camelize`] so that `postal_code` is
    /// reachable from declarations.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidRegex` for a bad pattern and
    /// `RuleError::InvalidDefinition` when the name is already registered.
    pub fn load_custom_rules(
        &mut self,
        custom: &BTreeMap<String, CustomRuleDefinition>,
    ) -> Result<(), RuleError> {
        for (raw_name, def) in custom {
            let name = camelize(raw_name);
            let rule = RegexValidator::from_definition(&name, def)?;

            if self.rules.contains_key(&name) {
                return Err(RuleError::InvalidDefinition(format!(
                    "Duplicate rule name '{}' in [rules.custom]",
                    name
                )));
            }

            let description = rule.description().to_string();
            self.register_with(name, Arc::new(rule), RuleSource::Custom, &description);
        }

        Ok(())
    }

    /// Remove rules disabled in configuration
    ///
    /// Rules are enabled by default unless explicitly set to `false`.
    pub fn filter_by_config(&mut self, config: &RulesConfig) {
        for (raw_name, enabled) in &config.builtin {
            if *enabled {
                continue;
            }
            let name = camelize(raw_name);
            if self.rules.remove(&name).is_none() {
                warn!(rule = %raw_name, "Cannot disable unknown rule");
            } else {
                debug!(rule = %name, "Disabled rule");
            }
        }
    }

    /// Get a rule entry by name
    pub fn get(&self, name: &str) -> Option<&RegisteredRule> {
        self.rules.get(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over all entries, sorted by name
    pub fn iter_rules(&self) -> impl Iterator<Item = &RegisteredRule> {
        let mut entries: Vec<&RegisteredRule> = self.rules.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries.into_iter()
    }

    /// Get the number of rules in the registry
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleRegistry for ValidatorRegistry {
    fn lookup(&self, name: &str) -> Lookup {
        match self.rules.get(name) {
            Some(entry) => Lookup::Found(Arc::clone(&entry.validator)),
            None => Lookup::NotFound,
        }
    }
}
