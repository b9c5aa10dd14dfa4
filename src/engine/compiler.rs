#![forbid(unsafe_code)]

//! Compilation of field declarations into execution plans
//!
//! This module provides the PlanCompiler, which runs every configured field
//! declaration through the parser and the bail grouper in parallel using
//! rayon.

use crate::error::RuleError;
use crate::rules::{
    RuleDeclaration, RuleGroup, RuleRegistry, ValidatorRegistry, group_bails, parse_rules,
};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Parse a declaration and group it for execution
///
/// # Errors
///
/// Returns `RuleError::UnknownRule` if a string token names an unknown rule.
pub fn compile_rules<R>(decl: &RuleDeclaration, registry: &R) -> Result<Vec<RuleGroup>, RuleError>
where
    R: RuleRegistry + ?Sized,
{
    let rules = parse_rules(decl, registry)?;
    Ok(group_bails(&rules))
}

/// The compiled plan for one field
#[derive(Debug, Clone)]
pub struct FieldPlan {
    /// Field path, as declared
    pub field: String,

    /// Groups in execution order
    pub groups: Vec<RuleGroup>,
}

impl FieldPlan {
    /// Total number of rules across all groups
    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(RuleGroup::len).sum()
    }
}

/// A field whose declaration failed to compile
#[derive(Debug)]
pub struct FieldError {
    pub field: String,
    pub error: RuleError,
}

/// Result of compiling a set of fields
#[derive(Debug, Default)]
pub struct CompileResult {
    /// Successfully compiled fields, sorted by field
    pub plans: Vec<FieldPlan>,

    /// Fields that failed, sorted by field
    pub errors: Vec<FieldError>,
}

impl CompileResult {
    /// True when every field compiled
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Look up the plan for a field
    pub fn plan(&self, field: &str) -> Option<&FieldPlan> {
        self.plans.iter().find(|plan| plan.field == field)
    }
}

/// Compiles declarations against a shared registry
pub struct PlanCompiler {
    registry: Arc<ValidatorRegistry>,
}

impl PlanCompiler {
    /// Creates a new PlanCompiler owning the provided registry
    pub fn new(registry: ValidatorRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Creates a PlanCompiler sharing an existing registry
    pub fn with_shared(registry: Arc<ValidatorRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Compile a single declaration
    ///
    /// # Errors
    ///
    /// Returns `RuleError::UnknownRule` if a string token names an unknown rule.
    pub fn compile(&self, decl: &RuleDeclaration) -> Result<Vec<RuleGroup>, RuleError> {
        compile_rules(decl, self.registry.as_ref())
    }

    /// Compile every field declaration
    ///
    /// Fields compile independently: an unknown rule aborts only the field
    /// it appears in and is reported in [`CompileResult::errors`].
    pub fn compile_fields(&self, fields: &BTreeMap<String, RuleDeclaration>) -> CompileResult {
        let outcomes: Vec<(String, Result<Vec<RuleGroup>, RuleError>)> = fields
            .par_iter()
            .map(|(field, decl)| (field.clone(), self.compile(decl)))
            .collect();

        let mut result = CompileResult::default();
        for (field, outcome) in outcomes {
            match outcome {
                Ok(groups) => {
                    debug!(field = %field, groups = groups.len(), "Compiled field");
                    result.plans.push(FieldPlan { field, groups });
                }
                Err(error) => {
                    warn!(field = %field, error = %error, "Failed to compile field");
                    result.errors.push(FieldError { field, error });
                }
            }
        }

        result.plans.sort_by(|a, b| a.field.cmp(&b.field));
        result.errors.sort_by(|a, b| a.field.cmp(&b.field));

        info!(
            fields = fields.len(),
            compiled = result.plans.len(),
            failed = result.errors.len(),
            "Compiled field plans"
        );
        result
    }
}
