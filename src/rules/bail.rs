#![forbid(unsafe_code)]

//! Partitioning of canonical rules into bail-aware groups
//!
//! Two short-circuit mechanisms compose here:
//! 1. The global `bail` keyword. Rules before it form one non-halting group;
//!    every rule after it becomes its own halting group. The keyword itself
//!    is dropped.
//! 2. The per-rule `^` modifier. Inside each group from step 1, the first
//!    `^` rule is split out as a halting singleton. The rules before and
//!    after it are split the same way, keeping the inherited flag.
//!
//! Grouping never reorders rules and never produces an empty group.

use crate::rules::rule::{CanonicalRule, RuleGroup};
use tracing::debug;

/// Group canonical rules for execution
pub fn group_bails(rules: &[CanonicalRule]) -> Vec<RuleGroup> {
    let mut groups = Vec::new();

    match rules.iter().position(CanonicalRule::is_bail_keyword) {
        Some(keyword) => {
            split_on_modifier(&rules[..keyword], false, &mut groups);
            for rule in &rules[keyword + 1..] {
                split_on_modifier(std::slice::from_ref(rule), true, &mut groups);
            }
        }
        None => split_on_modifier(rules, false, &mut groups),
    }

    debug!(
        rules = rules.len(),
        groups = groups.len(),
        "Grouped rules for execution"
    );
    groups
}

/// Emit `rules` as one or more groups, splitting around the first `^` rule
fn split_on_modifier(rules: &[CanonicalRule], parent_bail: bool, out: &mut Vec<RuleGroup>) {
    if rules.is_empty() {
        return;
    }

    if rules.len() < 2 {
        out.push(RuleGroup::new(rules.to_vec(), parent_bail));
        return;
    }

    match rules.iter().position(|rule| rule.modifier.is_bail()) {
        Some(split) => {
            split_on_modifier(&rules[..split], parent_bail, out);
            out.push(RuleGroup::new(vec![rules[split].clone()], true));
            split_on_modifier(&rules[split + 1..], parent_bail, out);
        }
        None => out.push(RuleGroup::new(rules.to_vec(), parent_bail)),
    }
}
