//! Copy-on-write actions over an ordered rule collection.
//!
//! Every action takes the current collection by reference and returns the
//! proposed next collection. The input is never touched; the owner decides
//! whether to adopt the result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vizkit_core::RuleId;

use crate::coerce::FieldCoercer;
use crate::schema::ColorRule;

/// One edit of a rule collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CollectionAction {
    /// Insert a default record right after `after`.
    Add { after: RuleId },
    /// Remove the record with `id`.
    Delete { id: RuleId },
    /// Coerce `raw` and store it under `field` of the record with `id`.
    Update {
        id: RuleId,
        field: String,
        raw: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coercer: Option<FieldCoercer>,
    },
}

/// Apply `action` to `rules`, returning the proposed collection.
pub fn apply(rules: &[ColorRule], action: &CollectionAction) -> Vec<ColorRule> {
    match action {
        CollectionAction::Add { after } => add_after(rules, after, ColorRule::new()),
        CollectionAction::Delete { id } => delete(rules, id),
        CollectionAction::Update { id, field, raw, coercer } => {
            let coercer = coercer.unwrap_or_else(|| FieldCoercer::for_field(field));
            update(rules, id, field, raw.as_deref(), coercer)
        }
    }
}

/// Insert `rule` immediately after the record with id `after`; appended when
/// no record has that id.
pub fn add_after(rules: &[ColorRule], after: &RuleId, rule: ColorRule) -> Vec<ColorRule> {
    let position = rules
        .iter()
        .position(|r| &r.id == after)
        .map(|i| i + 1)
        .unwrap_or(rules.len());

    debug!(after = %after, new_id = %rule.id, position, "adding rule");

    let mut next = Vec::with_capacity(rules.len() + 1);
    next.extend_from_slice(&rules[..position]);
    next.push(rule);
    next.extend_from_slice(&rules[position..]);
    next
}

/// Drop the record with `id`. Removing the last remaining record is allowed.
pub fn delete(rules: &[ColorRule], id: &RuleId) -> Vec<ColorRule> {
    debug!(id = %id, "deleting rule");
    rules.iter().filter(|r| &r.id != id).cloned().collect()
}

/// Replace the record with `id` by a copy whose `field` holds the coerced
/// `raw` input.
pub fn update(
    rules: &[ColorRule],
    id: &RuleId,
    field: &str,
    raw: Option<&str>,
    coercer: FieldCoercer,
) -> Vec<ColorRule> {
    let value = coercer.coerce(raw);
    debug!(id = %id, field, ?value, "updating rule field");
    rules
        .iter()
        .map(|r| {
            if &r.id == id {
                r.with_field(field, value.clone())
            } else {
                r.clone()
            }
        })
        .collect()
}

/// Replace the record sharing `rule`'s id with `rule`.
pub fn replace(rules: &[ColorRule], rule: &ColorRule) -> Vec<ColorRule> {
    rules
        .iter()
        .map(|r| if r.id == rule.id { rule.clone() } else { r.clone() })
        .collect()
}
