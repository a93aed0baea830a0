//! Callback-style editor over a rule collection owned by someone else.
//!
//! `RuleListEditor` borrows the owner's current collection and holds the
//! owner's change handler. Each operation computes the next collection with
//! the pure functions in [`crate::collection`] and hands it to the handler
//! exactly once. The editor keeps no state of its own between calls.

use serde::{Deserialize, Serialize};

use vizkit_core::RuleId;

use crate::coerce::{Coerced, FieldCoercer};
use crate::collection::{self, CollectionAction};
use crate::schema::ColorRule;

/// Display and binding options of a rule list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorOptions {
    /// Model field holding the collection.
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_primary_name")]
    pub primary_name: String,
    #[serde(default = "default_primary_var_name")]
    pub primary_var_name: String,
    #[serde(default = "default_secondary_name")]
    pub secondary_name: String,
    #[serde(default = "default_secondary_var_name")]
    pub secondary_var_name: String,
    #[serde(default)]
    pub hide_secondary: bool,
}

fn default_name() -> String {
    "color_rules".to_string()
}

fn default_primary_name() -> String {
    "background".to_string()
}

fn default_primary_var_name() -> String {
    "background_color".to_string()
}

fn default_secondary_name() -> String {
    "text".to_string()
}

fn default_secondary_var_name() -> String {
    "color".to_string()
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            name: default_name(),
            primary_name: default_primary_name(),
            primary_var_name: default_primary_var_name(),
            secondary_name: default_secondary_name(),
            secondary_var_name: default_secondary_var_name(),
            hide_secondary: false,
        }
    }
}

/// Editor bound to one collection snapshot and one change handler.
pub struct RuleListEditor<'a, F>
where
    F: FnMut(Vec<ColorRule>),
{
    rules: &'a [ColorRule],
    on_change: F,
}

impl<'a, F> RuleListEditor<'a, F>
where
    F: FnMut(Vec<ColorRule>),
{
    pub fn new(rules: &'a [ColorRule], on_change: F) -> Self {
        Self { rules, on_change }
    }

    /// Whether the delete control should be disabled for a row.
    pub fn delete_disabled(&self) -> bool {
        self.rules.len() < 2
    }

    /// Propose a collection with a default record inserted after `after`.
    pub fn add(&mut self, after: &RuleId) {
        self.dispatch(&CollectionAction::Add { after: after.clone() });
    }

    /// Propose a collection without `rule`.
    pub fn delete(&mut self, rule: &ColorRule) {
        self.dispatch(&CollectionAction::Delete { id: rule.id.clone() });
    }

    /// Propose a collection where `rule.field` holds `raw` coerced with `coercer`.
    pub fn update(&mut self, rule: &ColorRule, field: &str, raw: Option<&str>, coercer: FieldCoercer) {
        let next = collection::update(self.rules, &rule.id, field, raw, coercer);
        (self.on_change)(next);
    }

    /// [`Self::update`] with the coercer the field normally uses.
    pub fn update_field(&mut self, rule: &ColorRule, field: &str, raw: Option<&str>) {
        self.update(rule, field, raw, FieldCoercer::for_field(field));
    }

    /// Merge a color picker change (`None` clears a slot) into `rule`.
    pub fn update_colors<'p, I>(&mut self, rule: &ColorRule, part: I)
    where
        I: IntoIterator<Item = (&'p str, Option<&'p str>)>,
    {
        let merged = part.into_iter().fold(rule.clone(), |acc, (name, color)| {
            let value = match color {
                Some(c) => Coerced::Text(c.to_string()),
                None => Coerced::Unset,
            };
            acc.with_field(name, value)
        });
        let next = collection::replace(self.rules, &merged);
        (self.on_change)(next);
    }

    /// Apply an arbitrary action.
    pub fn dispatch(&mut self, action: &CollectionAction) {
        let next = collection::apply(self.rules, action);
        (self.on_change)(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ThresholdOperator;

    fn rules() -> Vec<ColorRule> {
        vec![
            ColorRule::with_id("a".into()),
            ColorRule::with_id("b".into()),
        ]
    }

    #[test]
    fn each_operation_emits_exactly_once() {
        let current = rules();
        let mut emitted: Vec<Vec<ColorRule>> = Vec::new();
        {
            let mut editor = RuleListEditor::new(&current, |next| emitted.push(next));
            editor.add(&"a".into());
            editor.delete(&current[0]);
            editor.update_field(&current[1], "operator", Some("gte"));
        }
        assert_eq!(emitted.len(), 3);
        assert_eq!(emitted[0].len(), 3);
        assert_eq!(emitted[1].len(), 1);
        assert_eq!(emitted[2][1].operator, Some(ThresholdOperator::Gte));
        // Owner's collection is untouched until it adopts a proposal.
        assert_eq!(current, rules());
    }

    #[test]
    fn owner_adopts_proposals() {
        let mut owned = rules();
        let mut proposal = None;
        RuleListEditor::new(&owned, |next| proposal = Some(next)).update(
            &owned[0],
            "value",
            Some("abc"),
            FieldCoercer::Numeric,
        );
        owned = proposal.unwrap();
        assert_eq!(owned[0].value, None);
    }

    #[test]
    fn color_part_merges_and_clears() {
        let mut start = rules();
        start[0] = start[0].with_field("color", Coerced::Text("#111".into()));
        let mut proposal = None;
        RuleListEditor::new(&start, |next| proposal = Some(next)).update_colors(
            &start[0],
            [("background_color", Some("#222")), ("color", None)],
        );
        let next = proposal.unwrap();
        assert_eq!(next[0].color("background_color"), Some("#222"));
        assert_eq!(next[0].color("color"), None);
    }

    #[test]
    fn delete_disabled_for_single_row() {
        let one = vec![ColorRule::with_id("a".into())];
        assert!(RuleListEditor::new(&one, |_| {}).delete_disabled());
        let two = rules();
        assert!(!RuleListEditor::new(&two, |_| {}).delete_disabled());
    }

    #[test]
    fn options_defaults_and_partial_deserialize() {
        let opts: EditorOptions =
            serde_json::from_str(r#"{"name": "bar_color_rules", "hide_secondary": true}"#).unwrap();
        assert_eq!(opts.name, "bar_color_rules");
        assert!(opts.hide_secondary);
        assert_eq!(opts.primary_var_name, EditorOptions::default().primary_var_name);
    }
}
