//! Resolve the colors a metric value gets from a rule collection.
//!
//! Rules are walked in collection order. A rule takes part only when both its
//! operator and its value are set; every participating rule whose comparison
//! holds overrides the colors picked so far, so the last match wins.

use serde::Serialize;

use crate::editor::EditorOptions;
use crate::schema::ColorRule;

/// Colors picked for one metric value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    /// Id of the rule that supplied the colors.
    pub matched_rule: Option<String>,
}

pub fn resolve_colors(rules: &[ColorRule], metric: f64, options: &EditorOptions) -> ResolvedColors {
    let mut resolved = ResolvedColors::default();

    for rule in rules {
        let (operator, threshold) = match (rule.operator, rule.value) {
            (Some(op), Some(v)) => (op, v),
            _ => continue,
        };

        if operator.compare(metric, threshold) {
            resolved = ResolvedColors {
                primary: rule.color(&options.primary_var_name).map(str::to_string),
                secondary: if options.hide_secondary {
                    None
                } else {
                    rule.color(&options.secondary_var_name).map(str::to_string)
                },
                matched_rule: Some(rule.id.to_string()),
            };
        }
    }

    resolved
}
