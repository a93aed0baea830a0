//! Per-row display state derived from a rule collection.

use serde::Serialize;

use vizkit_core::RuleId;

use crate::editor::EditorOptions;
use crate::schema::{ColorRule, ThresholdOperator};

/// An entry of the operator picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatorOption {
    pub label: &'static str,
    pub value: ThresholdOperator,
}

impl From<ThresholdOperator> for OperatorOption {
    fn from(op: ThresholdOperator) -> Self {
        Self { label: op.label(), value: op }
    }
}

/// Options the operator picker offers, in display order.
pub fn operator_options() -> Vec<OperatorOption> {
    ThresholdOperator::ALL.into_iter().map(OperatorOption::from).collect()
}

/// A color slot as shown next to its label ("Set background to").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorSlot {
    pub label: String,
    pub var_name: String,
    pub value: Option<String>,
}

/// Everything a row's widgets need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub id: RuleId,
    pub value: f64,
    pub selected_operator: Option<OperatorOption>,
    pub primary: ColorSlot,
    /// Absent when the secondary slot is hidden.
    pub secondary: Option<ColorSlot>,
    pub delete_disabled: bool,
    /// Id of the operator picker, for its label's `for` attribute.
    pub operator_html_id: String,
}

/// `<prefix>_<suffix>`, matching the html ids the console generates.
pub fn html_id(prefix: &RuleId, suffix: &str) -> String {
    format!("{}_{}", prefix, suffix)
}

/// Rows for `rules`, in collection order.
pub fn render_rules(rules: &[ColorRule], options: &EditorOptions) -> Vec<RowView> {
    let delete_disabled = rules.len() < 2;
    rules
        .iter()
        .map(|rule| RowView {
            id: rule.id.clone(),
            value: rule.effective_value(),
            selected_operator: rule.operator.map(OperatorOption::from),
            primary: ColorSlot {
                label: format!("Set {} to", options.primary_name),
                var_name: options.primary_var_name.clone(),
                value: rule.color(&options.primary_var_name).map(str::to_string),
            },
            secondary: (!options.hide_secondary).then(|| ColorSlot {
                label: format!("and {} to", options.secondary_name),
                var_name: options.secondary_var_name.clone(),
                value: rule.color(&options.secondary_var_name).map(str::to_string),
            }),
            delete_disabled,
            operator_html_id: html_id(&rule.id, "ifMetricIs"),
        })
        .collect()
}

/// Rows for the collection under `options.name` of a panel model. A model
/// without that field renders nothing.
pub fn render_rows(model: &serde_json::Value, options: &EditorOptions) -> vizkit_core::Result<Vec<RowView>> {
    let rules = crate::model::read_rules(model, &options.name)?;
    Ok(rules
        .map(|r| render_rules(&r, options))
        .unwrap_or_default())
}
