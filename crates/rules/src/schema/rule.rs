//! The rule record stored in a panel model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use vizkit_core::RuleId;

use super::ThresholdOperator;
use crate::coerce::Coerced;

/// Value a row displays when its `value` is unset.
pub const DEFAULT_VALUE: f64 = 0.0;

/// One color rule: "set these colors if the metric is `<operator> <value>`".
///
/// `id`, `value` and `operator` are typed. Every other field of the stored
/// record (the color slots, plus anything a newer console wrote) lands in
/// `fields` so editing never drops data it does not understand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColorRule {
    pub id: RuleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<ThresholdOperator>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl ColorRule {
    /// A fresh record with default field values and a new id.
    pub fn new() -> Self {
        Self::with_id(RuleId::generate())
    }

    pub fn with_id(id: RuleId) -> Self {
        Self {
            id,
            value: Some(DEFAULT_VALUE),
            operator: None,
            fields: BTreeMap::new(),
        }
    }

    /// `value`, with unset treated as the default.
    pub fn effective_value(&self) -> f64 {
        self.value.unwrap_or(DEFAULT_VALUE)
    }

    /// String field such as a color slot; `None` when unset or not a string.
    pub fn color(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }

    /// Return a copy of this record with `field` replaced.
    ///
    /// Unset removes the field. A coerced value whose type does not fit the
    /// typed slot it targets is stored as unset too. `id` is immutable.
    pub fn with_field(&self, field: &str, value: Coerced) -> ColorRule {
        let mut next = self.clone();
        match field {
            "id" => {
                warn!(rule_id = %self.id, "ignoring update of immutable field 'id'");
            }
            "value" => {
                next.value = match value {
                    Coerced::Number(n) => Some(n),
                    _ => None,
                };
            }
            "operator" => {
                next.operator = match value {
                    Coerced::Operator(op) => Some(op),
                    Coerced::Text(t) => t.parse().ok(),
                    _ => None,
                };
            }
            other => match value.into_json() {
                Some(v) => {
                    next.fields.insert(other.to_string(), v);
                }
                None => {
                    next.fields.remove(other);
                }
            },
        }
        next
    }
}

impl Default for ColorRule {
    fn default() -> Self {
        Self::new()
    }
}
