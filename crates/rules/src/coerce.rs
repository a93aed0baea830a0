//! Typed coercion of raw widget input into rule field values.
//!
//! Form widgets hand back either nothing (a cleared combo box) or a string.
//! Each rule field is fed through one of a fixed set of coercers which
//! either produce a typed value or `Unset`. Unset is what gets stored when
//! the input is missing, is the literal `"undefined"`, or does not survive
//! the cast; a NaN or the string `"undefined"` never reaches the model.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::schema::ThresholdOperator;

/// Token some widgets emit for a cleared selection.
const UNDEFINED_TOKEN: &str = "undefined";

/// Result of coercing one raw input.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Number(f64),
    Text(String),
    Operator(ThresholdOperator),
    Unset,
}

impl Coerced {
    pub fn is_unset(&self) -> bool {
        matches!(self, Coerced::Unset)
    }

    /// JSON form for untyped record fields; `None` for unset.
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            Coerced::Number(n) => serde_json::Number::from_f64(n).map(serde_json::Value::Number),
            Coerced::Text(t) => Some(serde_json::Value::String(t)),
            Coerced::Operator(op) => Some(serde_json::Value::String(op.as_str().to_string())),
            Coerced::Unset => None,
        }
    }
}

/// The coercers a field update can be run through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCoercer {
    Numeric,
    Text,
    Operator,
}

impl FieldCoercer {
    /// Coercer the console uses for a given field.
    pub fn for_field(field: &str) -> Self {
        match field {
            "value" => FieldCoercer::Numeric,
            "operator" => FieldCoercer::Operator,
            _ => FieldCoercer::Text,
        }
    }

    pub fn coerce(&self, raw: Option<&str>) -> Coerced {
        let raw = match raw {
            Some(r) if r != UNDEFINED_TOKEN => r,
            _ => return Coerced::Unset,
        };

        match self {
            FieldCoercer::Numeric => coerce_number(raw),
            FieldCoercer::Text => Coerced::Text(raw.to_string()),
            FieldCoercer::Operator => match raw.parse::<ThresholdOperator>() {
                Ok(op) => Coerced::Operator(op),
                Err(e) => {
                    warn!(input = %raw, error = %e, "dropping operator input");
                    Coerced::Unset
                }
            },
        }
    }
}

/// A blank field means zero, as a cleared number input does in the console.
/// Unsigned `0x`/`0o`/`0b` literals are read in their radix.
fn coerce_number(raw: &str) -> Coerced {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Coerced::Number(0.0);
    }
    if let Some(n) = parse_radix_literal(trimmed) {
        return Coerced::Number(n);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Coerced::Number(n),
        _ => Coerced::Unset,
    }
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let prefix = s.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return None;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d)))
        .filter(|n| n.is_finite())
}
