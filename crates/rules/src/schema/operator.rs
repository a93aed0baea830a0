//! Comparison operators a color rule can test a metric with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators for threshold rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdOperator {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl ThresholdOperator {
    /// Every operator in the order the operator picker lists them.
    pub const ALL: [ThresholdOperator; 4] = [
        ThresholdOperator::Gt,
        ThresholdOperator::Gte,
        ThresholdOperator::Lt,
        ThresholdOperator::Lte,
    ];

    /// Wire token, as stored in the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdOperator::Gt => "gt",
            ThresholdOperator::Gte => "gte",
            ThresholdOperator::Lt => "lt",
            ThresholdOperator::Lte => "lte",
        }
    }

    /// Human-readable label shown in the operator picker.
    pub fn label(&self) -> &'static str {
        match self {
            ThresholdOperator::Gt => "> greater than",
            ThresholdOperator::Gte => ">= greater than or equal",
            ThresholdOperator::Lt => "< less than",
            ThresholdOperator::Lte => "<= less than or equal",
        }
    }

    /// `metric <op> threshold`.
    pub fn compare(&self, metric: f64, threshold: f64) -> bool {
        match self {
            ThresholdOperator::Gt => metric > threshold,
            ThresholdOperator::Gte => metric >= threshold,
            ThresholdOperator::Lt => metric < threshold,
            ThresholdOperator::Lte => metric <= threshold,
        }
    }
}

impl fmt::Display for ThresholdOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ThresholdOperator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "gt" => Ok(ThresholdOperator::Gt),
            "gte" => Ok(ThresholdOperator::Gte),
            "lt" => Ok(ThresholdOperator::Lt),
            "lte" => Ok(ThresholdOperator::Lte),
            other => Err(format!("unknown operator: '{}'", other)),
        }
    }
}
