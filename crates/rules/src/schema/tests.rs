//! Tests for schema types.

use super::*;
use crate::coerce::Coerced;

const STORED_RULE_JSON: &str = r##"
{
  "id": "6c0f8d3e-1",
  "value": 80,
  "operator": "gte",
  "background_color": "#F44336",
  "color": "#FFF",
  "opacity": 0.5
}
"##;

#[test]
fn parse_stored_rule() {
    let rule: ColorRule = serde_json::from_str(STORED_RULE_JSON).unwrap();
    assert_eq!(rule.id.as_str(), "6c0f8d3e-1");
    assert_eq!(rule.value, Some(80.0));
    assert_eq!(rule.operator, Some(ThresholdOperator::Gte));
    assert_eq!(rule.color("background_color"), Some("#F44336"));
    assert_eq!(rule.color("color"), Some("#FFF"));
    // Non-string extras survive but are not colors.
    assert_eq!(rule.color("opacity"), None);
    assert_eq!(rule.fields.len(), 3);
}

#[test]
fn serialize_keeps_unknown_fields_and_skips_unset() {
    let mut rule: ColorRule = serde_json::from_str(STORED_RULE_JSON).unwrap();
    rule.operator = None;
    let json = serde_json::to_value(&rule).unwrap();
    assert_eq!(json["opacity"], 0.5);
    assert!(json.get("operator").is_none());
    assert_eq!(json["value"], 80.0);
}

#[test]
fn parse_rule_without_value_or_operator() {
    let rule: ColorRule = serde_json::from_str(r#"{"id": "a"}"#).unwrap();
    assert_eq!(rule.value, None);
    assert_eq!(rule.effective_value(), 0.0);
    assert!(rule.operator.is_none());
}

#[test]
fn parse_rule_from_yaml() {
    let rule: ColorRule = serde_yaml::from_str(
        r#"
id: r1
value: 12.5
operator: lt
background_color: green
"#,
    )
    .unwrap();
    assert_eq!(rule.operator, Some(ThresholdOperator::Lt));
    assert_eq!(rule.value, Some(12.5));
    assert_eq!(rule.color("background_color"), Some("green"));
}

#[test]
fn unknown_operator_is_rejected() {
    let result: Result<ColorRule, _> = serde_json::from_str(r#"{"id": "a", "operator": "eq"}"#);
    assert!(result.is_err());
}

#[test]
fn new_rule_has_defaults() {
    let rule = ColorRule::new();
    assert_eq!(rule.value, Some(0.0));
    assert!(rule.operator.is_none());
    assert!(rule.fields.is_empty());
}

#[test]
fn operator_tokens_round_trip_through_from_str() {
    for op in ThresholdOperator::ALL {
        assert_eq!(op.as_str().parse::<ThresholdOperator>().unwrap(), op);
        assert_eq!(op.to_string(), op.as_str());
    }
    assert!("neq".parse::<ThresholdOperator>().is_err());
}

#[test]
fn operator_compare() {
    let cases = [
        (ThresholdOperator::Gt, 10.0, false),
        (ThresholdOperator::Gt, 9.0, true),
        (ThresholdOperator::Gte, 10.0, true),
        (ThresholdOperator::Lt, 10.0, false),
        (ThresholdOperator::Lt, 11.0, true),
        (ThresholdOperator::Lte, 10.0, true),
    ];
    for (op, threshold, expected) in cases {
        assert_eq!(op.compare(10.0, threshold), expected, "10 {} {}", op, threshold);
    }
}

#[test]
fn with_field_replaces_and_leaves_original_untouched() {
    let rule: ColorRule = serde_json::from_str(STORED_RULE_JSON).unwrap();
    let next = rule.with_field("color", Coerced::Text("#000".into()));
    assert_eq!(next.color("color"), Some("#000"));
    assert_eq!(rule.color("color"), Some("#FFF"));
    assert_eq!(next.id, rule.id);

    let cleared = next.with_field("color", Coerced::Unset);
    assert!(!cleared.fields.contains_key("color"));
}

#[test]
fn with_field_mistyped_value_becomes_unset() {
    let rule: ColorRule = serde_json::from_str(STORED_RULE_JSON).unwrap();
    let next = rule.with_field("value", Coerced::Text("80".into()));
    assert_eq!(next.value, None);

    let next = rule.with_field("operator", Coerced::Text("lt".into()));
    assert_eq!(next.operator, Some(ThresholdOperator::Lt));
    let next = rule.with_field("operator", Coerced::Number(1.0));
    assert_eq!(next.operator, None);
}

#[test]
fn with_field_never_changes_id() {
    let rule = ColorRule::new();
    let next = rule.with_field("id", Coerced::Text("other".into()));
    assert_eq!(next, rule);
}
