//! Binding between a rule collection and the panel model that owns it.
//!
//! Panel models are free-form JSON objects; the collection lives under a
//! named field. Writes never modify the given model: they return a new one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vizkit_core::{Result, VizkitError};

use crate::collection::{self, CollectionAction};
use crate::schema::ColorRule;

/// The message an editor sends its owner: "field `name` is now `rules`".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPatch {
    pub name: String,
    pub rules: Vec<ColorRule>,
}

impl ModelPatch {
    pub fn new(name: impl Into<String>, rules: Vec<ColorRule>) -> Self {
        Self { name: name.into(), rules }
    }

    /// The model with this patch applied.
    pub fn apply_to(&self, model: &serde_json::Value) -> Result<serde_json::Value> {
        write_rules(model, &self.name, &self.rules)
    }
}

/// Read the collection under `name`. `None` when the field is missing or null.
pub fn read_rules(model: &serde_json::Value, name: &str) -> Result<Option<Vec<ColorRule>>> {
    match model.get(name) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v @ serde_json::Value::Array(_)) => {
            let rules = serde_json::from_value(v.clone())?;
            Ok(Some(rules))
        }
        Some(_) => Err(VizkitError::NotACollection(name.to_string())),
    }
}

/// Copy of `model` with `rules` stored under `name`.
pub fn write_rules(model: &serde_json::Value, name: &str, rules: &[ColorRule]) -> Result<serde_json::Value> {
    let mut next = model.clone();
    let object = next
        .as_object_mut()
        .ok_or_else(|| VizkitError::Other("panel model must be a JSON object".to_string()))?;
    object.insert(name.to_string(), serde_json::to_value(rules)?);
    Ok(next)
}

/// Apply `action` to the collection under `name`, returning the patch the
/// owner should adopt. A missing collection is edited as an empty one.
pub fn propose(model: &serde_json::Value, name: &str, action: &CollectionAction) -> Result<ModelPatch> {
    let current = read_rules(model, name)?.unwrap_or_default();
    if let CollectionAction::Update { id, .. } | CollectionAction::Delete { id } = action {
        if !current.iter().any(|r| &r.id == id) {
            debug!(field = name, id = %id, "action targets a rule that is not in the collection");
        }
    }
    Ok(ModelPatch::new(name, collection::apply(&current, action)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn panel() -> serde_json::Value {
        json!({
            "id": "panel-1",
            "type": "metric",
            "color_rules": [
                {"id": "a", "value": 10, "operator": "gte", "background_color": "red"},
                {"id": "b", "value": 0}
            ]
        })
    }

    #[test]
    fn read_existing_collection() {
        let rules = read_rules(&panel(), "color_rules").unwrap().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].color("background_color"), Some("red"));
    }

    #[test]
    fn read_missing_or_null_is_none() {
        assert!(read_rules(&panel(), "bar_color_rules").unwrap().is_none());
        assert!(read_rules(&json!({"color_rules": null}), "color_rules").unwrap().is_none());
    }

    #[test]
    fn read_non_array_is_error() {
        let err = read_rules(&json!({"color_rules": {"id": "a"}}), "color_rules").unwrap_err();
        assert!(matches!(err, VizkitError::NotACollection(ref f) if f == "color_rules"));
    }

    #[test]
    fn patch_leaves_source_model_untouched() {
        let model = panel();
        let patch = propose(&model, "color_rules", &CollectionAction::Delete { id: "a".into() }).unwrap();
        let next = patch.apply_to(&model).unwrap();
        assert_eq!(next["color_rules"].as_array().unwrap().len(), 1);
        assert_eq!(model["color_rules"].as_array().unwrap().len(), 2);
        assert_eq!(next["type"], "metric");
    }

    #[test]
    fn propose_on_missing_collection_starts_empty() {
        let patch = propose(&json!({}), "color_rules", &CollectionAction::Add { after: "x".into() }).unwrap();
        assert_eq!(patch.rules.len(), 1);
        assert_eq!(patch.name, "color_rules");
    }

    #[test]
    fn write_into_non_object_fails() {
        assert!(write_rules(&json!([1, 2]), "color_rules", &[]).is_err());
    }
}
