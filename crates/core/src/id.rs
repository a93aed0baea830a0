use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a rule record.
///
/// Ids read from an existing model are kept verbatim (older panels carry
/// arbitrary strings); new ids are random v4 UUIDs, so an id is never handed
/// out twice even after the record that held it is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Mint a fresh id.
    pub fn generate() -> Self {
        RuleId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RuleId {
    fn from(s: &str) -> Self {
        RuleId(s.to_string())
    }
}

impl From<String> for RuleId {
    fn from(s: String) -> Self {
        RuleId(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let a = RuleId::generate();
        let b = RuleId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = RuleId::from("c0ffee");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c0ffee\"");
        let back: RuleId = serde_json::from_str("\"c0ffee\"").unwrap();
        assert_eq!(back, id);
    }
}
