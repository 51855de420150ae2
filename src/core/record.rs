//! Stored record type shared by every entity kind

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::identity::{EntityKind, RecordId};

/// A single field value
///
/// Serialized untagged so stored records read as plain JSON objects:
/// numbers stay numbers, text stays strings, an empty numeric cell is `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Empty,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 Display is the shortest repr that parses back exactly
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Empty => Ok(()),
        }
    }
}

/// One stored record of any entity kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub created: DateTime<Utc>,
    /// Values keyed by canonical schema field name
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record with a fresh ID
    pub fn new(kind: EntityKind) -> Self {
        Self {
            id: RecordId::new(kind),
            created: Utc::now(),
            fields: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.id.kind()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Field rendered as text; missing fields render empty
    pub fn get_display(&self, field: &str) -> String {
        self.fields
            .get(field)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    /// Builder-style setter, mostly for tests and fixtures
    pub fn with(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.set(field, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() {
        let record = Record::new(EntityKind::Product)
            .with("name", FieldValue::Text("Widget".to_string()))
            .with("price", FieldValue::Number(19.99))
            .with("agent_price", FieldValue::Empty);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fields"]["name"], "Widget");
        assert_eq!(json["fields"]["price"], 19.99);
        assert!(json["fields"]["agent_price"].is_null());
        assert!(json["id"].as_str().unwrap().starts_with("PRD-"));

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_integral_number_deserializes_as_number() {
        let value: FieldValue = serde_json::from_str("20").unwrap();
        assert_eq!(value, FieldValue::Number(20.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Number(19.99).to_string(), "19.99");
        assert_eq!(FieldValue::Number(20.0).to_string(), "20");
        assert_eq!(FieldValue::Text("a,b".into()).to_string(), "a,b");
        assert_eq!(FieldValue::Empty.to_string(), "");
    }

    #[test]
    fn test_get_display_missing_field() {
        let record = Record::new(EntityKind::Customer);
        assert_eq!(record.get_display("contact"), "");
        assert!(record.get("contact").is_none());
    }
}
