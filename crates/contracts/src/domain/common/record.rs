//! Entity record wrapper
//!
//! The composer is schema-driven, so entities travel as JSON objects whose
//! field names come from each category's `FieldSpec` list. `EntityRecord`
//! wraps the object and exposes the accessors the engine needs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord(pub Map<String, Value>);

impl EntityRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value; non-objects yield an empty record
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }

    /// Server-assigned id, when present
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_string(), value);
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl Default for EntityRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Map<String, Value>> for EntityRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_and_fields() {
        let rec = EntityRecord::from_value(json!({"id": 42, "nombre": "Test Item"}));
        assert_eq!(rec.id(), Some(42));
        assert_eq!(rec.get("nombre"), Some(&json!("Test Item")));
        assert_eq!(rec.get("ausente"), None);
    }

    #[test]
    fn non_object_becomes_empty() {
        let rec = EntityRecord::from_value(json!([1, 2, 3]));
        assert!(rec.as_map().is_empty());
        assert_eq!(rec.id(), None);
    }
}
