//! In-memory draft types for the wizard session
//!
//! Drafts are owned exclusively by the active session and discarded when the
//! wizard closes or the final commit succeeds; nothing here touches the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::RecordId;

/// Whether the primary step creates a new entity or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftMode {
    #[default]
    Create,
    Edit,
}

/// In-progress representation of the primary record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDraft {
    /// Field name -> value, typed per the category's field specs
    pub values: Map<String, Value>,
    /// Field name -> validation message from the last failed validation
    pub errors: Map<String, Value>,
    pub mode: DraftMode,
}

impl EntityDraft {
    pub fn new(mode: DraftMode) -> Self {
        Self {
            values: Map::new(),
            errors: Map::new(),
            mode,
        }
    }

    /// Seed the draft from an existing record (edit mode)
    pub fn from_record(values: Map<String, Value>) -> Self {
        Self {
            values,
            errors: Map::new(),
            mode: DraftMode::Edit,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.values.insert(field.to_string(), value);
        self.errors.remove(field);
    }

    pub fn get_str(&self, field: &str) -> &str {
        self.values.get(field).and_then(Value::as_str).unwrap_or("")
    }

    /// True for switch fields flipped on
    pub fn is_on(&self, field: &str) -> bool {
        self.values
            .get(field)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// One staged child record (price entry, location, photo, ...)
///
/// New rows carry a session-local draft id; rows loaded from the server in
/// edit mode keep their server id, so removal and updates address either.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildDraftItem {
    /// Draft id for new rows, server id for already-persisted ones
    pub id: RecordId,
    /// Sub-field name -> value, shaped like the child endpoint's payload
    pub fields: Map<String, Value>,
    /// At most one item per collection may carry this flag
    pub principal: bool,
    pub created_at: DateTime<Utc>,
}

impl ChildDraftItem {
    pub fn new(id: RecordId, fields: Map<String, Value>) -> Self {
        Self {
            id,
            fields,
            principal: false,
            created_at: Utc::now(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}
