//! Draft accumulator for child collections
//!
//! Client-side staging lists for child records (prices, locations, photos,
//! presentation configs) that only hit the wire when their step commits.

use serde_json::{Map, Value};

use contracts::domain::catalog::ChildCollectionDef;
use contracts::domain::common::{ChildDraftItem, DraftId, EntityRecord, RecordId};

/// Monotonic per-session draft id source
#[derive(Debug, Default)]
pub struct DraftIdSequence {
    next: u64,
}

impl DraftIdSequence {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next_id(&mut self) -> DraftId {
        self.next += 1;
        DraftId(self.next)
    }
}

/// Staged items of one child collection, in insertion order
///
/// New rows enter through `add_item` with a fresh draft id; edit sessions
/// seed the list with already-persisted rows under their server ids, so
/// removal and updates address both kinds uniformly.
#[derive(Debug, Default)]
pub struct ChildDrafts {
    items: Vec<ChildDraftItem>,
}

impl ChildDrafts {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn items(&self) -> &[ChildDraftItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a candidate if its required sub-fields are filled in
    ///
    /// Rejection is a silent no-op, mirroring the add-row affordance in the
    /// forms: an incomplete row just stays in the input area. Returns the
    /// fresh draft id on success so the caller can clear its input buffer.
    pub fn add_item(
        &mut self,
        def: &ChildCollectionDef,
        candidate: Map<String, Value>,
        ids: &mut DraftIdSequence,
    ) -> Option<DraftId> {
        let complete = def
            .required_fields
            .iter()
            .all(|field| is_filled(candidate.get(*field)));
        if !complete {
            return None;
        }
        let id = ids.next_id();
        self.items.push(ChildDraftItem::new(id.into(), candidate));
        Some(id)
    }

    /// Stage rows that already exist on the server (edit mode)
    ///
    /// Records without an id are skipped. The principal flag is read off the
    /// collection's wire field so an existing principal keeps its mark.
    pub fn seed_persisted(&mut self, def: &ChildCollectionDef, records: Vec<EntityRecord>) {
        for record in records {
            let Some(id) = record.id() else {
                continue;
            };
            let mut item = ChildDraftItem::new(RecordId::Server(id), record.0);
            if def.has_principal {
                item.principal = item
                    .get(def.principal_field)
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
            }
            self.items.push(item);
        }
    }

    /// Remove by draft or server id; absent ids are ignored
    pub fn remove_item(&mut self, id: RecordId) {
        self.items.retain(|item| item.id != id);
    }

    /// Merge `patch` into an existing item; no-op when the id is absent
    pub fn update_item(&mut self, id: RecordId, patch: Map<String, Value>) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            for (key, value) in patch {
                item.fields.insert(key, value);
            }
        }
    }

    /// Mark one item principal, clearing the flag on every other item
    ///
    /// At most one item per collection carries the flag at any time.
    pub fn set_principal(&mut self, id: RecordId) {
        for item in &mut self.items {
            item.principal = item.id == id;
        }
    }

    pub fn principal(&self) -> Option<&ChildDraftItem> {
        self.items.iter().find(|item| item.principal)
    }
}

/// Required sub-fields must be non-empty / non-zero
pub(crate) fn is_filled(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            !trimmed.is_empty() && trimmed != "0"
        }
        Some(Value::Number(n)) => n.as_f64().map_or(false, |v| v != 0.0),
        Some(Value::Bool(_)) | Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
