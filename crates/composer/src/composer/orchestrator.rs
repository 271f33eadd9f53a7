//! Commit orchestrator
//!
//! Turns drafts into API calls. The primary step creates or updates the
//! parent entity; secondary steps persist each accumulated child draft
//! sequentially against the parent id. Child creates are best-effort: one
//! item's failure never aborts the remaining items, but every per-item
//! outcome is returned so the caller can report them instead of swallowing
//! them into a bare boolean.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Number, Value};

use contracts::domain::catalog::{CategoryDef, ChildCollectionDef};
use contracts::domain::common::{
    ChildDraftItem, DraftId, DraftMode, EntityDraft, EntityRecord, RecordId,
};
use contracts::shared::metadata::{FieldKind, FieldSpec, InputFormat};
use contracts::{ComposerError, ComposerResult};

use crate::api::ApiRegistry;

/// Result of one child-item create
#[derive(Debug)]
pub struct ChildOutcome {
    pub draft_id: DraftId,
    pub result: ComposerResult<EntityRecord>,
}

/// Per-item outcomes of a secondary-step commit
#[derive(Debug, Default)]
pub struct ChildCommitReport {
    pub outcomes: Vec<ChildOutcome>,
}

impl ChildCommitReport {
    pub fn all_ok(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&DraftId, &ComposerError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.draft_id, e)))
    }
}

pub struct CommitOrchestrator {
    registry: Arc<ApiRegistry>,
    upload_pause: Duration,
}

impl CommitOrchestrator {
    pub fn new(registry: Arc<ApiRegistry>, upload_pause: Duration) -> Self {
        Self {
            registry,
            upload_pause,
        }
    }

    /// Create or update the primary entity
    ///
    /// Errors block the step entirely; the server message travels inside the
    /// returned `ComposerError` for the UI to surface verbatim.
    pub async fn commit_primary(
        &self,
        def: &'static CategoryDef,
        specs: &[FieldSpec],
        draft: &EntityDraft,
        parent_id: Option<i64>,
    ) -> ComposerResult<EntityRecord> {
        let api = self.registry.category(def.key)?;
        let payload = Value::Object(primary_payload(specs, draft));

        match draft.mode {
            DraftMode::Create => {
                let record = api.create(payload).await?;
                tracing::info!(category = def.key, id = ?record.id(), "primary created");
                Ok(record)
            }
            DraftMode::Edit => {
                let id = parent_id
                    .ok_or_else(|| ComposerError::internal("edit draft without an id"))?;
                let record = api.update(id, payload).await?;
                tracing::info!(category = def.key, id, "primary updated");
                Ok(record)
            }
        }
    }

    /// Persist every accumulated draft of one child collection
    ///
    /// Fails fast with `MISSING_PARENT_ID` before any call when the parent
    /// entity does not exist yet. Only draft-id items are created; rows
    /// seeded from the server already exist and are skipped. Items are
    /// created sequentially in insertion order; paced collections (photo
    /// uploads) sleep between calls. When the item carrying the principal
    /// flag fails, the flag advances to the next item in sequence so the
    /// collection never ends up with none marked.
    pub async fn commit_collection(
        &self,
        def: &'static CategoryDef,
        coll: &'static ChildCollectionDef,
        parent_id: Option<i64>,
        items: &[ChildDraftItem],
    ) -> ComposerResult<ChildCommitReport> {
        let Some(parent_id) = parent_id else {
            tracing::error!(category = def.key, collection = coll.key, "commit without parent id");
            return Err(ComposerError::missing_parent(def.key));
        };
        let api = self.registry.collection(def.key, coll.key)?;

        let drafts: Vec<&ChildDraftItem> = items.iter().filter(|i| i.id.is_draft()).collect();
        let mut principal_idx = if coll.has_principal && !drafts.is_empty() {
            if items.iter().any(|i| i.principal) {
                // a persisted row may hold the flag, then no draft defaults
                drafts.iter().position(|i| i.principal)
            } else {
                Some(0)
            }
        } else {
            None
        };

        let mut report = ChildCommitReport::default();
        for (idx, item) in drafts.iter().enumerate() {
            let RecordId::Draft(draft_id) = item.id else {
                continue;
            };
            let mut payload = item.fields.clone();
            for field in coll.decimal_fields {
                if let Some(value) = payload.get(*field) {
                    let coerced = coerce_decimal(value);
                    payload.insert((*field).to_string(), coerced);
                }
            }
            payload.insert(coll.parent_id_field.to_string(), Value::from(parent_id));
            if coll.has_principal {
                payload.insert(
                    coll.principal_field.to_string(),
                    Value::Bool(principal_idx == Some(idx)),
                );
            }

            let result = api.create(Value::Object(payload)).await;
            if let Err(err) = &result {
                tracing::warn!(
                    collection = coll.key,
                    draft_id = %draft_id,
                    %err,
                    "child create failed, continuing"
                );
                if principal_idx == Some(idx) {
                    // hand the principal flag to the next candidate
                    principal_idx = (idx + 1 < drafts.len()).then_some(idx + 1);
                }
            }
            report.outcomes.push(ChildOutcome { draft_id, result });

            if coll.paced && idx + 1 < drafts.len() && !self.upload_pause.is_zero() {
                tokio::time::sleep(self.upload_pause).await;
            }
        }
        Ok(report)
    }
}

/// Build the primary payload, coercing formatted number strings to numbers
fn primary_payload(specs: &[FieldSpec], draft: &EntityDraft) -> Map<String, Value> {
    let mut payload = Map::new();
    for (name, value) in &draft.values {
        let spec = specs.iter().find(|s| &s.name == name);
        let coerced = match spec {
            Some(spec) if spec.kind == FieldKind::Number => match spec.format {
                Some(InputFormat::Integer) => coerce_integer(value),
                Some(InputFormat::Decimal) | Some(InputFormat::Percentage) => {
                    coerce_decimal(value)
                }
                _ => value.clone(),
            },
            _ => value.clone(),
        };
        payload.insert(name.clone(), coerced);
    }
    payload
}

fn coerce_decimal(value: &Value) -> Value {
    match value {
        Value::String(s) => s
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| value.clone()),
        _ => value.clone(),
    }
}

fn coerce_integer(value: &Value) -> Value {
    match value {
        Value::String(s) => s
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| value.clone()),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::testing::MockCategoryApi;
    use serde_json::json;

    fn setup() -> (Arc<MockCategoryApi>, Arc<MockCategoryApi>, CommitOrchestrator) {
        let primary = Arc::new(MockCategoryApi::with_first_id(42));
        let children = Arc::new(MockCategoryApi::with_first_id(500));
        let mut registry = ApiRegistry::empty();
        registry.insert("articulo", primary.clone());
        for coll in catalog::find("articulo").unwrap().collections {
            registry.insert_collection("articulo", coll.key, children.clone());
        }
        let orchestrator = CommitOrchestrator::new(Arc::new(registry), Duration::ZERO);
        (primary, children, orchestrator)
    }

    fn price_item(id: u64, monto: &str) -> ChildDraftItem {
        let fields = match json!({
            "idListasdePrecio": "1", "idMoneda": "2", "monto": monto, "fechaDesde": "2024-01-01"
        }) {
            Value::Object(m) => m,
            _ => unreachable!(),
        };
        ChildDraftItem::new(DraftId(id).into(), fields)
    }

    fn photo_item(id: u64, url: &str, principal: bool) -> ChildDraftItem {
        let fields = match json!({ "urlFoto": url }) {
            Value::Object(m) => m,
            _ => unreachable!(),
        };
        let mut item = ChildDraftItem::new(DraftId(id).into(), fields);
        item.principal = principal;
        item
    }

    #[tokio::test]
    async fn create_then_attach() {
        let (primary, children, orchestrator) = setup();
        let def = catalog::find("articulo").unwrap();
        let specs = (def.fields)();

        let mut draft = EntityDraft::new(DraftMode::Create);
        draft.set("nombre", json!("Test Item"));
        draft.set("idTipoArticulo", json!(3));

        let record = orchestrator
            .commit_primary(def, &specs, &draft, None)
            .await
            .unwrap();
        assert_eq!(record.id(), Some(42));
        assert_eq!(primary.create_count(), 1);

        let coll = def.collection("precios").unwrap();
        let items = vec![price_item(1, "10.50")];
        let report = orchestrator
            .commit_collection(def, coll, record.id(), &items)
            .await
            .unwrap();
        assert!(report.all_ok());

        let payloads = children.created_payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["idArticulo"], json!(42));
        assert_eq!(payloads[0]["monto"], json!(10.5));
        assert_eq!(payloads[0]["fechaDesde"], json!("2024-01-01"));
    }

    #[tokio::test]
    async fn no_premature_child_commit() {
        let (_, children, orchestrator) = setup();
        let def = catalog::find("articulo").unwrap();
        let coll = def.collection("precios").unwrap();

        let err = orchestrator
            .commit_collection(def, coll, None, &[price_item(1, "5")])
            .await
            .unwrap_err();
        assert!(err.is_missing_parent());
        assert_eq!(children.create_count(), 0);
    }

    #[tokio::test]
    async fn primary_failure_surfaces_server_message() {
        let (primary, _, orchestrator) = setup();
        let def = catalog::find("articulo").unwrap();
        primary.fail_everything();

        let draft = EntityDraft::new(DraftMode::Create);
        let err = orchestrator
            .commit_primary(def, &(def.fields)(), &draft, None)
            .await
            .unwrap_err();
        assert_eq!(err.message, "el servidor rechazó el registro");
    }

    #[tokio::test]
    async fn child_failure_does_not_abort_remaining_items() {
        let (_, children, orchestrator) = setup();
        let def = catalog::find("articulo").unwrap();
        let coll = def.collection("precios").unwrap();
        children.fail_create_at(1);

        let items = vec![price_item(1, "1"), price_item(2, "2"), price_item(3, "3")];
        let report = orchestrator
            .commit_collection(def, coll, Some(42), &items)
            .await
            .unwrap();

        assert_eq!(children.create_count(), 3);
        assert!(!report.all_ok());
        let failed: Vec<DraftId> = report.failures().map(|(id, _)| *id).collect();
        assert_eq!(failed, vec![DraftId(2)]);
    }

    #[tokio::test]
    async fn principal_advances_to_next_photo_on_failure() {
        let (_, children, orchestrator) = setup();
        let def = catalog::find("articulo").unwrap();
        let coll = def.collection("fotos").unwrap();
        children.fail_create_at(0);

        let items = vec![
            photo_item(1, "a.jpg", true),
            photo_item(2, "b.jpg", false),
            photo_item(3, "c.jpg", false),
        ];
        let report = orchestrator
            .commit_collection(def, coll, Some(42), &items)
            .await
            .unwrap();
        assert!(!report.all_ok());

        let payloads = children.created_payloads();
        assert_eq!(payloads[0]["esPrincipal"], json!(true));
        assert_eq!(payloads[1]["esPrincipal"], json!(true));
        assert_eq!(payloads[2]["esPrincipal"], json!(false));
    }

    #[tokio::test]
    async fn unflagged_photos_default_first_as_principal() {
        let (_, children, orchestrator) = setup();
        let def = catalog::find("articulo").unwrap();
        let coll = def.collection("fotos").unwrap();

        let items = vec![photo_item(1, "a.jpg", false), photo_item(2, "b.jpg", false)];
        orchestrator
            .commit_collection(def, coll, Some(42), &items)
            .await
            .unwrap();

        let payloads = children.created_payloads();
        assert_eq!(payloads[0]["esPrincipal"], json!(true));
        assert_eq!(payloads[1]["esPrincipal"], json!(false));
    }

    #[tokio::test]
    async fn persisted_rows_are_not_recreated_and_keep_the_flag() {
        let (_, children, orchestrator) = setup();
        let def = catalog::find("articulo").unwrap();
        let coll = def.collection("fotos").unwrap();

        let fields = match json!({ "urlFoto": "old.jpg" }) {
            Value::Object(m) => m,
            _ => unreachable!(),
        };
        let mut persisted = ChildDraftItem::new(RecordId::Server(500), fields);
        persisted.principal = true;

        let items = vec![persisted, photo_item(1, "new.jpg", false)];
        let report = orchestrator
            .commit_collection(def, coll, Some(42), &items)
            .await
            .unwrap();
        assert!(report.all_ok());
        assert_eq!(report.outcomes.len(), 1);

        // only the new row hits the wire, and the existing principal wins
        let payloads = children.created_payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["urlFoto"], json!("new.jpg"));
        assert_eq!(payloads[0]["esPrincipal"], json!(false));
    }

    #[tokio::test]
    async fn edit_mode_updates_in_place() {
        let (primary, _, orchestrator) = setup();
        let def = catalog::find("articulo").unwrap();

        let mut draft = EntityDraft::new(DraftMode::Edit);
        draft.set("nombre", json!("Renamed"));
        draft.set("puntoReorden", json!("15"));

        let record = orchestrator
            .commit_primary(def, &(def.fields)(), &draft, Some(42))
            .await
            .unwrap();
        assert_eq!(record.id(), Some(42));

        let updated = primary.updated.lock().unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].0, 42);
        // integer field coerced from its formatted string
        assert_eq!(updated[0].1["puntoReorden"], json!(15));
    }
}
