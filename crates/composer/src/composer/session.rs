//! Wizard session
//!
//! Owns everything a single open wizard holds: the primary draft, the staged
//! child collections and their input buffers, the step machine, the draft-id
//! counter, the browse-generation token captured at open, and the in-flight
//! submit guard. Closing the session discards all of it; in-flight requests
//! are not aborted, their results are dropped via the stale token.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{Map, Value};

use contracts::domain::catalog::{CategoryDef, StepCommit};
use contracts::domain::common::{
    ChildDraftItem, DraftId, DraftMode, EntityDraft, EntityRecord, RecordId,
};
use contracts::shared::metadata::FieldSpec;
use contracts::{ComposerError, ComposerResult};

use crate::shared::format;

use super::draft::{ChildDrafts, DraftIdSequence};
use super::orchestrator::{ChildCommitReport, CommitOrchestrator};
use super::steps::StepMachine;

/// What a save on the active tab led to
#[derive(Debug)]
pub enum SaveOutcome {
    /// Step committed (when it commits anything) and the wizard moved forward
    Advanced,
    /// Last step done; the session is closed and its drafts discarded
    Finished,
    /// Validation or the primary commit failed; the step did not change and
    /// the messages are surfaced together
    Blocked(Vec<String>),
    /// The wizard advanced but some child items failed; per-item outcomes
    /// are carried for the caller to report
    PartialChildren(ChildCommitReport),
}

pub struct WizardSession {
    /// Correlates this session's log lines across commits
    session_id: uuid::Uuid,
    opened_at: chrono::DateTime<chrono::Utc>,
    def: &'static CategoryDef,
    specs: Vec<FieldSpec>,
    draft: EntityDraft,
    children: HashMap<&'static str, ChildDrafts>,
    input_buffers: HashMap<&'static str, Map<String, Value>>,
    ids: DraftIdSequence,
    steps: StepMachine,
    parent_id: Option<i64>,
    last_record: Option<EntityRecord>,
    browse_token: u64,
    in_flight: AtomicBool,
}

impl WizardSession {
    /// Open a create wizard; `specs` come from the schema resolver and
    /// `browse_token` from the browse screen this wizard will feed back into
    pub fn open_create(def: &'static CategoryDef, specs: Vec<FieldSpec>, browse_token: u64) -> Self {
        Self::new(def, specs, EntityDraft::new(DraftMode::Create), None, browse_token)
    }

    /// Open an edit wizard seeded from an existing record
    pub fn open_edit(
        def: &'static CategoryDef,
        specs: Vec<FieldSpec>,
        record: EntityRecord,
        browse_token: u64,
    ) -> Self {
        let parent_id = record.id();
        let draft = EntityDraft::from_record(record.0);
        Self::new(def, specs, draft, parent_id, browse_token)
    }

    fn new(
        def: &'static CategoryDef,
        specs: Vec<FieldSpec>,
        draft: EntityDraft,
        parent_id: Option<i64>,
        browse_token: u64,
    ) -> Self {
        let mut children = HashMap::new();
        for coll in def.collections {
            children.insert(coll.key, ChildDrafts::new());
        }
        Self {
            session_id: uuid::Uuid::new_v4(),
            opened_at: chrono::Utc::now(),
            def,
            specs,
            draft,
            children,
            input_buffers: HashMap::new(),
            ids: DraftIdSequence::new(),
            steps: StepMachine::new(def),
            parent_id,
            last_record: None,
            browse_token,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn session_id(&self) -> uuid::Uuid {
        self.session_id
    }

    pub fn category(&self) -> &'static CategoryDef {
        self.def
    }

    pub fn draft(&self) -> &EntityDraft {
        &self.draft
    }

    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    pub fn steps(&self) -> &StepMachine {
        &self.steps
    }

    pub fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }

    /// Record returned by the last successful primary commit, for the browse
    /// screen's create/update callbacks
    pub fn last_record(&self) -> Option<&EntityRecord> {
        self.last_record.as_ref()
    }

    pub fn browse_token(&self) -> u64 {
        self.browse_token
    }

    // ------------------------------------------------------------------
    // Field editing
    // ------------------------------------------------------------------

    /// Store raw text input, passing it through the field's formatter
    pub fn set_field_text(&mut self, name: &str, raw: &str) {
        let formatted = match self.spec(name).and_then(|s| s.format) {
            Some(fmt) => format::apply(fmt, raw),
            None => raw.to_string(),
        };
        self.draft.set(name, Value::String(formatted));
    }

    /// Store a non-text value (switch flips, select picks)
    pub fn set_field_value(&mut self, name: &str, value: Value) {
        self.draft.set(name, value);
    }

    fn spec(&self, name: &str) -> Option<&FieldSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    // ------------------------------------------------------------------
    // Child drafts
    // ------------------------------------------------------------------

    pub fn children(&self, collection: &str) -> Option<&ChildDrafts> {
        self.children.get(collection)
    }

    /// Stage one sub-field of the collection's input row
    pub fn set_child_input(&mut self, collection: &str, field: &str, value: Value) {
        let Some(coll) = self.def.collection(collection) else {
            return;
        };
        self.input_buffers
            .entry(coll.key)
            .or_default()
            .insert(field.to_string(), value);
    }

    pub fn child_input(&self, collection: &str) -> Option<&Map<String, Value>> {
        self.input_buffers.get(collection)
    }

    /// Move the input row into the staged list; the buffer is cleared only
    /// when the candidate was accepted
    pub fn add_child(&mut self, collection: &str) -> Option<DraftId> {
        let coll = self.def.collection(collection)?;
        let candidate = self.input_buffers.get(coll.key).cloned().unwrap_or_default();
        let drafts = self.children.get_mut(coll.key)?;
        let added = drafts.add_item(coll, candidate, &mut self.ids);
        if added.is_some() {
            self.input_buffers.remove(coll.key);
        }
        added
    }

    /// Stage child rows that already exist on the server (edit mode); they
    /// keep their server ids and are never re-created on commit
    pub fn seed_children(&mut self, collection: &str, records: Vec<EntityRecord>) {
        let Some(coll) = self.def.collection(collection) else {
            return;
        };
        if let Some(drafts) = self.children.get_mut(coll.key) {
            drafts.seed_persisted(coll, records);
        }
    }

    pub fn remove_child(&mut self, collection: &str, id: RecordId) {
        if let Some(drafts) = self.children.get_mut(collection) {
            drafts.remove_item(id);
        }
    }

    pub fn update_child(&mut self, collection: &str, id: RecordId, patch: Map<String, Value>) {
        if let Some(drafts) = self.children.get_mut(collection) {
            drafts.update_item(id, patch);
        }
    }

    pub fn set_principal(&mut self, collection: &str, id: RecordId) {
        if let Some(drafts) = self.children.get_mut(collection) {
            drafts.set_principal(id);
        }
    }

    // ------------------------------------------------------------------
    // Navigation and commit
    // ------------------------------------------------------------------

    /// Jump straight to a tab; secondary tabs need the parent entity
    pub fn jump_to(&mut self, index: usize) -> ComposerResult<()> {
        self.steps.jump_to(index, self.parent_id.is_some())
    }

    pub fn back(&mut self) {
        self.steps.back();
    }

    /// Discard all drafts; in-flight results go stale via the browse token
    pub fn close(&mut self) {
        tracing::info!(
            session = %self.session_id,
            category = self.def.key,
            open_for = ?(chrono::Utc::now() - self.opened_at),
            "wizard closed"
        );
        self.steps.close();
        self.children.clear();
        self.input_buffers.clear();
        self.draft = EntityDraft::new(self.draft.mode);
    }

    /// Validate the active tab and run its commit action
    ///
    /// The in-flight flag is checked-and-set before the first await so a
    /// double invocation cannot issue two commits.
    pub async fn save_current_step(
        &mut self,
        orchestrator: &CommitOrchestrator,
    ) -> ComposerResult<SaveOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ComposerError::new(
                "SUBMIT_IN_FLIGHT",
                "a save is already running",
            ));
        }
        let result = self.save_inner(orchestrator).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn save_inner(
        &mut self,
        orchestrator: &CommitOrchestrator,
    ) -> ComposerResult<SaveOutcome> {
        if self.steps.is_closed() {
            return Err(ComposerError::internal("session is closed"));
        }

        let outcome = self.steps.validate_step(&self.specs, &self.draft);
        if !outcome.is_valid {
            return Ok(SaveOutcome::Blocked(outcome.errors));
        }

        match self.steps.current().commit {
            StepCommit::Primary => self.commit_primary_step(orchestrator).await,
            // fields-only tabs flush into the parent once it exists, so edits
            // made there are never silently dropped
            StepCommit::None => {
                if self.parent_id.is_some() {
                    self.commit_primary_step(orchestrator).await
                } else {
                    Ok(self.advance_or_finish())
                }
            }
            StepCommit::Collection(key) => {
                let coll = self.def.collection(key).ok_or_else(|| {
                    ComposerError::internal(format!("unknown collection '{}'", key))
                })?;
                let items: Vec<ChildDraftItem> = self
                    .children
                    .get(coll.key)
                    .map(|d| d.items().to_vec())
                    .unwrap_or_default();
                let report = orchestrator
                    .commit_collection(self.def, coll, self.parent_id, &items)
                    .await?;

                // successfully persisted drafts leave the staging list;
                // failed ones stay for another attempt
                for outcome in &report.outcomes {
                    if outcome.result.is_ok() {
                        if let Some(drafts) = self.children.get_mut(coll.key) {
                            drafts.remove_item(outcome.draft_id.into());
                        }
                    }
                }

                if report.all_ok() {
                    Ok(self.advance_or_finish())
                } else {
                    // best-effort UX: the wizard still advances, but every
                    // per-item failure is in the report
                    self.advance_or_finish();
                    Ok(SaveOutcome::PartialChildren(report))
                }
            }
        }
    }

    /// Create or update the parent from the current draft
    ///
    /// The first successful create flips the draft into edit mode, so any
    /// later primary save (going back to the first tab, fields-only tabs)
    /// updates the same record instead of creating a duplicate.
    async fn commit_primary_step(
        &mut self,
        orchestrator: &CommitOrchestrator,
    ) -> ComposerResult<SaveOutcome> {
        match orchestrator
            .commit_primary(self.def, &self.specs, &self.draft, self.parent_id)
            .await
        {
            Ok(record) => {
                if self.draft.mode == DraftMode::Create {
                    match crate::api::created_id(&record) {
                        Ok(id) => self.parent_id = Some(id),
                        Err(err) => return Ok(SaveOutcome::Blocked(vec![err.message])),
                    }
                    self.draft.mode = DraftMode::Edit;
                }
                self.last_record = Some(record);
                Ok(self.advance_or_finish())
            }
            // stay on the step, surface the server message
            Err(err) => Ok(SaveOutcome::Blocked(vec![err.message])),
        }
    }

    fn advance_or_finish(&mut self) -> SaveOutcome {
        if self.steps.is_last() {
            self.steps.close();
            self.children.clear();
            self.input_buffers.clear();
            SaveOutcome::Finished
        } else {
            self.steps.advance();
            SaveOutcome::Advanced
        }
    }
}
