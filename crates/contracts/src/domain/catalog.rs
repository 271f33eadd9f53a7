//! Category descriptors
//!
//! Each business category (Articulo, Banco, Moneda, ...) is described by a
//! static `CategoryDef` data entry. Adding a category is a table entry in the
//! composer's catalog, not a new branch in every handler: the API registry,
//! schema resolver and orchestrator all dispatch through these descriptors.

use crate::shared::metadata::FieldSpec;

/// Descriptor of one business category
#[derive(Debug, Clone, Copy)]
pub struct CategoryDef {
    /// Stable key, e.g. "articulo"
    pub key: &'static str,
    pub label: &'static str,
    /// REST path under the API base, e.g. "/api/articulo"
    pub endpoint: &'static str,
    /// Base field specs, before option collections are merged in
    pub fields: fn() -> Vec<FieldSpec>,
    /// Which option collection feeds which select field
    pub option_bindings: &'static [OptionBinding],
    /// Wizard tabs, in order; single-step categories have one Primary step
    pub steps: &'static [StepDef],
    /// Child collections attached after the primary entity exists
    pub collections: &'static [ChildCollectionDef],
    /// Cross-field conditional requirements
    pub rules: &'static [ConditionalRule],
}

impl CategoryDef {
    pub fn collection(&self, key: &str) -> Option<&'static ChildCollectionDef> {
        self.collections.iter().find(|c| c.key == key)
    }

    pub fn step(&self, key: &str) -> Option<&'static StepDef> {
        self.steps.iter().find(|s| s.key == key)
    }
}

/// Binds a select field to the option collection that populates it
#[derive(Debug, Clone, Copy)]
pub struct OptionBinding {
    pub field: &'static str,
    /// Category key of the option collaborator (e.g. "moneda")
    pub collection: &'static str,
}

/// What the save action on a tab does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCommit {
    /// Create or update the primary entity
    Primary,
    /// Persist the accumulated drafts of the named child collection
    Collection(&'static str),
    /// Fields merged into the primary payload; saving flushes them through
    /// an update once the parent entity exists
    None,
}

/// One wizard tab
#[derive(Debug, Clone, Copy)]
pub struct StepDef {
    pub key: &'static str,
    pub label: &'static str,
    /// Inclusion list of field names shown on this tab; fields not named by
    /// any tab are never rendered
    pub fields: &'static [&'static str],
    pub commit: StepCommit,
}

/// Descriptor of a child collection (prices, locations, photos, ...)
#[derive(Debug, Clone, Copy)]
pub struct ChildCollectionDef {
    pub key: &'static str,
    pub label: &'static str,
    /// REST path of the child endpoint
    pub endpoint: &'static str,
    /// Foreign-key field carrying the parent id, e.g. "idArticulo"
    pub parent_id_field: &'static str,
    /// Sub-fields that must be non-empty/non-zero before a draft is accepted
    pub required_fields: &'static [&'static str],
    /// Sub-fields coerced from text to numbers on commit, e.g. "monto"
    pub decimal_fields: &'static [&'static str],
    /// Collection carries an at-most-one principal flag
    pub has_principal: bool,
    /// Wire name of the principal flag, e.g. "esPrincipal"
    pub principal_field: &'static str,
    /// Pause between consecutive creates (photo uploads)
    pub paced: bool,
}

/// When the switch field is on, the listed fields become required
#[derive(Debug, Clone, Copy)]
pub struct ConditionalRule {
    pub when_switch: &'static str,
    pub then_required: &'static [&'static str],
}
