//! Wizard step state machine
//!
//! One state per tab plus an implicit closed state. Forward movement runs
//! validation first; jumping straight to a later tab is only allowed once the
//! parent entity exists. Before that, secondary tabs may be shown by the UI
//! but their commits short-circuit in the orchestrator.

use contracts::domain::catalog::{CategoryDef, StepDef};
use contracts::domain::common::EntityDraft;
use contracts::shared::metadata::{FieldKind, FieldSpec};
use contracts::{ComposerError, ComposerResult};

use super::draft::is_filled;
use super::schema;

/// Result of validating the active tab: all messages surface together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }
}

#[derive(Debug)]
pub struct StepMachine {
    def: &'static CategoryDef,
    active: usize,
    closed: bool,
}

impl StepMachine {
    pub fn new(def: &'static CategoryDef) -> Self {
        Self {
            def,
            active: 0,
            closed: false,
        }
    }

    pub fn current(&self) -> &'static StepDef {
        &self.def.steps[self.active]
    }

    pub fn index(&self) -> usize {
        self.active
    }

    pub fn is_first(&self) -> bool {
        self.active == 0
    }

    pub fn is_last(&self) -> bool {
        self.active + 1 == self.def.steps.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Move forward one tab; the caller validates and commits first
    pub fn advance(&mut self) {
        if !self.is_last() {
            self.active += 1;
        }
    }

    /// Move back one tab (Previous/Cancel)
    pub fn back(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    /// Jump straight to a tab; non-initial tabs need the parent entity
    pub fn jump_to(&mut self, index: usize, parent_exists: bool) -> ComposerResult<()> {
        if index >= self.def.steps.len() {
            return Err(ComposerError::internal(format!(
                "step index {} out of range for '{}'",
                index, self.def.key
            )));
        }
        if index > 0 && !parent_exists {
            return Err(ComposerError::missing_parent(self.def.key));
        }
        self.active = index;
        Ok(())
    }

    /// Terminal state; drafts are discarded by the owning session
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Validate the active tab's fields against the draft
    ///
    /// Required-field checks for the tab's own fields, plus any conditional
    /// rule whose switch lives on this tab. Every failure is collected so the
    /// messages surface together, not one at a time.
    pub fn validate_step(&self, specs: &[FieldSpec], draft: &EntityDraft) -> ValidationOutcome {
        let step = self.current();
        let tab_specs = schema::fields_for_step(specs, step);
        let mut errors = Vec::new();

        for spec in &tab_specs {
            validate_field(spec, draft, &mut errors);
        }

        for rule in self.def.rules {
            let on_this_tab = tab_specs.iter().any(|s| s.name == rule.when_switch);
            if !on_this_tab || !draft.is_on(rule.when_switch) {
                continue;
            }
            for name in rule.then_required {
                if !is_filled(draft.get(name)) {
                    let label = specs
                        .iter()
                        .find(|s| s.name == *name)
                        .map(|s| s.label.as_str())
                        .unwrap_or(name);
                    errors.push(format!("{} is required", label));
                }
            }
        }

        if errors.is_empty() {
            ValidationOutcome::valid()
        } else {
            ValidationOutcome::invalid(errors)
        }
    }
}

fn validate_field(spec: &FieldSpec, draft: &EntityDraft, errors: &mut Vec<String>) {
    match spec.kind {
        FieldKind::Switch => {}
        FieldKind::Select => {
            if spec.required && !is_filled(draft.get(&spec.name)) {
                errors.push(format!("{} is required", spec.label));
            }
        }
        FieldKind::Text | FieldKind::Number | FieldKind::Date => {
            let value = draft.get_str(&spec.name);
            if let Err(message) = spec.validation.validate_string(value, &spec.label) {
                errors.push(message);
            } else if spec.kind == FieldKind::Number && !value.is_empty() {
                if let Ok(number) = value.parse::<f64>() {
                    if let Err(message) = spec.validation.validate_number(number, &spec.label) {
                        errors.push(message);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::OptionData;
    use crate::catalog;
    use contracts::domain::common::DraftMode;
    use serde_json::json;

    fn articulo_specs() -> Vec<FieldSpec> {
        schema::resolve(catalog::find("articulo").unwrap(), &OptionData::new())
    }

    #[test]
    fn empty_nombre_blocks_and_reports_all_errors_together() {
        let machine = StepMachine::new(catalog::find("articulo").unwrap());
        let draft = EntityDraft::new(DraftMode::Create);

        let outcome = machine.validate_step(&articulo_specs(), &draft);
        assert!(!outcome.is_valid);
        assert!(outcome.errors.iter().any(|e| e.contains("Nombre")));
        // both missing required fields reported at once
        assert!(outcome.errors.iter().any(|e| e.contains("Tipo de artículo")));
        assert_eq!(machine.index(), 0);
    }

    #[test]
    fn valid_ficha_passes() {
        let machine = StepMachine::new(catalog::find("articulo").unwrap());
        let mut draft = EntityDraft::new(DraftMode::Create);
        draft.set("nombre", json!("Test Item"));
        draft.set("idTipoArticulo", json!(3));

        let outcome = machine.validate_step(&articulo_specs(), &draft);
        assert!(outcome.is_valid, "{:?}", outcome.errors);
    }

    #[test]
    fn conditional_rule_fires_only_when_switch_is_on() {
        let def = catalog::find("figura_comercial").unwrap();
        let machine = StepMachine::new(def);
        let specs = schema::resolve(def, &OptionData::new());

        let mut draft = EntityDraft::new(DraftMode::Create);
        draft.set("nombre", json!("Cliente Uno"));
        assert!(machine.validate_step(&specs, &draft).is_valid);

        draft.set("manejaLimiteCredito", json!(true));
        let outcome = machine.validate_step(&specs, &draft);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.errors.len(), 2);

        draft.set("idMonedaLimiteCredito", json!(2));
        draft.set("montoLimiteCredito", json!("500"));
        assert!(machine.validate_step(&specs, &draft).is_valid);
    }

    #[test]
    fn jump_needs_parent_for_secondary_tabs() {
        let mut machine = StepMachine::new(catalog::find("articulo").unwrap());
        let err = machine.jump_to(3, false).unwrap_err();
        assert!(err.is_missing_parent());
        assert_eq!(machine.index(), 0);

        machine.jump_to(3, true).unwrap();
        assert_eq!(machine.current().key, "precios");

        machine.jump_to(0, false).unwrap();
        assert_eq!(machine.index(), 0);
    }

    #[test]
    fn advance_and_back_are_bounded() {
        let mut machine = StepMachine::new(catalog::find("banco").unwrap());
        machine.back();
        assert_eq!(machine.index(), 0);
        machine.advance();
        assert_eq!(machine.index(), 0); // single step
        assert!(machine.is_last());
    }
}
