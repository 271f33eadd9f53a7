//! Field schema resolver
//!
//! Pure function of (category, option data) -> field specs. Option
//! collections that have not resolved yet simply leave the field with an
//! empty option list; the caller re-resolves once more data arrives.

use contracts::domain::catalog::{CategoryDef, StepDef};
use contracts::shared::metadata::FieldSpec;

use crate::api::OptionData;

/// Produce the ordered field specs for a category, options merged in
pub fn resolve(def: &CategoryDef, options: &OptionData) -> Vec<FieldSpec> {
    let mut specs = (def.fields)();
    for binding in def.option_bindings {
        let Some(collection) = options.get(binding.collection) else {
            continue;
        };
        if let Some(spec) = specs.iter_mut().find(|s| s.name == binding.field) {
            spec.options = collection.clone();
        }
    }
    specs
}

/// Partition: the subset of `specs` a given tab renders, in the tab's order
///
/// An empty inclusion list on a primary tab means "all fields" (single-step
/// categories); collection tabs render no primary fields at all. Fields not
/// named by any tab are never returned for any tab.
pub fn fields_for_step(specs: &[FieldSpec], step: &StepDef) -> Vec<FieldSpec> {
    use contracts::domain::catalog::StepCommit;

    if step.fields.is_empty() {
        return match step.commit {
            StepCommit::Primary => specs.to_vec(),
            _ => Vec::new(),
        };
    }
    step.fields
        .iter()
        .filter_map(|name| specs.iter().find(|s| s.name == *name).cloned())
        .collect()
}
