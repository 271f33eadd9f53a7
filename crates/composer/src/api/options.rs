//! Option-list loading for select fields

use std::collections::HashMap;

use contracts::domain::catalog::CategoryDef;
use contracts::shared::metadata::SelectOption;

use super::ApiRegistry;

/// Resolved option collections, keyed by option category ("moneda", ...)
pub type OptionData = HashMap<String, Vec<SelectOption>>;

/// Fetches the option collections a category's select fields need
///
/// Option collaborators follow the same list contract as everything else and
/// are called with a large page size to fetch "all" options in one page.
pub struct OptionLoader<'a> {
    registry: &'a ApiRegistry,
    page_size: u32,
}

impl<'a> OptionLoader<'a> {
    pub fn new(registry: &'a ApiRegistry, page_size: u32) -> Self {
        Self {
            registry,
            page_size,
        }
    }

    /// Load every option collection bound by `def`'s fields
    ///
    /// A collection that cannot be fetched is logged and skipped; the schema
    /// resolver treats the absent key as an empty option list, so the form
    /// still renders.
    pub async fn load_for(&self, def: &CategoryDef) -> OptionData {
        let mut data = OptionData::new();
        for binding in def.option_bindings {
            if data.contains_key(binding.collection) {
                continue;
            }
            let api = match self.registry.category(binding.collection) {
                Ok(api) => api,
                Err(err) => {
                    tracing::warn!(collection = binding.collection, %err, "option source missing");
                    continue;
                }
            };
            match api.list(1, self.page_size).await {
                Ok(page) => {
                    let options = page
                        .data
                        .into_iter()
                        .map(|record| SelectOption(record.into_value()))
                        .collect();
                    data.insert(binding.collection.to_string(), options);
                }
                Err(err) => {
                    tracing::warn!(collection = binding.collection, %err, "option fetch failed");
                }
            }
        }
        data
    }
}
