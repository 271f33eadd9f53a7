//! Capability registry: category key -> API client
//!
//! Dispatch is a table lookup, not a per-category branch. Adding a category
//! means adding a catalog entry; the registry builds a client for it and for
//! each of its child collections from the same descriptor data.

use std::collections::HashMap;
use std::sync::Arc;

use contracts::domain::catalog::CategoryDef;
use contracts::{ComposerError, ComposerResult};

use crate::shared::config::Config;

use super::{CategoryApi, RestCategoryApi};

pub struct ApiRegistry {
    categories: HashMap<&'static str, Arc<dyn CategoryApi>>,
    collections: HashMap<(&'static str, &'static str), Arc<dyn CategoryApi>>,
}

impl ApiRegistry {
    pub fn empty() -> Self {
        Self {
            categories: HashMap::new(),
            collections: HashMap::new(),
        }
    }

    /// Build REST clients for every catalog entry
    pub fn from_catalog(config: &Config, catalog: &'static [CategoryDef]) -> Self {
        let mut registry = Self::empty();
        for def in catalog {
            registry.categories.insert(
                def.key,
                Arc::new(RestCategoryApi::new(
                    &config.api.base_url,
                    def.endpoint,
                    config.api.timeout_secs,
                )),
            );
            for coll in def.collections {
                registry.collections.insert(
                    (def.key, coll.key),
                    Arc::new(RestCategoryApi::new(
                        &config.api.base_url,
                        coll.endpoint,
                        config.api.timeout_secs,
                    )),
                );
            }
        }
        registry
    }

    /// Register or replace a category client (tests inject mocks here)
    pub fn insert(&mut self, category: &'static str, api: Arc<dyn CategoryApi>) {
        self.categories.insert(category, api);
    }

    pub fn insert_collection(
        &mut self,
        category: &'static str,
        collection: &'static str,
        api: Arc<dyn CategoryApi>,
    ) {
        self.collections.insert((category, collection), api);
    }

    pub fn category(&self, key: &str) -> ComposerResult<Arc<dyn CategoryApi>> {
        self.categories
            .get(key)
            .cloned()
            .ok_or_else(|| ComposerError::not_found(format!("no API registered for '{}'", key)))
    }

    pub fn collection(
        &self,
        category: &'static str,
        collection: &'static str,
    ) -> ComposerResult<Arc<dyn CategoryApi>> {
        self.collections
            .get(&(category, collection))
            .cloned()
            .ok_or_else(|| {
                ComposerError::not_found(format!(
                    "no API registered for collection '{}/{}'",
                    category, collection
                ))
            })
    }
}
