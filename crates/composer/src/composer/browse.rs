//! Browse controller: one category's list screen
//!
//! Owns the accumulated list and the API handle for the active category, and
//! carries the generation token that keeps late results from mutating state
//! after a reset (requests are never aborted, their results are discarded).

use std::sync::Arc;

use contracts::domain::common::EntityRecord;
use contracts::ComposerResult;

use crate::api::CategoryApi;

use super::cache::AccumulatedList;

pub struct Browser {
    api: Arc<dyn CategoryApi>,
    list: AccumulatedList,
    generation: u64,
}

impl Browser {
    pub fn new(api: Arc<dyn CategoryApi>, page_size: u32) -> Self {
        Self {
            api,
            list: AccumulatedList::new(page_size),
            generation: 0,
        }
    }

    pub fn list(&self) -> &AccumulatedList {
        &self.list
    }

    /// Token a wizard session captures at open; results carrying an older
    /// token are ignored
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Category/filter changed: drop everything and invalidate in-flight work
    pub fn reset(&mut self) {
        self.generation += 1;
        self.list.reset();
    }

    pub async fn load_page(&mut self, page: u32) -> ComposerResult<()> {
        let token = self.generation;
        let response = self.api.list(page, self.list.page_size()).await?;
        if token != self.generation {
            tracing::debug!(page, "stale page result dropped");
            return Ok(());
        }
        self.list.apply_page(page, response);
        Ok(())
    }

    pub async fn refresh(&mut self) -> ComposerResult<()> {
        self.load_page(1).await
    }

    pub async fn load_more(&mut self) -> ComposerResult<()> {
        if !self.list.has_more() {
            return Ok(());
        }
        self.load_page(self.list.current_page() + 1).await
    }

    /// Delete through the API, then update the cache per the outcome
    pub async fn delete(&mut self, id: i64) -> ComposerResult<()> {
        let token = self.generation;
        match self.api.delete(id).await {
            Ok(()) => {
                if token == self.generation {
                    self.list.on_delete(id);
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(id, %err, "delete failed");
                if token == self.generation {
                    self.list.on_mutation_error();
                }
                Err(err)
            }
        }
    }

    /// Wizard success callbacks; `token` was captured when the wizard opened
    pub fn note_created(&mut self, token: u64, record: EntityRecord) {
        if token == self.generation {
            self.list.on_create(record);
        }
    }

    pub fn note_updated(&mut self, token: u64, record: EntityRecord) {
        if token == self.generation {
            self.list.on_update(record);
        }
    }

    pub fn note_mutation_error(&mut self, token: u64) {
        if token == self.generation {
            self.list.on_mutation_error();
        }
    }
}
