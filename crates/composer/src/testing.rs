//! In-memory collaborator fakes for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use contracts::domain::common::EntityRecord;
use contracts::shared::paging::PagedResponse;
use contracts::{ComposerError, ComposerResult};

use crate::api::CategoryApi;

/// Scriptable in-memory endpoint
///
/// Records every call so tests can assert on call counts, payloads and
/// ordering; individual create calls can be made to fail by index.
#[derive(Default)]
pub struct MockCategoryApi {
    pages: Mutex<HashMap<u32, PagedResponse<EntityRecord>>>,
    next_id: AtomicI64,
    fail_creates: Mutex<Vec<usize>>,
    fail_all: AtomicBool,
    pub created: Mutex<Vec<Value>>,
    pub updated: Mutex<Vec<(i64, Value)>>,
    pub deleted: Mutex<Vec<i64>>,
}

impl MockCategoryApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(42),
            ..Self::default()
        }
    }

    pub fn with_first_id(first_id: i64) -> Self {
        Self {
            next_id: AtomicI64::new(first_id),
            ..Self::default()
        }
    }

    pub fn stub_page(&self, page: u32, response: PagedResponse<EntityRecord>) {
        self.pages.lock().unwrap().insert(page, response);
    }

    /// Make the nth create call (0-based) fail
    pub fn fail_create_at(&self, index: usize) {
        self.fail_creates.lock().unwrap().push(index);
    }

    pub fn fail_everything(&self) {
        self.fail_all.store(true, Ordering::SeqCst);
    }

    pub fn create_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn created_payloads(&self) -> Vec<Value> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl CategoryApi for MockCategoryApi {
    async fn list(&self, page: u32, _page_size: u32) -> ComposerResult<PagedResponse<EntityRecord>> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(ComposerError::external("list unavailable"));
        }
        let pages = self.pages.lock().unwrap();
        Ok(pages
            .get(&page)
            .map(|p| PagedResponse::new(p.data.clone(), p.total_registros))
            .unwrap_or_else(|| PagedResponse::new(Vec::new(), 0)))
    }

    async fn get_one(&self, id: i64) -> ComposerResult<EntityRecord> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(ComposerError::external("get unavailable"));
        }
        Ok(EntityRecord::from_value(json!({ "id": id })))
    }

    async fn create(&self, payload: Value) -> ComposerResult<EntityRecord> {
        let index = {
            let mut created = self.created.lock().unwrap();
            created.push(payload.clone());
            created.len() - 1
        };
        if self.fail_all.load(Ordering::SeqCst)
            || self.fail_creates.lock().unwrap().contains(&index)
        {
            return Err(ComposerError::external("el servidor rechazó el registro"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut record = EntityRecord::from_value(payload);
        record.set("id", json!(id));
        Ok(record)
    }

    async fn update(&self, id: i64, payload: Value) -> ComposerResult<EntityRecord> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(ComposerError::external("update rejected"));
        }
        self.updated.lock().unwrap().push((id, payload.clone()));
        let mut record = EntityRecord::from_value(payload);
        record.set("id", json!(id));
        Ok(record)
    }

    async fn delete(&self, id: i64) -> ComposerResult<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(ComposerError::external("delete rejected"));
        }
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }
}

pub fn record(id: i64) -> EntityRecord {
    EntityRecord::from_value(json!({"id": id, "nombre": format!("item {}", id)}))
}

pub fn page_of(ids: &[i64], total: u64) -> PagedResponse<EntityRecord> {
    PagedResponse::new(ids.iter().copied().map(record).collect(), total)
}
