//! Collaborator API layer
//!
//! Every category and child collection talks to its REST endpoint through the
//! `CategoryApi` trait. The concrete client is reqwest-based; tests substitute
//! in-memory implementations through the registry.

mod client;
mod options;
mod registry;

pub use client::RestCategoryApi;
pub use options::{OptionData, OptionLoader};
pub use registry::ApiRegistry;

use async_trait::async_trait;
use serde_json::Value;

use contracts::domain::common::EntityRecord;
use contracts::shared::paging::PagedResponse;
use contracts::{ComposerError, ComposerResult};

/// CRUD contract of one collaborator endpoint
///
/// Child-record endpoints use the same contract; the parent foreign key
/// travels inside the payload (e.g. `idArticulo`).
#[async_trait]
pub trait CategoryApi: Send + Sync {
    async fn list(&self, page: u32, page_size: u32) -> ComposerResult<PagedResponse<EntityRecord>>;

    async fn get_one(&self, id: i64) -> ComposerResult<EntityRecord>;

    /// Returns the persisted record including its server-assigned id
    async fn create(&self, payload: Value) -> ComposerResult<EntityRecord>;

    async fn update(&self, id: i64, payload: Value) -> ComposerResult<EntityRecord>;

    async fn delete(&self, id: i64) -> ComposerResult<()>;
}

/// Pull the server id out of a create/update response
pub fn created_id(record: &EntityRecord) -> ComposerResult<i64> {
    record
        .id()
        .ok_or_else(|| ComposerError::external("create response carried no id"))
}
