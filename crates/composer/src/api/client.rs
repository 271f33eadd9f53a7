//! reqwest-based collaborator client

use async_trait::async_trait;
use serde_json::Value;

use contracts::domain::common::EntityRecord;
use contracts::shared::paging::PagedResponse;
use contracts::{ComposerError, ComposerResult};

use super::CategoryApi;

/// HTTP client for one category or child-collection endpoint
pub struct RestCategoryApi {
    client: reqwest::Client,
    base_url: String,
    endpoint: String,
}

impl RestCategoryApi {
    pub fn new(base_url: &str, endpoint: &str, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoint: endpoint.to_string(),
        }
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint)
    }

    fn url_for(&self, id: i64) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            self.endpoint,
            urlencoding::encode(&id.to_string())
        )
    }

    /// Map a non-success response to an error carrying the server message
    /// when the body has one, else a generic fallback
    async fn error_from(response: reqwest::Response) -> ComposerError {
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("request failed with status {}", status));
        ComposerError::external(message).with_details(status.to_string())
    }

    async fn parse_record(response: reqwest::Response) -> ComposerResult<EntityRecord> {
        let value: Value = response
            .json()
            .await
            .map_err(|e| ComposerError::external(e.to_string()))?;
        Ok(EntityRecord::from_value(value))
    }
}

#[async_trait]
impl CategoryApi for RestCategoryApi {
    async fn list(&self, page: u32, page_size: u32) -> ComposerResult<PagedResponse<EntityRecord>> {
        tracing::debug!(endpoint = %self.endpoint, page, page_size, "list");
        let response = self
            .client
            .get(self.url())
            .query(&[("page", page), ("size", page_size)])
            .send()
            .await
            .map_err(|e| ComposerError::external(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        response
            .json::<PagedResponse<EntityRecord>>()
            .await
            .map_err(|e| ComposerError::external(e.to_string()))
    }

    async fn get_one(&self, id: i64) -> ComposerResult<EntityRecord> {
        let response = self
            .client
            .get(self.url_for(id))
            .send()
            .await
            .map_err(|e| ComposerError::external(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Self::parse_record(response).await
    }

    async fn create(&self, payload: Value) -> ComposerResult<EntityRecord> {
        tracing::info!(endpoint = %self.endpoint, "create");
        let response = self
            .client
            .post(self.url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| ComposerError::external(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Self::parse_record(response).await
    }

    async fn update(&self, id: i64, payload: Value) -> ComposerResult<EntityRecord> {
        tracing::info!(endpoint = %self.endpoint, id, "update");
        let response = self
            .client
            .put(self.url_for(id))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ComposerError::external(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Self::parse_record(response).await
    }

    async fn delete(&self, id: i64) -> ComposerResult<()> {
        tracing::info!(endpoint = %self.endpoint, id, "delete");
        let response = self
            .client
            .delete(self.url_for(id))
            .send()
            .await
            .map_err(|e| ComposerError::external(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }
}
