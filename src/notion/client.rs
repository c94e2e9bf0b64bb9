//! HTTP client for the Notion REST API
//!
//! Implements [`NotionStore`] against `api.notion.com` (or any base URL,
//! which is how the tests point it at a local mock server).
//!
//! The bearer token is optional at construction time. A missing token only
//! fails once a request is actually attempted, so a misconfigured server
//! still starts and lists its tools.

use super::error::NotionError;
use super::filter::QueryRequest;
use super::models::{ApiErrorBody, Block, Page, QueryResponse};
use super::properties::PropertyBag;
use super::traits::NotionStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.notion.com";
pub const DEFAULT_API_VERSION: &str = "2025-09-03";

/// Client for Notion operations
#[derive(Clone)]
pub struct NotionClient {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    token: Option<String>,
}

impl NotionClient {
    /// Create a new client.
    ///
    /// An empty token is treated the same as an absent one.
    pub fn new(base_url: &str, api_version: &str, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: api_version.to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    fn token(&self) -> Result<&str, NotionError> {
        self.token.as_deref().ok_or(NotionError::MissingToken)
    }

    /// Send one request and decode the JSON response.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &Value,
    ) -> Result<T, NotionError> {
        let token = self.token()?;
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Notion request");

        let response = self
            .client
            .request(method, &url)
            .bearer_auth(token)
            .header("Notion-Version", &self.api_version)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let (code, message) = match serde_json::from_str::<ApiErrorBody>(&text) {
                Ok(err) => (err.code, err.message),
                Err(_) => (String::new(), text),
            };
            return Err(NotionError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| NotionError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl NotionStore for NotionClient {
    async fn query_data_source(
        &self,
        data_source_id: &str,
        request: &QueryRequest,
    ) -> Result<QueryResponse> {
        let body = serde_json::to_value(request)?;
        let path = format!("/v1/data_sources/{}/query", data_source_id);
        let response: QueryResponse = self
            .request(Method::POST, &path, &body)
            .await
            .with_context(|| format!("Failed to query data source {}", data_source_id))?;
        Ok(response)
    }

    async fn create_page(&self, database_id: &str, properties: PropertyBag) -> Result<Page> {
        let body = json!({
            "parent": {"database_id": database_id},
            "properties": properties,
        });
        let page: Page = self
            .request(Method::POST, "/v1/pages", &body)
            .await
            .with_context(|| format!("Failed to create page in database {}", database_id))?;
        Ok(page)
    }

    async fn update_page(&self, page_id: &str, properties: PropertyBag) -> Result<Page> {
        let body = json!({"properties": properties});
        let path = format!("/v1/pages/{}", page_id);
        let page: Page = self
            .request(Method::PATCH, &path, &body)
            .await
            .with_context(|| format!("Failed to update page {}", page_id))?;
        Ok(page)
    }

    async fn append_block_children(&self, block_id: &str, children: &[Block]) -> Result<()> {
        let body = json!({"children": children});
        let path = format!("/v1/blocks/{}/children", block_id);
        let _: Value = self
            .request(Method::PATCH, &path, &body)
            .await
            .with_context(|| format!("Failed to append blocks to {}", block_id))?;
        Ok(())
    }
}
