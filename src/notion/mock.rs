//! In-memory mock implementation of NotionStore for testing without the real service.

use super::error::NotionError;
use super::filter::{Filter, QueryRequest};
use super::models::{Block, Page, QueryResponse};
use super::properties::{extract_relation_ids, extract_select, extract_title, PropertyBag};
use super::traits::NotionStore;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A write observed by the mock, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedWrite {
    Create { database_id: String, page_id: String },
    Update { page_id: String, properties: PropertyBag },
    Append { block_id: String, count: usize },
}

/// In-memory mock implementation of NotionStore.
///
/// Pages live in per-collection `Vec`s; insertion order is the service order
/// that queries return. Filters are evaluated with the same property codec
/// the tracker uses, so a title filter is an exact case-sensitive match.
/// Creating a page in a database also makes it visible through the data
/// source mapped to that database with [`MockNotionStore::link_database`].
pub struct MockNotionStore {
    collections: RwLock<HashMap<String, Vec<Page>>>,
    database_sources: RwLock<HashMap<String, String>>,
    blocks: RwLock<HashMap<String, Vec<Block>>>,
    writes: RwLock<Vec<RecordedWrite>>,
    failing: RwLock<HashSet<String>>,
}

impl MockNotionStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            database_sources: RwLock::new(HashMap::new()),
            blocks: RwLock::new(HashMap::new()),
            writes: RwLock::new(Vec::new()),
            failing: RwLock::new(HashSet::new()),
        }
    }

    /// Make every call that targets `id` (a data source, database, page or
    /// block) fail with a 500 from the service.
    pub async fn fail_on(&self, id: &str) {
        self.failing.write().await.insert(id.to_string());
    }

    async fn check_available(&self, id: &str) -> Result<()> {
        if self.failing.read().await.contains(id) {
            return Err(NotionError::Api {
                status: 500,
                code: "internal_server_error".into(),
                message: format!("Injected failure for {}", id),
            }
            .into());
        }
        Ok(())
    }

    /// Route pages created under `database_id` into `data_source_id`.
    pub async fn link_database(&self, database_id: &str, data_source_id: &str) {
        self.database_sources
            .write()
            .await
            .insert(database_id.to_string(), data_source_id.to_string());
    }

    /// Seed a page directly into a data source.
    pub async fn insert_page(&self, data_source_id: &str, page: Page) {
        self.collections
            .write()
            .await
            .entry(data_source_id.to_string())
            .or_default()
            .push(page);
    }

    pub async fn get_page(&self, page_id: &str) -> Option<Page> {
        self.collections
            .read()
            .await
            .values()
            .flatten()
            .find(|p| p.id == page_id)
            .cloned()
    }

    pub async fn blocks_for(&self, block_id: &str) -> Vec<Block> {
        self.blocks
            .read()
            .await
            .get(block_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.read().await.clone()
    }

    pub async fn update_count(&self, page_id: &str) -> usize {
        self.writes
            .read()
            .await
            .iter()
            .filter(|w| matches!(w, RecordedWrite::Update { page_id: id, .. } if id == page_id))
            .count()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn filter_matches(filter: &Filter, props: &PropertyBag) -> bool {
    match filter {
        Filter::TitleEquals { property, value } => extract_title(props, property) == *value,
        Filter::SelectEquals { property, value } => extract_select(props, property) == *value,
        Filter::RelationContains { property, page_id } => {
            extract_relation_ids(props, property).contains(page_id)
        }
        Filter::And(conditions) => conditions.iter().all(|c| filter_matches(c, props)),
    }
}

/// Turn request-side property values into the shape the service returns.
///
/// Only title runs differ: requests carry `text.content`, responses carry
/// `plain_text` as well.
fn normalize(mut properties: PropertyBag) -> PropertyBag {
    for value in properties.values_mut() {
        if let Some(runs) = value.get_mut("title").and_then(Value::as_array_mut) {
            for run in runs {
                let content = run
                    .pointer("/text/content")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                if let (Some(content), Some(obj)) = (content, run.as_object_mut()) {
                    obj.entry("plain_text").or_insert(Value::String(content));
                }
            }
        }
    }
    properties
}

// ---------------------------------------------------------------------------
// NotionStore implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl NotionStore for MockNotionStore {
    async fn query_data_source(
        &self,
        data_source_id: &str,
        request: &QueryRequest,
    ) -> Result<QueryResponse> {
        self.check_available(data_source_id).await?;
        let collections = self.collections.read().await;
        let pages = collections
            .get(data_source_id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let matching: Vec<Page> = pages
            .iter()
            .filter(|p| {
                request
                    .filter
                    .as_ref()
                    .map_or(true, |f| filter_matches(f, &p.properties))
            })
            .cloned()
            .collect();

        let page_size = request.page_size as usize;
        let has_more = matching.len() > page_size;
        Ok(QueryResponse {
            results: matching.into_iter().take(page_size).collect(),
            has_more,
            next_cursor: None,
        })
    }

    async fn create_page(&self, database_id: &str, properties: PropertyBag) -> Result<Page> {
        self.check_available(database_id).await?;
        let data_source_id = self
            .database_sources
            .read()
            .await
            .get(database_id)
            .cloned()
            .ok_or_else(|| anyhow!("Could not find database with ID: {}", database_id))?;

        let id = Uuid::new_v4().to_string();
        let page = Page {
            url: format!("https://www.notion.so/{}", id.replace('-', "")),
            id: id.clone(),
            properties: normalize(properties),
        };
        self.insert_page(&data_source_id, page.clone()).await;
        self.writes.write().await.push(RecordedWrite::Create {
            database_id: database_id.to_string(),
            page_id: id,
        });
        Ok(page)
    }

    async fn update_page(&self, page_id: &str, properties: PropertyBag) -> Result<Page> {
        self.check_available(page_id).await?;
        let updated = {
            let mut collections = self.collections.write().await;
            let page = collections
                .values_mut()
                .flatten()
                .find(|p| p.id == page_id)
                .ok_or_else(|| anyhow!("Could not find page with ID: {}", page_id))?;
            for (key, value) in normalize(properties.clone()) {
                page.properties.insert(key, value);
            }
            page.clone()
        };
        self.writes.write().await.push(RecordedWrite::Update {
            page_id: page_id.to_string(),
            properties,
        });
        Ok(updated)
    }

    async fn append_block_children(&self, block_id: &str, children: &[Block]) -> Result<()> {
        self.check_available(block_id).await?;
        self.blocks
            .write()
            .await
            .entry(block_id.to_string())
            .or_default()
            .extend_from_slice(children);
        self.writes.write().await.push(RecordedWrite::Append {
            block_id: block_id.to_string(),
            count: children.len(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::properties::{relation_value, select_value, title_value};

    fn props(pairs: Vec<(&str, Value)>) -> PropertyBag {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[tokio::test]
    async fn test_query_respects_filter_and_page_size() {
        let store = MockNotionStore::new();
        for (id, status) in [("a", "Done"), ("b", "Planning"), ("c", "Done")] {
            store
                .insert_page(
                    "ds",
                    Page {
                        id: id.into(),
                        url: String::new(),
                        properties: props(vec![("Status", select_value(status))]),
                    },
                )
                .await;
        }

        let req = QueryRequest::new(Some(Filter::select_equals("Status", "Done")), 1);
        let resp = store.query_data_source("ds", &req).await.unwrap();
        assert_eq!(resp.results.len(), 1);
        assert_eq!(resp.results[0].id, "a");
        assert!(resp.has_more);
    }

    #[tokio::test]
    async fn test_created_title_is_queryable() {
        let store = MockNotionStore::new();
        store.link_database("db", "ds").await;
        let created = store
            .create_page(
                "db",
                props(vec![("Name", title_value("T1")), ("Epic", relation_value("e1"))]),
            )
            .await
            .unwrap();

        let filter = Filter::all(vec![
            Filter::title_equals("Name", "T1"),
            Filter::relation_contains("Epic", "e1"),
        ]);
        let resp = store
            .query_data_source("ds", &QueryRequest::new(filter, 1))
            .await
            .unwrap();
        assert_eq!(resp.first().unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_injected_failure_records_no_write() {
        let store = MockNotionStore::new();
        store.fail_on("p1").await;
        let err = store
            .update_page("p1", PropertyBag::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NotionError>(),
            Some(NotionError::Api { status: 500, .. })
        ));
        assert!(store.writes().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_page_fails() {
        let store = MockNotionStore::new();
        assert!(store.update_page("nope", PropertyBag::new()).await.is_err());
    }
}
