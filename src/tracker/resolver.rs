//! Name → record resolution
//!
//! Names resolve by exact, case-sensitive title equality. The store does not
//! enforce unique titles; when several records match, the first one in
//! service order wins. Task lookups are scoped to an Epic whenever one is
//! known, since Task titles repeat across Epics.

use super::schema::{epic_fields, task_fields, Collections};
use crate::notion::{Filter, NotionStore, Page, QueryRequest};
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Resolves Epic and Task names to their pages.
#[derive(Clone)]
pub struct EntityResolver {
    store: Arc<dyn NotionStore>,
    collections: Collections,
}

impl EntityResolver {
    pub fn new(store: Arc<dyn NotionStore>, collections: Collections) -> Self {
        Self { store, collections }
    }

    /// Find the Epic titled `title`. `Ok(None)` means not found.
    pub async fn find_epic(&self, title: &str) -> Result<Option<Page>> {
        let request = QueryRequest::new(Some(Filter::title_equals(epic_fields::NAME, title)), 1);
        let page = self
            .store
            .query_data_source(&self.collections.epic_data_source_id, &request)
            .await?
            .first();
        debug!(epic = title, found = page.is_some(), "Resolved epic");
        Ok(page)
    }

    /// Find the Task titled `title`, restricted to Tasks related to `epic_id`
    /// when given.
    pub async fn find_task(&self, title: &str, epic_id: Option<&str>) -> Result<Option<Page>> {
        let mut conditions = vec![Filter::title_equals(task_fields::NAME, title)];
        if let Some(epic_id) = epic_id {
            conditions.push(Filter::relation_contains(task_fields::EPIC, epic_id));
        }

        let request = QueryRequest::new(Filter::all(conditions), 1);
        let page = self
            .store
            .query_data_source(&self.collections.task_data_source_id, &request)
            .await?
            .first();
        debug!(task = title, ?epic_id, found = page.is_some(), "Resolved task");
        Ok(page)
    }
}
