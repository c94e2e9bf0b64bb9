//! The six tracker operations
//!
//! Each operation resolves names, runs its queries or writes strictly in
//! sequence, and returns one display-ready text block. A name that does not
//! resolve produces a not-found message in `Ok`; only configuration and
//! remote failures come back as `Err`.

use super::dashboard::DashboardAggregator;
use super::format;
use super::models::{Epic, Priority, Task, TaskSource, TaskStatus, TaskType};
use super::mutation::StatusMutator;
use super::resolver::EntityResolver;
use super::schema::{epic_fields, task_fields, Collections, EPIC_PAGE_SIZE, TASK_PAGE_SIZE};
use super::session::{now_kst, parse_task_list, SessionLogEntry};
use crate::notion::properties::{relation_value, select_value, title_value};
use crate::notion::{Filter, NotionStore, PropertyBag, QueryRequest};
use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Caller-side mistakes detected before any remote write.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Parameters of `create_task`. Empty `task_type` / `priority` leave the
/// property unset.
#[derive(Debug, Clone)]
pub struct CreateTaskRequest {
    pub epic_name: String,
    pub task_name: String,
    pub task_type: String,
    pub priority: String,
    pub source: String,
}

impl CreateTaskRequest {
    pub fn new(epic_name: &str, task_name: &str) -> Self {
        Self {
            epic_name: epic_name.to_string(),
            task_name: task_name.to_string(),
            task_type: TaskType::default().to_string(),
            priority: Priority::default().to_string(),
            source: TaskSource::default().to_string(),
        }
    }
}

fn parse_label<T: std::str::FromStr<Err = String>>(value: &str) -> Result<Option<T>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|e| TrackerError::InvalidArgument(e).into())
}

/// Entry point for the tracker operations.
#[derive(Clone)]
pub struct EpicTracker {
    store: Arc<dyn NotionStore>,
    collections: Collections,
    resolver: EntityResolver,
    mutator: StatusMutator,
    aggregator: DashboardAggregator,
}

impl EpicTracker {
    pub fn new(store: Arc<dyn NotionStore>, collections: Collections) -> Self {
        Self {
            resolver: EntityResolver::new(store.clone(), collections.clone()),
            mutator: StatusMutator::new(store.clone()),
            aggregator: DashboardAggregator::new(store.clone(), collections.clone()),
            store,
            collections,
        }
    }

    pub fn resolver(&self) -> &EntityResolver {
        &self.resolver
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    /// List Epics, optionally only those whose status equals `status_filter`.
    pub async fn list_epics(&self, status_filter: &str) -> Result<String> {
        let filter = (!status_filter.is_empty())
            .then(|| Filter::select_equals(epic_fields::STATUS, status_filter));
        let response = self
            .store
            .query_data_source(
                &self.collections.epic_data_source_id,
                &QueryRequest::new(filter, EPIC_PAGE_SIZE),
            )
            .await?;

        let epics: Vec<Epic> = response.results.iter().map(Epic::from_page).collect();
        info!(count = epics.len(), status_filter, "Listed epics");
        Ok(format::epic_list(&epics, status_filter))
    }

    /// List Tasks of an Epic (all Tasks when `epic_name` is empty).
    pub async fn list_tasks(&self, epic_name: &str, status_filter: &str) -> Result<String> {
        let mut conditions = Vec::new();

        if !epic_name.is_empty() {
            let Some(epic) = self.resolver.find_epic(epic_name).await? else {
                return Ok(format::epic_not_found(epic_name));
            };
            conditions.push(Filter::relation_contains(task_fields::EPIC, &epic.id));
        }
        if !status_filter.is_empty() {
            conditions.push(Filter::select_equals(task_fields::STATUS, status_filter));
        }

        let response = self
            .store
            .query_data_source(
                &self.collections.task_data_source_id,
                &QueryRequest::new(Filter::all(conditions), TASK_PAGE_SIZE),
            )
            .await?;

        let tasks: Vec<Task> = response.results.iter().map(Task::from_page).collect();
        info!(count = tasks.len(), epic = epic_name, "Listed tasks");
        Ok(format::task_list(epic_name, &tasks, status_filter))
    }

    /// Create a Task under an Epic with status "🆕 신규".
    pub async fn create_task(&self, req: CreateTaskRequest) -> Result<String> {
        let task_type = parse_label::<TaskType>(&req.task_type)?;
        let priority = parse_label::<Priority>(&req.priority)?;
        let source = parse_label::<TaskSource>(&req.source)?.unwrap_or_default();

        let Some(epic) = self.resolver.find_epic(&req.epic_name).await? else {
            return Ok(format::epic_not_found(&req.epic_name));
        };

        let mut properties = PropertyBag::new();
        properties.insert(task_fields::NAME.into(), title_value(&req.task_name));
        properties.insert(task_fields::EPIC.into(), relation_value(&epic.id));
        properties.insert(
            task_fields::STATUS.into(),
            select_value(TaskStatus::New.label()),
        );
        properties.insert(task_fields::SOURCE.into(), select_value(&source.to_string()));
        if let Some(task_type) = task_type {
            properties.insert(task_fields::TYPE.into(), select_value(&task_type.to_string()));
        }
        if let Some(priority) = priority {
            properties.insert(task_fields::PRIORITY.into(), select_value(&priority.to_string()));
        }

        let page = self
            .store
            .create_page(&self.collections.task_database_id, properties)
            .await?;
        info!(task_id = %page.id, epic_id = %epic.id, task = %req.task_name, "Task created");

        Ok(format::task_created(
            &req.task_name,
            &req.epic_name,
            &task_type.map(|t| t.to_string()).unwrap_or_default(),
            &priority.map(|p| p.to_string()).unwrap_or_default(),
            &page.url,
        ))
    }

    /// Mark a Task done. The Task is resolved within its Epic; an empty
    /// `epic_name` resolves it across all Epics.
    pub async fn complete_task(&self, epic_name: &str, task_name: &str) -> Result<String> {
        let epic_id = if epic_name.is_empty() {
            None
        } else {
            match self.resolver.find_epic(epic_name).await? {
                Some(epic) => Some(epic.id),
                None => return Ok(format::epic_not_found(epic_name)),
            }
        };

        let Some(task) = self
            .resolver
            .find_task(task_name, epic_id.as_deref())
            .await?
        else {
            return Ok(format::task_not_found(task_name));
        };

        self.mutator.mark_done(&task.id).await?;
        Ok(format::task_completed(task_name))
    }

    /// Append a session log to an Epic page, marking the listed Tasks done.
    pub async fn log_session(
        &self,
        epic_name: &str,
        summary: &str,
        tasks_done: &str,
    ) -> Result<String> {
        self.log_session_at(epic_name, summary, tasks_done, now_kst())
            .await
    }

    pub async fn log_session_at(
        &self,
        epic_name: &str,
        summary: &str,
        tasks_done: &str,
        at: DateTime<FixedOffset>,
    ) -> Result<String> {
        let Some(epic) = self.resolver.find_epic(epic_name).await? else {
            return Ok(format::epic_not_found(epic_name));
        };

        let mut completed = Vec::new();
        let mut not_found = Vec::new();
        for name in parse_task_list(tasks_done) {
            match self.resolver.find_task(&name, Some(&epic.id)).await? {
                Some(task) => {
                    self.mutator.mark_done(&task.id).await?;
                    completed.push(name);
                }
                None => {
                    warn!(task = %name, epic = epic_name, "Task not found, skipping");
                    not_found.push(name);
                }
            }
        }

        let entry = SessionLogEntry::new(&at, summary, completed);
        self.store
            .append_block_children(&epic.id, &entry.to_blocks())
            .await?;
        info!(
            epic_id = %epic.id,
            completed = entry.completed.len(),
            "Session log appended"
        );

        Ok(format::session_logged(epic_name, &entry, &not_found))
    }

    /// Status distribution and progress of an Epic.
    pub async fn update_dashboard(&self, epic_name: &str) -> Result<String> {
        let Some(epic) = self.resolver.find_epic(epic_name).await? else {
            return Ok(format::epic_not_found(epic_name));
        };
        let dashboard = self.aggregator.aggregate(&epic).await?;
        Ok(format::dashboard(epic_name, &dashboard))
    }
}
