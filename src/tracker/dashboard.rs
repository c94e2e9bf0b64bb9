//! Epic dashboard aggregation
//!
//! Buckets an Epic's Tasks by status label and derives the headline counts.
//! Only the first `TASK_PAGE_SIZE` related Tasks are fetched; any beyond
//! that are not counted.

use super::models::{Epic, StatusClass, TaskStatus};
use super::schema::{task_fields, Collections, TASK_PAGE_SIZE};
use crate::notion::properties::extract_select;
use crate::notion::{Filter, NotionStore, Page, QueryRequest};
use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Bucket for Tasks without a status label.
pub const NO_STATUS_BUCKET: &str = "없음";

/// Task counts per status label, iterated in lexicographic label order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBuckets(BTreeMap<String, usize>);

impl StatusBuckets {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buckets = BTreeMap::new();
        for label in labels {
            let label = label.as_ref();
            let key = if label.is_empty() { NO_STATUS_BUCKET } else { label };
            *buckets.entry(key.to_string()).or_insert(0) += 1;
        }
        Self(buckets)
    }

    pub fn count(&self, label: &str) -> usize {
        self.0.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(label, count)| (label.as_str(), *count))
    }

    /// Sum of the buckets whose label falls into `class`.
    fn class_total(&self, class: StatusClass) -> usize {
        self.iter()
            .filter(|(label, _)| {
                TaskStatus::from_label(label).map_or(StatusClass::Other, |s| s.class()) == class
            })
            .map(|(_, count)| count)
            .sum()
    }
}

/// Headline counts. `total == done + in_progress + blocked + other` holds by
/// construction: every bucket belongs to exactly one class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub total: usize,
    pub done: usize,
    pub in_progress: usize,
    pub blocked: usize,
    pub other: usize,
}

impl StatusSummary {
    pub fn from_buckets(buckets: &StatusBuckets) -> Self {
        let summary = Self {
            total: buckets.total(),
            done: buckets.class_total(StatusClass::Done),
            in_progress: buckets.class_total(StatusClass::InProgress),
            blocked: buckets.class_total(StatusClass::Blocked),
            other: buckets.class_total(StatusClass::Other),
        };
        debug_assert_eq!(
            summary.total,
            summary.done + summary.in_progress + summary.blocked + summary.other
        );
        summary
    }
}

/// Everything the dashboard view shows for one Epic.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub epic: Epic,
    pub buckets: StatusBuckets,
    pub summary: StatusSummary,
    /// More related Tasks exist than were fetched
    pub truncated: bool,
}

impl Dashboard {
    /// Aggregate an Epic page and the Task pages related to it.
    pub fn from_pages(epic_page: &Page, tasks: &[Page], truncated: bool) -> Self {
        let buckets = StatusBuckets::from_labels(
            tasks
                .iter()
                .map(|t| extract_select(&t.properties, task_fields::STATUS)),
        );
        let summary = StatusSummary::from_buckets(&buckets);
        Self {
            epic: Epic::from_page(epic_page),
            buckets,
            summary,
            truncated,
        }
    }
}

/// Fetches an Epic's Tasks and aggregates them.
#[derive(Clone)]
pub struct DashboardAggregator {
    store: Arc<dyn NotionStore>,
    collections: Collections,
}

impl DashboardAggregator {
    pub fn new(store: Arc<dyn NotionStore>, collections: Collections) -> Self {
        Self { store, collections }
    }

    /// Aggregate the Tasks related to an already-resolved Epic page.
    pub async fn aggregate(&self, epic_page: &Page) -> Result<Dashboard> {
        let request = QueryRequest::new(
            Some(Filter::relation_contains(task_fields::EPIC, &epic_page.id)),
            TASK_PAGE_SIZE,
        );
        let response = self
            .store
            .query_data_source(&self.collections.task_data_source_id, &request)
            .await?;

        if response.has_more {
            warn!(
                epic_id = %epic_page.id,
                limit = TASK_PAGE_SIZE,
                "Epic has more tasks than one page; dashboard counts only the first page"
            );
        }

        let dashboard = Dashboard::from_pages(epic_page, &response.results, response.has_more);
        debug!(epic_id = %epic_page.id, summary = ?dashboard.summary, "Dashboard aggregated");
        Ok(dashboard)
    }
}
