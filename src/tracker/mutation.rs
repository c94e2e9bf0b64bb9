//! Coupled status transitions on Task records

use super::models::TaskStatus;
use super::schema::task_fields;
use crate::notion::properties::{checkbox_value, select_value};
use crate::notion::{NotionStore, PropertyBag};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Target state of a Task's status label and completion flag.
///
/// The two fields always travel together: a transition is written as one
/// property update so no reader sees the label and the flag disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub status: TaskStatus,
    pub completed: bool,
}

impl StatusTransition {
    pub fn done() -> Self {
        Self::to(TaskStatus::Done)
    }

    /// Transition to `status`, deriving the completion flag from it.
    pub fn to(status: TaskStatus) -> Self {
        let completed = status.is_done();
        Self { status, completed }
    }

    pub fn to_properties(&self) -> PropertyBag {
        let mut props = PropertyBag::new();
        props.insert(
            task_fields::STATUS.to_string(),
            select_value(self.status.label()),
        );
        props.insert(
            task_fields::COMPLETED.to_string(),
            checkbox_value(self.completed),
        );
        props
    }
}

/// Applies status transitions to Tasks.
#[derive(Clone)]
pub struct StatusMutator {
    store: Arc<dyn NotionStore>,
}

impl StatusMutator {
    pub fn new(store: Arc<dyn NotionStore>) -> Self {
        Self { store }
    }

    pub async fn apply(&self, task_id: &str, transition: &StatusTransition) -> Result<()> {
        self.store
            .update_page(task_id, transition.to_properties())
            .await?;
        info!(
            task_id,
            status = transition.status.label(),
            completed = transition.completed,
            "Task status updated"
        );
        Ok(())
    }

    /// Set status "Done" and completion `true` in a single write.
    pub async fn mark_done(&self, task_id: &str) -> Result<()> {
        self.apply(task_id, &StatusTransition::done()).await
    }
}
