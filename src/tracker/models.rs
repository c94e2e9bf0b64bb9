//! Epic and Task records and their label enums
//!
//! Labels are stored in the workspace as free select option names. Known
//! labels map onto enum variants; `TaskStatus` keeps unknown names verbatim
//! so nothing is rewritten on the way through.

use super::schema::{epic_fields, task_fields};
use crate::notion::properties::{
    extract_checkbox, extract_date, extract_relation_ids, extract_rollup_number, extract_select,
    extract_title,
};
use crate::notion::Page;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Task status
// ============================================================================

/// Current status label of a Task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// "🆕 신규", the status every created Task starts with
    New,
    InProgress,
    Done,
    /// Legacy synonym of `Done`; kept distinct in storage
    Completed,
    Blocked,
    Other(String),
}

impl TaskStatus {
    pub const NEW_LABEL: &'static str = "🆕 신규";

    /// Map a stored label to a status. Returns `None` for an empty label.
    pub fn from_label(label: &str) -> Option<Self> {
        let status = match label {
            "" => return None,
            Self::NEW_LABEL => Self::New,
            "In Progress" => Self::InProgress,
            "Done" => Self::Done,
            "Completed" => Self::Completed,
            "Blocked" => Self::Blocked,
            other => Self::Other(other.to_string()),
        };
        Some(status)
    }

    pub fn label(&self) -> &str {
        match self {
            Self::New => Self::NEW_LABEL,
            Self::InProgress => "In Progress",
            Self::Done => "Done",
            Self::Completed => "Completed",
            Self::Blocked => "Blocked",
            Self::Other(label) => label,
        }
    }

    /// Equivalence class used when aggregating.
    pub fn class(&self) -> StatusClass {
        match self {
            Self::Done | Self::Completed => StatusClass::Done,
            Self::InProgress => StatusClass::InProgress,
            Self::Blocked => StatusClass::Blocked,
            Self::New | Self::Other(_) => StatusClass::Other,
        }
    }

    pub fn is_done(&self) -> bool {
        self.class() == StatusClass::Done
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregation buckets. `Done` and `Completed` both fall into `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    Done,
    InProgress,
    Blocked,
    Other,
}

// ============================================================================
// Task labels
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Unknown priority: {} (expected HIGH, MEDIUM or LOW)", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskSource {
    #[default]
    Internal,
    External,
}

impl fmt::Display for TaskSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => write!(f, "Internal"),
            Self::External => write!(f, "External"),
        }
    }
}

impl FromStr for TaskSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "internal" => Ok(Self::Internal),
            "external" => Ok(Self::External),
            _ => Err(format!("Unknown source: {} (expected Internal or External)", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskType {
    #[default]
    Feature,
    Maintenance,
    Research,
    Bug,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feature => write!(f, "Feature"),
            Self::Maintenance => write!(f, "Maintenance"),
            Self::Research => write!(f, "Research"),
            Self::Bug => write!(f, "Bug"),
        }
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feature" => Ok(Self::Feature),
            "maintenance" => Ok(Self::Maintenance),
            "research" => Ok(Self::Research),
            "bug" => Ok(Self::Bug),
            _ => Err(format!(
                "Unknown task type: {} (expected Feature, Maintenance, Research or Bug)",
                s
            )),
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// An Epic decoded from its page.
#[derive(Debug, Clone, PartialEq)]
pub struct Epic {
    pub id: String,
    pub name: String,
    /// Status label, empty when unset
    pub status: String,
    pub start_date: String,
    pub target_date: String,
    /// Rollup over related Tasks
    pub task_count: Option<f64>,
    /// Rollup fraction in `[0, 1]`
    pub progress: Option<f64>,
}

impl Epic {
    pub fn from_page(page: &Page) -> Self {
        let props = &page.properties;
        Self {
            id: page.id.clone(),
            name: extract_title(props, epic_fields::NAME),
            status: extract_select(props, epic_fields::STATUS),
            start_date: extract_date(props, epic_fields::START_DATE),
            target_date: extract_date(props, epic_fields::TARGET_DATE),
            task_count: extract_rollup_number(props, epic_fields::TASK_COUNT),
            progress: extract_rollup_number(props, epic_fields::PROGRESS),
        }
    }

    /// Progress as a whole percentage, `None` when the rollup is absent.
    pub fn progress_percent(&self) -> Option<i64> {
        self.progress.map(|p| (p * 100.0).round() as i64)
    }
}

/// A Task decoded from its page.
///
/// Priority, source, and type are kept as the stored label text: records
/// edited by hand in the workspace may carry options this tool never writes.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub url: String,
    pub name: String,
    pub epic_ids: Vec<String>,
    pub status: Option<TaskStatus>,
    pub completed: bool,
    pub priority: String,
    pub source: String,
    pub task_type: String,
}

impl Task {
    pub fn from_page(page: &Page) -> Self {
        let props = &page.properties;
        Self {
            id: page.id.clone(),
            url: page.url.clone(),
            name: extract_title(props, task_fields::NAME),
            epic_ids: extract_relation_ids(props, task_fields::EPIC),
            status: TaskStatus::from_label(&extract_select(props, task_fields::STATUS)),
            completed: extract_checkbox(props, task_fields::COMPLETED),
            priority: extract_select(props, task_fields::PRIORITY),
            source: extract_select(props, task_fields::SOURCE),
            task_type: extract_select(props, task_fields::TYPE),
        }
    }

    pub fn is_done(&self) -> bool {
        self.status.as_ref().is_some_and(TaskStatus::is_done)
    }
}
