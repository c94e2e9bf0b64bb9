//! Epic / Task tracking over the Notion workspace
//!
//! - `resolver`: exact-title lookup of Epics and Epic-scoped Tasks
//! - `mutation`: coupled status + completion writes
//! - `dashboard`: status bucketing and progress
//! - `session`: session log entries
//! - `service`: the six operations exposed as tools

pub mod dashboard;
pub mod format;
pub mod models;
pub mod mutation;
pub mod resolver;
pub mod schema;
pub mod service;
pub mod session;

pub use dashboard::{Dashboard, DashboardAggregator, StatusBuckets, StatusSummary};
pub use models::{Epic, Priority, StatusClass, Task, TaskSource, TaskStatus, TaskType};
pub use mutation::{StatusMutator, StatusTransition};
pub use resolver::EntityResolver;
pub use schema::Collections;
pub use service::{CreateTaskRequest, EpicTracker, TrackerError};
