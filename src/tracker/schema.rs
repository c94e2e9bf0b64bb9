//! Collection ids and property names of the Epic and Task databases

/// Default ids of the AX Epics / Task Backlog workspace.
pub mod defaults {
    pub const EPIC_DATA_SOURCE_ID: &str = "2ed686b4-9b3b-8164-a922-000b2ed41878";
    pub const TASK_DATA_SOURCE_ID: &str = "bb11b501-847c-4621-9bf1-44387c93cb66";
    pub const TASK_DATABASE_ID: &str = "abbfbcff-91ce-4f5b-b182-241f77bba9db";
}

/// Epic property names.
pub mod epic_fields {
    pub const NAME: &str = "Epic Name";
    pub const STATUS: &str = "Status";
    pub const START_DATE: &str = "Start Date";
    pub const TARGET_DATE: &str = "Target Date";
    pub const TASK_COUNT: &str = "Task Count";
    pub const PROGRESS: &str = "Progress";
}

/// Task property names.
pub mod task_fields {
    pub const NAME: &str = "업무명";
    pub const EPIC: &str = "Epic";
    pub const STATUS: &str = "현재 상태";
    pub const COMPLETED: &str = "Completed";
    pub const PRIORITY: &str = "Priority";
    pub const SOURCE: &str = "Source";
    pub const TYPE: &str = "Type";
}

/// Page sizes used per collection. Neither exceeds the service cap.
pub const EPIC_PAGE_SIZE: u32 = 50;
pub const TASK_PAGE_SIZE: u32 = 100;

/// Where Epics and Tasks live in the remote workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collections {
    /// Data source queried for Epics
    pub epic_data_source_id: String,
    /// Data source queried for Tasks
    pub task_data_source_id: String,
    /// Database new Tasks are created under
    pub task_database_id: String,
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            epic_data_source_id: defaults::EPIC_DATA_SOURCE_ID.into(),
            task_data_source_id: defaults::TASK_DATA_SOURCE_ID.into(),
            task_database_id: defaults::TASK_DATABASE_ID.into(),
        }
    }
}
