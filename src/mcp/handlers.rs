//! MCP Tool handlers
//!
//! Maps tool arguments onto the tracker operations. Each handler returns
//! the operation's display text.

use crate::tracker::{CreateTaskRequest, EpicTracker};
use anyhow::{anyhow, Result};
use serde_json::{json, Value};

/// Handles MCP tool calls
pub struct ToolHandler {
    tracker: EpicTracker,
}

impl ToolHandler {
    pub fn new(tracker: EpicTracker) -> Self {
        Self { tracker }
    }

    /// Handle a tool call and return the result text
    pub async fn handle(&self, name: &str, args: Option<Value>) -> Result<String> {
        let args = args.unwrap_or(json!({}));

        match name {
            // Epics
            "list_epics" => self.list_epics(args).await,
            "update_dashboard" => self.update_dashboard(args).await,

            // Tasks
            "list_tasks" => self.list_tasks(args).await,
            "create_task" => self.create_task(args).await,
            "complete_task" => self.complete_task(args).await,

            // Sessions
            "log_session" => self.log_session(args).await,

            _ => Err(anyhow!("Unknown tool: {}", name)),
        }
    }

    // ========================================================================
    // Epic Handlers
    // ========================================================================

    async fn list_epics(&self, args: Value) -> Result<String> {
        let status_filter = optional_str(&args, "status_filter");
        self.tracker.list_epics(status_filter).await
    }

    async fn update_dashboard(&self, args: Value) -> Result<String> {
        let epic_name = required_str(&args, "epic_name")?;
        self.tracker.update_dashboard(epic_name).await
    }

    // ========================================================================
    // Task Handlers
    // ========================================================================

    async fn list_tasks(&self, args: Value) -> Result<String> {
        let epic_name = optional_str(&args, "epic_name");
        let status_filter = optional_str(&args, "status_filter");
        self.tracker.list_tasks(epic_name, status_filter).await
    }

    async fn create_task(&self, args: Value) -> Result<String> {
        let epic_name = required_str(&args, "epic_name")?;
        let task_name = required_str(&args, "task_name")?;

        let mut req = CreateTaskRequest::new(epic_name, task_name);
        if let Some(task_type) = args.get("task_type").and_then(|v| v.as_str()) {
            req.task_type = task_type.to_string();
        }
        if let Some(priority) = args.get("priority").and_then(|v| v.as_str()) {
            req.priority = priority.to_string();
        }
        if let Some(source) = args.get("source").and_then(|v| v.as_str()) {
            req.source = source.to_string();
        }

        self.tracker.create_task(req).await
    }

    async fn complete_task(&self, args: Value) -> Result<String> {
        let epic_name = required_str(&args, "epic_name")?;
        let task_name = required_str(&args, "task_name")?;
        self.tracker.complete_task(epic_name, task_name).await
    }

    // ========================================================================
    // Session Handlers
    // ========================================================================

    async fn log_session(&self, args: Value) -> Result<String> {
        let epic_name = required_str(&args, "epic_name")?;
        let summary = required_str(&args, "summary")?;
        let tasks_done = optional_str(&args, "tasks_done");
        self.tracker.log_session(epic_name, summary, tasks_done).await
    }
}

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("{} is required", key))
}

fn optional_str<'a>(args: &'a Value, key: &str) -> &'a str {
    args.get(key).and_then(|v| v.as_str()).unwrap_or("")
}
