//! MCP Tool definitions
//!
//! Defines the six tracker tools exposed by the MCP server. Every parameter
//! is a string; optional ones default to the empty string unless noted.

use super::protocol::{InputSchema, ToolDefinition};
use serde_json::json;

/// Generate all tool definitions
pub fn all_tools() -> Vec<ToolDefinition> {
    let mut tools = Vec::new();
    tools.extend(epic_tools());
    tools.extend(task_tools());
    tools.extend(session_tools());
    tools
}

// ============================================================================
// Epic Tools (2)
// ============================================================================

fn epic_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "list_epics".to_string(),
            description: "List Epics with status, dates, task count and progress".to_string(),
            input_schema: InputSchema {
                schema_type: "object".to_string(),
                properties: Some(json!({
                    "status_filter": {"type": "string", "description": "Status to match exactly (Planning, In Progress, Done). Empty lists all"}
                })),
                required: None,
            },
        },
        ToolDefinition {
            name: "update_dashboard".to_string(),
            description: "Show an Epic dashboard: progress and task counts by status".to_string(),
            input_schema: InputSchema {
                schema_type: "object".to_string(),
                properties: Some(json!({
                    "epic_name": {"type": "string", "description": "Epic name (exact match)"}
                })),
                required: Some(vec!["epic_name".to_string()]),
            },
        },
    ]
}

// ============================================================================
// Task Tools (3)
// ============================================================================

fn task_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "list_tasks".to_string(),
            description: "List the Tasks of an Epic".to_string(),
            input_schema: InputSchema {
                schema_type: "object".to_string(),
                properties: Some(json!({
                    "epic_name": {"type": "string", "description": "Epic name (exact match). Empty or absent lists every Task"},
                    "status_filter": {"type": "string", "description": "Current status to match exactly (e.g. In Progress, Done)"}
                })),
                required: None,
            },
        },
        ToolDefinition {
            name: "create_task".to_string(),
            description: "Create a Task linked to an Epic with status 🆕 신규".to_string(),
            input_schema: InputSchema {
                schema_type: "object".to_string(),
                properties: Some(json!({
                    "epic_name": {"type": "string", "description": "Epic to link the Task to"},
                    "task_name": {"type": "string", "description": "New Task name"},
                    "task_type": {"type": "string", "description": "Feature, Maintenance, Research or Bug (default Feature)"},
                    "priority": {"type": "string", "description": "HIGH, MEDIUM or LOW (default MEDIUM)"},
                    "source": {"type": "string", "description": "Internal or External (default Internal)"}
                })),
                required: Some(vec!["epic_name".to_string(), "task_name".to_string()]),
            },
        },
        ToolDefinition {
            name: "complete_task".to_string(),
            description: "Mark a Task done (status Done, Completed checked)".to_string(),
            input_schema: InputSchema {
                schema_type: "object".to_string(),
                properties: Some(json!({
                    "epic_name": {"type": "string", "description": "Epic the Task belongs to. Empty searches every Task"},
                    "task_name": {"type": "string", "description": "Task name (exact match)"}
                })),
                required: Some(vec!["epic_name".to_string(), "task_name".to_string()]),
            },
        },
    ]
}

// ============================================================================
// Session Tools (1)
// ============================================================================

fn session_tools() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: "log_session".to_string(),
        description: "Append a work session log to an Epic page, optionally completing Tasks"
            .to_string(),
        input_schema: InputSchema {
            schema_type: "object".to_string(),
            properties: Some(json!({
                "epic_name": {"type": "string", "description": "Epic name"},
                "summary": {"type": "string", "description": "What was done in this session"},
                "tasks_done": {"type": "string", "description": "Comma-separated Task names to mark done"}
            })),
            required: Some(vec!["epic_name".to_string(), "summary".to_string()]),
        },
    }]
}
