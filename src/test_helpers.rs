//! Test helper factories and mock workspace builders
//!
//! Provides convenience functions for creating Epic/Task pages in the shape
//! the service returns, and a pre-seeded in-memory workspace.
#![allow(dead_code)]

use crate::notion::mock::MockNotionStore;
use crate::notion::{Page, PropertyBag};
use crate::tracker::schema::{epic_fields, task_fields, Collections};
use serde_json::{json, Value};

// ============================================================================
// Page factories
// ============================================================================

fn response_title(text: &str) -> Value {
    json!({"type": "title", "title": [{"type": "text", "plain_text": text, "text": {"content": text}}]})
}

fn response_select(name: &str) -> Value {
    if name.is_empty() {
        json!({"type": "select", "select": null})
    } else {
        json!({"type": "select", "select": {"name": name}})
    }
}

/// An Epic page starting 2026-01-01 with no target date and no task-count
/// rollup.
pub fn test_epic_page(id: &str, name: &str, status: &str, progress: Option<f64>) -> Page {
    let mut props = PropertyBag::new();
    props.insert(epic_fields::NAME.into(), response_title(name));
    props.insert(epic_fields::STATUS.into(), response_select(status));
    props.insert(
        epic_fields::START_DATE.into(),
        json!({"type": "date", "date": {"start": "2026-01-01", "end": null}}),
    );
    props.insert(
        epic_fields::TARGET_DATE.into(),
        json!({"type": "date", "date": null}),
    );
    props.insert(
        epic_fields::PROGRESS.into(),
        json!({"type": "rollup", "rollup": {"type": "number", "number": progress}}),
    );
    Page {
        id: id.to_string(),
        url: format!("https://www.notion.so/{}", id),
        properties: props,
    }
}

/// A MEDIUM / Internal / Feature Task page related to `epic_id`. The
/// completion checkbox agrees with `status`.
pub fn test_task_page(id: &str, name: &str, epic_id: &str, status: &str) -> Page {
    let completed = matches!(status, "Done" | "Completed");
    let mut props = PropertyBag::new();
    props.insert(task_fields::NAME.into(), response_title(name));
    props.insert(
        task_fields::EPIC.into(),
        json!({"type": "relation", "relation": [{"id": epic_id}]}),
    );
    props.insert(task_fields::STATUS.into(), response_select(status));
    props.insert(
        task_fields::COMPLETED.into(),
        json!({"type": "checkbox", "checkbox": completed}),
    );
    props.insert(task_fields::PRIORITY.into(), response_select("MEDIUM"));
    props.insert(task_fields::SOURCE.into(), response_select("Internal"));
    props.insert(task_fields::TYPE.into(), response_select("Feature"));
    Page {
        id: id.to_string(),
        url: format!("https://www.notion.so/{}", id),
        properties: props,
    }
}

// ============================================================================
// Mock workspace
// ============================================================================

/// Three Epics and their Tasks:
///
/// - E1 (In Progress, 25%): T1 (In Progress), T3 (Blocked), Shared (신규)
/// - E2 (Planning, no rollup): no Tasks
/// - E3 (Done, 50%): Shared (Done), Wrap-up (Completed), Untriaged (no
///   status), Other epic task (Done)
///
/// The E3 "Shared" comes first in service order.
pub async fn mock_workspace() -> MockNotionStore {
    let store = MockNotionStore::new();
    let collections = Collections::default();
    store
        .link_database(
            &collections.task_database_id,
            &collections.task_data_source_id,
        )
        .await;

    let epics = &collections.epic_data_source_id;
    store
        .insert_page(epics, test_epic_page("e1", "E1", "In Progress", Some(0.25)))
        .await;
    store
        .insert_page(epics, test_epic_page("e2", "E2", "Planning", None))
        .await;
    store
        .insert_page(epics, test_epic_page("e3", "E3", "Done", Some(0.5)))
        .await;

    let tasks = &collections.task_data_source_id;
    for page in [
        test_task_page("t-shared-e3", "Shared", "e3", "Done"),
        test_task_page("t1", "T1", "e1", "In Progress"),
        test_task_page("t3", "T3", "e1", "Blocked"),
        test_task_page("t-shared-e1", "Shared", "e1", "🆕 신규"),
        test_task_page("t-wrap", "Wrap-up", "e3", "Completed"),
        test_task_page("t-untriaged", "Untriaged", "e3", ""),
        test_task_page("t-other", "Other epic task", "e3", "Done"),
    ] {
        store.insert_page(tasks, page).await;
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::properties::{extract_rollup_number, extract_select, extract_title};

    #[test]
    fn test_factory_pages_decode() {
        let epic = test_epic_page("e", "Name", "", None);
        assert_eq!(extract_title(&epic.properties, epic_fields::NAME), "Name");
        assert_eq!(extract_select(&epic.properties, epic_fields::STATUS), "");
        assert_eq!(
            extract_rollup_number(&epic.properties, epic_fields::PROGRESS),
            None
        );
    }

    #[tokio::test]
    async fn test_mock_workspace_seeding() {
        use crate::notion::{NotionStore, QueryRequest};

        let store = mock_workspace().await;
        let collections = Collections::default();
        let epics = store
            .query_data_source(&collections.epic_data_source_id, &QueryRequest::new(None, 50))
            .await
            .unwrap();
        assert_eq!(epics.results.len(), 3);
        let tasks = store
            .query_data_source(&collections.task_data_source_id, &QueryRequest::new(None, 100))
            .await
            .unwrap();
        assert_eq!(tasks.results.len(), 7);
    }
}
