//! Property codec
//!
//! Notion returns record fields as a bag of typed wrappers keyed by property
//! name (`{"Status": {"type": "select", "select": {"name": "Done"}}}`).
//! The extractors here unwrap one projection each and are total: a missing
//! property, a `null` wrapper, or an empty rich-text array all decode to the
//! projection's empty value.
//!
//! The builders at the bottom produce the request-side shapes used when
//! creating or updating a page.

use serde_json::{json, Map, Value};

/// Property bag as returned by the service for a single page.
pub type PropertyBag = Map<String, Value>;

/// Plain text of the first run of a `title` property, or `""`.
pub fn extract_title(props: &PropertyBag, field: &str) -> String {
    props
        .get(field)
        .and_then(|p| p.get("title"))
        .and_then(|t| t.as_array())
        .and_then(|runs| runs.first())
        .and_then(|run| run.get("plain_text"))
        .and_then(|t| t.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Option name of a `select` property, or `""`.
pub fn extract_select(props: &PropertyBag, field: &str) -> String {
    props
        .get(field)
        .and_then(|p| p.get("select"))
        .and_then(|s| s.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or_default()
        .to_string()
}

/// ISO start date of a `date` property, or `""`.
pub fn extract_date(props: &PropertyBag, field: &str) -> String {
    props
        .get(field)
        .and_then(|p| p.get("date"))
        .and_then(|d| d.get("start"))
        .and_then(|s| s.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Numeric value of a `rollup` property.
///
/// Returns `None` when the rollup is absent or not a number, so callers can
/// tell "no value" apart from `0`.
pub fn extract_rollup_number(props: &PropertyBag, field: &str) -> Option<f64> {
    props
        .get(field)
        .and_then(|p| p.get("rollup"))
        .and_then(|r| r.get("number"))
        .and_then(|n| n.as_f64())
}

/// Value of a `checkbox` property, `false` when absent.
pub fn extract_checkbox(props: &PropertyBag, field: &str) -> bool {
    props
        .get(field)
        .and_then(|p| p.get("checkbox"))
        .and_then(|c| c.as_bool())
        .unwrap_or(false)
}

/// Page ids referenced by a `relation` property.
pub fn extract_relation_ids(props: &PropertyBag, field: &str) -> Vec<String> {
    props
        .get(field)
        .and_then(|p| p.get("relation"))
        .and_then(|r| r.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("id").and_then(|id| id.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// Request-side builders
// ============================================================================

pub fn title_value(text: &str) -> Value {
    json!({"title": [{"text": {"content": text}}]})
}

pub fn select_value(name: &str) -> Value {
    json!({"select": {"name": name}})
}

pub fn relation_value(page_id: &str) -> Value {
    json!({"relation": [{"id": page_id}]})
}

pub fn checkbox_value(checked: bool) -> Value {
    json!({"checkbox": checked})
}
