//! Query filter builder
//!
//! Filters are built as a small tree and serialized to the service's filter
//! object on the way out. A single condition is sent as-is; several are
//! wrapped in one `and` compound.

use serde::Serialize;
use serde_json::{json, Value};

/// Hard cap the service enforces on `page_size`.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A filter condition against one data source.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Exact, case-sensitive match on a title property.
    TitleEquals { property: String, value: String },
    /// Exact match on a select property's option name.
    SelectEquals { property: String, value: String },
    /// Relation property includes the given page id.
    RelationContains { property: String, page_id: String },
    /// All nested conditions hold.
    And(Vec<Filter>),
}

impl Filter {
    pub fn title_equals(property: &str, value: &str) -> Self {
        Filter::TitleEquals {
            property: property.to_string(),
            value: value.to_string(),
        }
    }

    pub fn select_equals(property: &str, value: &str) -> Self {
        Filter::SelectEquals {
            property: property.to_string(),
            value: value.to_string(),
        }
    }

    pub fn relation_contains(property: &str, page_id: &str) -> Self {
        Filter::RelationContains {
            property: property.to_string(),
            page_id: page_id.to_string(),
        }
    }

    /// Combine conditions: none yields no filter, one is passed through
    /// unchanged, more than one becomes an `And`.
    pub fn all(mut conditions: Vec<Filter>) -> Option<Filter> {
        match conditions.len() {
            0 => None,
            1 => conditions.pop(),
            _ => Some(Filter::And(conditions)),
        }
    }

    /// Serialize to the service's filter object.
    pub fn to_json(&self) -> Value {
        match self {
            Filter::TitleEquals { property, value } => {
                json!({"property": property, "title": {"equals": value}})
            }
            Filter::SelectEquals { property, value } => {
                json!({"property": property, "select": {"equals": value}})
            }
            Filter::RelationContains { property, page_id } => {
                json!({"property": property, "relation": {"contains": page_id}})
            }
            Filter::And(conditions) => {
                json!({"and": conditions.iter().map(Filter::to_json).collect::<Vec<_>>()})
            }
        }
    }
}

impl Serialize for Filter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Body of a data source query. Only the first page is ever requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    pub page_size: u32,
}

impl QueryRequest {
    /// Build a query, clamping `page_size` into `1..=MAX_PAGE_SIZE`.
    pub fn new(filter: Option<Filter>, page_size: u32) -> Self {
        Self {
            filter,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}
