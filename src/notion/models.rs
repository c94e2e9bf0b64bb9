//! Wire models for the Notion API

use super::properties::PropertyBag;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A page (database record) as returned by query, create, and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub properties: PropertyBag,
}

/// First page of a data source query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl QueryResponse {
    pub fn first(self) -> Option<Page> {
        self.results.into_iter().next()
    }
}

/// Error object returned by the service on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// A run of text inside a block.
#[derive(Debug, Clone, PartialEq)]
pub struct RichText {
    pub content: String,
    pub bold: bool,
}

impl RichText {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            bold: false,
        }
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            bold: true,
        }
    }

    fn to_json(&self) -> Value {
        let mut run = json!({"type": "text", "text": {"content": self.content}});
        if self.bold {
            run["annotations"] = json!({"bold": true});
        }
        run
    }
}

/// The block kinds written to an Epic page.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Divider,
    Heading3(Vec<RichText>),
    Paragraph(Vec<RichText>),
}

impl Block {
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Divider => "divider",
            Block::Heading3(_) => "heading_3",
            Block::Paragraph(_) => "paragraph",
        }
    }

    /// Concatenated text content of the block.
    pub fn text(&self) -> String {
        match self {
            Block::Divider => String::new(),
            Block::Heading3(runs) | Block::Paragraph(runs) => {
                runs.iter().map(|r| r.content.as_str()).collect()
            }
        }
    }

    pub fn to_json(&self) -> Value {
        let kind = self.type_name();
        let body = match self {
            Block::Divider => json!({}),
            Block::Heading3(runs) | Block::Paragraph(runs) => {
                json!({"rich_text": runs.iter().map(RichText::to_json).collect::<Vec<_>>()})
            }
        };
        let mut block = json!({"object": "block", "type": kind});
        block[kind] = body;
        block
    }
}

impl Serialize for Block {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
