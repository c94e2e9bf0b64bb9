//! Notion API binding: wire models, property codec, filters, and the store trait

pub mod client;
pub mod error;
pub mod filter;
pub mod models;
pub mod properties;
pub mod traits;

pub use client::NotionClient;
pub use error::NotionError;
pub use filter::{Filter, QueryRequest};
pub use models::{Block, Page, QueryResponse, RichText};
pub use properties::PropertyBag;
pub use traits::NotionStore;

#[cfg(test)]
pub(crate) mod mock;
