//! Trait abstraction for the remote workspace service

use super::filter::QueryRequest;
use super::models::{Block, Page, QueryResponse};
use super::properties::PropertyBag;
use anyhow::Result;
use async_trait::async_trait;

/// The four remote operations the tracker relies on.
///
/// Implemented by [`NotionClient`](super::NotionClient) over HTTP and by an
/// in-memory mock in tests. Each call is attempted exactly once.
#[async_trait]
pub trait NotionStore: Send + Sync {
    /// Query a data source, returning at most `request.page_size` records
    /// in service order.
    async fn query_data_source(
        &self,
        data_source_id: &str,
        request: &QueryRequest,
    ) -> Result<QueryResponse>;

    /// Create a record under a database.
    async fn create_page(&self, database_id: &str, properties: PropertyBag) -> Result<Page>;

    /// Overwrite the given properties of a record in a single write.
    async fn update_page(&self, page_id: &str, properties: PropertyBag) -> Result<Page>;

    /// Append blocks, in order, to the end of a page.
    async fn append_block_children(&self, block_id: &str, children: &[Block]) -> Result<()>;
}
