use async_trait::async_trait;
use tsync_types::Table;

use crate::error::SourceResult;

/// Produces the authoritative table for a sync run.
#[async_trait]
pub trait SourceTableProvider: Send + Sync {
    async fn fetch(&self) -> SourceResult<Table>;
}
