use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;
use tsync_types::Table;

use crate::error::SourceResult;
use crate::extract::HtmlTableExtractor;
use crate::traits::SourceTableProvider;

/// A source that always yields the same rows.
#[derive(Clone, Debug, Default)]
pub struct StaticTableSource {
    table: Table,
}

impl StaticTableSource {
    pub fn new(table: Table) -> Self {
        Self { table }
    }
}

#[async_trait]
impl SourceTableProvider for StaticTableSource {
    async fn fetch(&self) -> SourceResult<Table> {
        Ok(self.table.clone())
    }
}

/// Extracts the authoritative table from an HTML page saved on disk.
#[derive(Clone, Debug)]
pub struct FileTableSource {
    path: PathBuf,
    extractor: HtmlTableExtractor,
}

impl FileTableSource {
    pub fn new(path: impl Into<PathBuf>, extractor: HtmlTableExtractor) -> Self {
        Self { path: path.into(), extractor }
    }
}

#[async_trait]
impl SourceTableProvider for FileTableSource {
    async fn fetch(&self) -> SourceResult<Table> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        let table = self.extractor.extract(&body)?;
        info!(path = %self.path.display(), rows = table.len(), "data scraped");
        Ok(table)
    }
}
