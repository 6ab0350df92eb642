use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tsync_types::Table;

use crate::error::{StoreError, StoreResult};
use crate::traits::{RawRow, RemoteTableHandle};
use crate::write::{apply_writes, table_to_cells, CellWrite, TABLE_COLUMNS};

/// A document holding zero or more two-column tables.
///
/// On-disk format:
/// ```text
/// { "tables": [ [ ["1", "Alpha"], ["2", "Beta"] ], ... ] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub tables: Vec<Vec<[String; TABLE_COLUMNS]>>,
}

/// One table, addressed by index, inside a JSON document file.
///
/// A missing file is an empty document. Saves go through a sibling temp file
/// and a rename so a crash never leaves a half-written document behind.
#[derive(Clone, Debug)]
pub struct JsonDocumentTable {
    path: PathBuf,
    table_index: usize,
}

impl JsonDocumentTable {
    pub fn new(path: impl Into<PathBuf>, table_index: usize) -> Self {
        Self { path: path.into(), table_index }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table_index(&self) -> usize {
        self.table_index
    }

    /// Load the whole document.
    pub async fn load(&self) -> StoreResult<Document> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Serialization(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the whole document.
    pub async fn save(&self, document: &Document) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "document saved");
        Ok(())
    }
}

#[async_trait]
impl RemoteTableHandle for JsonDocumentTable {
    async fn exists(&self) -> StoreResult<bool> {
        Ok(self.load().await?.tables.len() > self.table_index)
    }

    async fn fetch_rows(&self) -> StoreResult<Vec<RawRow>> {
        let document = self.load().await?;
        let cells = document
            .tables
            .get(self.table_index)
            .ok_or(StoreError::TableNotFound)?;
        debug!(table = self.table_index, rows = cells.len(), "fetched table rows");
        Ok(cells
            .iter()
            .map(|[code, desc]| (code.clone(), desc.clone()))
            .collect())
    }

    async fn create(&self, rows: &Table) -> StoreResult<()> {
        let mut document = self.load().await?;
        let tables = document.tables.len();
        if tables > self.table_index {
            return Err(StoreError::AlreadyExists);
        }
        // The new table must land at `table_index` or later lookups miss it.
        if tables < self.table_index {
            return Err(StoreError::IndexGap { index: self.table_index, tables });
        }
        document.tables.push(table_to_cells(rows));
        self.save(&document).await
    }

    async fn patch(&self, writes: &[CellWrite]) -> StoreResult<()> {
        let mut document = self.load().await?;
        let cells = document
            .tables
            .get_mut(self.table_index)
            .ok_or(StoreError::TableNotFound)?;
        apply_writes(cells, writes)?;
        self.save(&document).await
    }
}
