use async_trait::async_trait;
use tsync_types::Table;

use crate::error::StoreResult;
use crate::write::CellWrite;

/// One remote row as raw cell text: `(code, description)`.
pub type RawRow = (String, String);

/// Handle to a single two-column table inside a remote document.
///
/// Implementations own the wire format and authentication. They never
/// interpret cell contents beyond storing them.
#[async_trait]
pub trait RemoteTableHandle: Send + Sync {
    /// Whether a table exists at the target location.
    async fn exists(&self) -> StoreResult<bool>;

    /// Read every row of the table as raw, unparsed cell text.
    async fn fetch_rows(&self) -> StoreResult<Vec<RawRow>>;

    /// Create the table with `rows.len()` rows and two columns.
    async fn create(&self, rows: &Table) -> StoreResult<()>;

    /// Apply a batch of sparse positional writes in one call.
    async fn patch(&self, writes: &[CellWrite]) -> StoreResult<()>;
}
