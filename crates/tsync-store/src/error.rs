/// Errors from remote table operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No table exists at the target location.
    #[error("table not found")]
    TableNotFound,

    /// A table already exists where one was to be created.
    #[error("table already exists")]
    AlreadyExists,

    /// A table was to be created past the end of the document.
    #[error("cannot create table {index}: document holds only {tables} table(s)")]
    IndexGap { index: usize, tables: usize },

    /// A write addressed a cell outside the table.
    #[error("cell out of bounds: row {row}, column {column} (table has {rows} rows)")]
    OutOfBounds { row: usize, column: usize, rows: usize },

    /// The backing document could not be decoded or encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote refused or could not serve the request.
    #[error("remote unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
