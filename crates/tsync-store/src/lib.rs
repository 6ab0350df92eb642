//! Remote table storage for tablesync.
//!
//! A remote table lives inside a document owned by someone else. This crate
//! defines the narrow interface the sync engine needs from it and ships two
//! backends.
//!
//! # Storage Backends
//!
//! All backends implement the [`RemoteTableHandle`] trait:
//!
//! - [`InMemoryRemoteTable`] -- lock-guarded table with call accounting, for tests and embedding
//! - [`JsonDocumentTable`] -- one table inside a JSON document file on disk
//!
//! # Design Rules
//!
//! 1. Cells are stored as text, the way a document stores them; parsing is the caller's job.
//! 2. A table is always two columns wide.
//! 3. A patch batch is validated in full before any cell is written.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod document;
pub mod error;
pub mod memory;
pub mod traits;
pub mod write;

pub use document::{Document, JsonDocumentTable};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryRemoteTable;
pub use traits::{RawRow, RemoteTableHandle};
pub use write::{CellWrite, TABLE_COLUMNS};
