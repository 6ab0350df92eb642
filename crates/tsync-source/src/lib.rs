//! Authoritative table sources for tablesync.
//!
//! A source produces the ordered rows the remote table must end up holding.
//! Retries and backoff, if any, are the source's business; the sync engine
//! calls [`SourceTableProvider::fetch`] once per run.
//!
//! # Providers
//!
//! - [`HttpTableSource`] -- GET a page and extract a two-column HTML table
//! - [`FileTableSource`] -- the same extraction over a page saved to disk
//! - [`StaticTableSource`] -- fixed rows, for tests and embedding

pub mod error;
pub mod extract;
pub mod html;
pub mod http;
pub mod local;
pub mod traits;

pub use error::{SourceError, SourceResult};
pub use extract::{HtmlTableExtractor, DEFAULT_TABLE_CLASS};
pub use http::HttpTableSource;
pub use local::{FileTableSource, StaticTableSource};
pub use traits::SourceTableProvider;
