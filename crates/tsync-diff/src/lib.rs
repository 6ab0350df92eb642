//! Diff engine for tablesync.
//!
//! Compares an authoritative table against the copy held remotely.
//!
//! # Key Types
//!
//! - [`DiffResult`] -- index-by-index comparison of two equal-length tables
//! - [`KeyedDiff`] / [`RowChange`] -- comparison keyed by row code (added/removed/changed)

pub mod error;
pub mod keyed;
pub mod positional;

pub use error::DiffError;
pub use keyed::{diff_keyed, KeyedDiff, RowChange};
pub use positional::{diff_positional, DiffResult};
