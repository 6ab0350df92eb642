//! Reconciliation engine for tablesync.
//!
//! Brings a remote two-column table into agreement with an authoritative
//! table using the smallest possible write: create the table if it is
//! missing, otherwise patch only the rows that differ. A reconcile issues at
//! most one mutating call.

pub mod engine;
pub mod error;
pub mod translate;
pub mod types;

pub use engine::TableSyncEngine;
pub use error::{Stage, SyncError, SyncResult};
pub use translate::{diff_to_writes, parse_remote_rows, rows_to_positional_values};
pub use types::{ParseIssue, ParsePolicy, SyncAction, SyncOptions, SyncOutcome, SyncPlan, SyncReport};
