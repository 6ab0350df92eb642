use std::fmt;

use serde::{Deserialize, Serialize};
use tsync_store::CellWrite;

/// How malformed codes in the remote table are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Coerce to `0`, record a [`ParseIssue`], and carry on.
    #[default]
    Lenient,
    /// Fail the run, listing every malformed row.
    Strict,
}

/// A remote row whose code cell is not an integer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseIssue {
    pub index: usize,
    pub raw: String,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {:?}", self.index, self.raw)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOptions {
    #[serde(default)]
    pub parse_policy: ParsePolicy,
}

/// The single remote write a reconcile decided on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncAction {
    /// No table exists; upload the whole authoritative table.
    Create,
    /// Remote already matches.
    Noop,
    /// Overwrite only these rows, in one batch.
    Patch(Vec<CellWrite>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncPlan {
    pub action: SyncAction,
    pub parse_issues: Vec<ParseIssue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum SyncOutcome {
    Created { rows: usize },
    Unchanged,
    Patched { count: usize },
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { rows } => write!(f, "table created ({rows} rows)"),
            Self::Unchanged => write!(f, "table unchanged"),
            Self::Patched { count } => write!(f, "table updated ({count} rows patched)"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    #[serde(flatten)]
    pub outcome: SyncOutcome,
    pub parse_issues: Vec<ParseIssue>,
}
