use std::fmt;

use thiserror::Error;
use tsync_source::SourceError;
use tsync_store::StoreError;

use crate::types::ParseIssue;

/// Pipeline stage a sync run failed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Scrape,
    RemoteRead,
    Diff,
    RemoteWrite,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scrape => write!(f, "scrape"),
            Self::RemoteRead => write!(f, "remote-read"),
            Self::Diff => write!(f, "diff"),
            Self::RemoteWrite => write!(f, "remote-write"),
        }
    }
}

/// Every error is fatal to the run; none are retried.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("could not fetch source table: {0}")]
    SourceFetch(#[from] SourceError),

    #[error("authoritative table is empty; refusing to create an empty remote table")]
    EmptySource,

    #[error("could not read remote table: {0}")]
    RemoteRead(#[source] StoreError),

    #[error("{} malformed row code(s) in remote table", .issues.len())]
    Parse { issues: Vec<ParseIssue> },

    #[error("table shape mismatch: authoritative has {authoritative} rows, remote has {remote}")]
    ShapeMismatch { authoritative: usize, remote: usize },

    #[error("could not write remote table: {0}")]
    RemoteWrite(#[source] StoreError),
}

impl SyncError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::SourceFetch(_) | Self::EmptySource => Stage::Scrape,
            Self::RemoteRead(_) | Self::Parse { .. } => Stage::RemoteRead,
            Self::ShapeMismatch { .. } => Stage::Diff,
            Self::RemoteWrite(_) => Stage::RemoteWrite,
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_named() {
        assert_eq!(SyncError::EmptySource.stage().to_string(), "scrape");
        assert_eq!(
            SyncError::RemoteRead(StoreError::TableNotFound).stage().to_string(),
            "remote-read"
        );
        assert_eq!(
            SyncError::ShapeMismatch { authoritative: 3, remote: 4 }.stage(),
            Stage::Diff
        );
        assert_eq!(
            SyncError::RemoteWrite(StoreError::AlreadyExists).stage().to_string(),
            "remote-write"
        );
    }

    #[test]
    fn parse_error_counts_issues() {
        let err = SyncError::Parse {
            issues: vec![
                ParseIssue { index: 0, raw: "x".into() },
                ParseIssue { index: 4, raw: "".into() },
            ],
        };
        assert_eq!(err.to_string(), "2 malformed row code(s) in remote table");
        assert_eq!(err.stage(), Stage::RemoteRead);
    }
}
