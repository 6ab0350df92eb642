//! Error types for the diff crate.

/// Errors that can occur during diff operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// Positional comparison needs both tables to have the same row count.
    #[error("table shape mismatch: authoritative has {authoritative} rows, remote has {remote}")]
    ShapeMismatch { authoritative: usize, remote: usize },
}
