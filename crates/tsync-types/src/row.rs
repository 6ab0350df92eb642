use std::fmt;

use serde::{Deserialize, Serialize};

use crate::code::RowCode;

/// A single reference-table record.
///
/// Two rows are equal only when both fields match exactly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    pub code: RowCode,
    pub description: String,
}

impl Row {
    pub fn new(code: RowCode, description: impl Into<String>) -> Self {
        Self { code, description: description.into() }
    }

    /// The row as a positional `(code, description)` pair.
    pub fn to_pair(&self) -> (RowCode, String) {
        (self.code, self.description.clone())
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.code, self.description)
    }
}

impl From<(RowCode, String)> for Row {
    fn from((code, description): (RowCode, String)) -> Self {
        Self { code, description }
    }
}

impl From<(RowCode, &str)> for Row {
    fn from((code, description): (RowCode, &str)) -> Self {
        Self::new(code, description)
    }
}
