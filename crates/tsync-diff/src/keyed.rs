//! Keyed diff: compare two tables by row code instead of by position.
//!
//! Insertions and deletions in the authoritative table shift every later
//! row, so a positional diff of tables with different shapes says little.
//! Keying by code reports what actually moved.

use std::collections::BTreeMap;
use std::fmt;

use tsync_types::{Row, RowCode, Table};

/// A code present on both sides with a different description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowChange {
    pub code: RowCode,
    pub old: String,
    pub new: String,
}

/// The result of comparing two tables keyed by code.
///
/// All three lists are sorted by code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyedDiff {
    /// Rows whose code exists only in the authoritative table.
    pub added: Vec<Row>,
    /// Rows whose code exists only in the remote table.
    pub removed: Vec<Row>,
    pub changed: Vec<RowChange>,
}

impl KeyedDiff {
    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of changes.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }
}

impl fmt::Display for KeyedDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+{} added, -{} removed, ~{} changed",
            self.added.len(),
            self.removed.len(),
            self.changed.len()
        )
    }
}

// Later duplicates overwrite earlier ones.
fn index_by_code(table: &Table) -> BTreeMap<RowCode, &str> {
    table
        .iter()
        .map(|row| (row.code, row.description.as_str()))
        .collect()
}

/// Compute the keyed diff between the authoritative and remote tables.
pub fn diff_keyed(authoritative: &Table, remote: &Table) -> KeyedDiff {
    let ours = index_by_code(authoritative);
    let theirs = index_by_code(remote);
    let mut diff = KeyedDiff::default();

    for (&code, &new) in &ours {
        match theirs.get(&code) {
            Some(&old) if old != new => diff.changed.push(RowChange {
                code,
                old: old.to_string(),
                new: new.to_string(),
            }),
            Some(_) => {}
            None => diff.added.push(Row::new(code, new)),
        }
    }

    for (&code, &old) in &theirs {
        if !ours.contains_key(&code) {
            diff.removed.push(Row::new(code, old));
        }
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(i64, &str)]) -> Table {
        rows.iter().map(|&(c, d)| Row::new(c, d)).collect()
    }

    #[test]
    fn identical_tables_no_diff() {
        let t = table(&[(1, "A"), (2, "B")]);
        let diff = diff_keyed(&t, &t);
        assert!(diff.is_empty());
        assert_eq!(diff.to_string(), "+0 added, -0 removed, ~0 changed");
    }

    #[test]
    fn reordering_is_not_a_change() {
        let ours = table(&[(1, "A"), (2, "B")]);
        let theirs = table(&[(2, "B"), (1, "A")]);
        assert!(diff_keyed(&ours, &theirs).is_empty());
    }

    #[test]
    fn insertion_reported_once() {
        // Positionally every row after the insert would differ.
        let ours = table(&[(1, "A"), (5, "new"), (2, "B"), (3, "C")]);
        let theirs = table(&[(1, "A"), (2, "B"), (3, "C")]);
        let diff = diff_keyed(&ours, &theirs);
        assert_eq!(diff.added, vec![Row::new(5, "new")]);
        assert!(diff.removed.is_empty());
        assert!(diff.changed.is_empty());
    }

    #[test]
    fn mixed_changes_sorted_by_code() {
        let ours = table(&[(4, "d"), (1, "A"), (3, "c2")]);
        let theirs = table(&[(3, "c"), (2, "b"), (1, "A"), (9, "z")]);
        let diff = diff_keyed(&ours, &theirs);

        assert_eq!(diff.added, vec![Row::new(4, "d")]);
        assert_eq!(diff.removed, vec![Row::new(2, "b"), Row::new(9, "z")]);
        assert_eq!(
            diff.changed,
            vec![RowChange { code: 3, old: "c".into(), new: "c2".into() }]
        );
        assert_eq!(diff.len(), 4);
    }

    #[test]
    fn duplicate_codes_last_wins() {
        let ours = table(&[(1, "first"), (1, "second")]);
        let theirs = table(&[(1, "second")]);
        assert!(diff_keyed(&ours, &theirs).is_empty());
    }
}
