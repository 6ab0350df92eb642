//! Positional diff: compare two tables row-by-row at matching indices.
//!
//! A row's identity is its index. Row `i` is changed when
//! `authoritative[i] != remote[i]`, comparing both fields exactly.

use tsync_types::{Row, Table};

use crate::error::DiffError;

/// Rows of the authoritative table that differ from the remote copy.
///
/// `changed_rows[k]` sits at index `changed_indices[k]`; indices are strictly
/// increasing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffResult {
    pub changed_rows: Vec<Row>,
    pub changed_indices: Vec<usize>,
}

impl DiffResult {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no rows differ.
    pub fn is_empty(&self) -> bool {
        self.changed_indices.is_empty()
    }

    /// Number of changed rows.
    pub fn len(&self) -> usize {
        self.changed_indices.len()
    }

    /// Iterate `(index, row)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.changed_indices
            .iter()
            .copied()
            .zip(self.changed_rows.iter())
    }

    fn push(&mut self, index: usize, row: Row) {
        self.changed_indices.push(index);
        self.changed_rows.push(row);
    }
}

/// Compute the positional diff between the authoritative and remote tables.
///
/// Fails with [`DiffError::ShapeMismatch`] when the tables have different
/// lengths; nothing is truncated or guessed.
pub fn diff_positional(authoritative: &Table, remote: &Table) -> Result<DiffResult, DiffError> {
    if authoritative.len() != remote.len() {
        return Err(DiffError::ShapeMismatch {
            authoritative: authoritative.len(),
            remote: remote.len(),
        });
    }

    let mut diff = DiffResult::new();
    for (index, (ours, theirs)) in authoritative.iter().zip(remote.iter()).enumerate() {
        if ours != theirs {
            diff.push(index, ours.clone());
        }
    }
    Ok(diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table(rows: &[(i64, &str)]) -> Table {
        rows.iter().map(|&(c, d)| Row::new(c, d)).collect()
    }

    #[test]
    fn identical_tables_no_diff() {
        let t = table(&[(1, "A"), (2, "B")]);
        let diff = diff_positional(&t, &t).unwrap();
        assert!(diff.is_empty());
        assert_eq!(diff.len(), 0);
    }

    #[test]
    fn single_changed_row() {
        let ours = table(&[(1, "A"), (2, "B"), (3, "C")]);
        let theirs = table(&[(1, "A"), (9, "X"), (3, "C")]);

        let diff = diff_positional(&ours, &theirs).unwrap();
        assert_eq!(diff.changed_indices, vec![1]);
        assert_eq!(diff.changed_rows, vec![Row::new(2, "B")]);
    }

    #[test]
    fn reports_authoritative_side() {
        let ours = table(&[(1, "new")]);
        let theirs = table(&[(1, "old")]);
        let diff = diff_positional(&ours, &theirs).unwrap();
        assert_eq!(diff.changed_rows[0].description, "new");
    }

    #[test]
    fn description_only_change_detected() {
        let ours = table(&[(1, "A"), (2, "B")]);
        let theirs = table(&[(1, "A"), (2, "b")]);
        let diff = diff_positional(&ours, &theirs).unwrap();
        assert_eq!(diff.changed_indices, vec![1]);
    }

    #[test]
    fn indices_ascending_across_many_changes() {
        let ours = table(&[(0, "a"), (1, "b"), (2, "c"), (3, "d"), (4, "e"), (5, "f")]);
        let theirs = table(&[(0, "a"), (1, "b"), (7, "z"), (3, "d"), (4, "e"), (5, "g")]);
        let diff = diff_positional(&ours, &theirs).unwrap();
        assert_eq!(diff.changed_indices, vec![2, 5]);
        let pairs: Vec<(usize, i64)> = diff.iter().map(|(i, r)| (i, r.code)).collect();
        assert_eq!(pairs, vec![(2, 2), (5, 5)]);
    }

    #[test]
    fn empty_tables_no_diff() {
        let diff = diff_positional(&Table::new(), &Table::new()).unwrap();
        assert!(diff.is_empty());
    }

    #[test]
    fn shape_mismatch_rejected() {
        let ours = table(&[(1, "A"), (2, "B"), (3, "C")]);
        let theirs = table(&[(1, "A"), (2, "B"), (3, "C"), (4, "D")]);
        let err = diff_positional(&ours, &theirs).unwrap_err();
        assert_eq!(err, DiffError::ShapeMismatch { authoritative: 3, remote: 4 });
    }

    fn arb_table(len: usize) -> impl Strategy<Value = Table> {
        prop::collection::vec((0i64..5, "[a-c]{0,2}"), len)
            .prop_map(|rows| rows.into_iter().map(|(c, d)| Row::new(c, d)).collect())
    }

    fn arb_pair() -> impl Strategy<Value = (Table, Table)> {
        (0usize..16).prop_flat_map(|len| (arb_table(len), arb_table(len)))
    }

    proptest! {
        #[test]
        fn self_diff_is_empty(t in (0usize..16).prop_flat_map(arb_table)) {
            prop_assert!(diff_positional(&t, &t).unwrap().is_empty());
        }

        #[test]
        fn reported_indices_symmetric((a, b) in arb_pair()) {
            let ab = diff_positional(&a, &b).unwrap();
            let ba = diff_positional(&b, &a).unwrap();
            prop_assert_eq!(&ab.changed_indices, &ba.changed_indices);
        }

        #[test]
        fn indices_strictly_increasing((a, b) in arb_pair()) {
            let diff = diff_positional(&a, &b).unwrap();
            prop_assert_eq!(diff.changed_rows.len(), diff.changed_indices.len());
            prop_assert!(diff.changed_indices.windows(2).all(|w| w[0] < w[1]));
            for (i, row) in diff.iter() {
                prop_assert_eq!(row, &a[i]);
                prop_assert_ne!(row, &b[i]);
            }
        }
    }
}
