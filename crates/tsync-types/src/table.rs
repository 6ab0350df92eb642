use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::row::Row;

/// An ordered sequence of rows.
///
/// Insertion order is meaningful: a row's position is its identity when two
/// tables are compared positionally.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self { rows: iter.into_iter().collect() }
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl Index<usize> for Table {
    type Output = Row;

    fn index(&self, index: usize) -> &Row {
        &self.rows[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(vec![Row::new(1, "A"), Row::new(2, "B"), Row::new(3, "C")])
    }

    #[test]
    fn preserves_insertion_order() {
        let t = sample();
        let codes: Vec<i64> = t.iter().map(|r| r.code).collect();
        assert_eq!(codes, vec![1, 2, 3]);
        assert_eq!(t[1], Row::new(2, "B"));
    }

    #[test]
    fn empty_table() {
        let t = Table::new();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert!(t.get(0).is_none());
    }

    #[test]
    fn collect_from_iterator() {
        let t: Table = (1..=4).map(|i| Row::new(i, format!("r{i}"))).collect();
        assert_eq!(t.len(), 4);
        assert_eq!(t.get(3).unwrap().description, "r4");
    }

    #[test]
    fn serializes_as_plain_array() {
        let json = serde_json::to_string(&Table::from_rows(vec![Row::new(1, "A")])).unwrap();
        assert_eq!(json, r#"[{"code":1,"description":"A"}]"#);
    }
}
