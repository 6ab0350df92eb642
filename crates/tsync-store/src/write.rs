use serde::{Deserialize, Serialize};
use tsync_types::{rows_to_positional_values, PositionalValues, Row, Table};

use crate::error::{StoreError, StoreResult};

/// Every remote table has exactly two columns: code and description.
pub const TABLE_COLUMNS: usize = 2;

/// A sparse positional write: `values[k]` lands on row `start_row + k`,
/// filling both columns from `start_column`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellWrite {
    pub start_row: usize,
    pub start_column: usize,
    pub values: PositionalValues,
}

impl CellWrite {
    /// A write replacing a whole row at `index`.
    pub fn row(index: usize, row: &Row) -> Self {
        Self {
            start_row: index,
            start_column: 0,
            values: rows_to_positional_values(std::slice::from_ref(row)),
        }
    }

    /// Indices of every row this write touches.
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.start_row..self.start_row + self.values.len()
    }
}

/// Render a table as text cells.
pub(crate) fn table_to_cells(table: &Table) -> Vec<[String; TABLE_COLUMNS]> {
    rows_to_positional_values(table)
        .into_iter()
        .map(|(code, description)| [code.to_string(), description])
        .collect()
}

/// Check every write against the table bounds, then apply them in order.
///
/// Nothing is written if any write is out of bounds.
pub(crate) fn apply_writes(
    cells: &mut [[String; TABLE_COLUMNS]],
    writes: &[CellWrite],
) -> StoreResult<()> {
    let rows = cells.len();
    for write in writes {
        if write.start_column + TABLE_COLUMNS > TABLE_COLUMNS {
            return Err(StoreError::OutOfBounds {
                row: write.start_row,
                column: write.start_column + TABLE_COLUMNS - 1,
                rows,
            });
        }
        if write.rows().end > rows {
            return Err(StoreError::OutOfBounds {
                row: write.rows().end - 1,
                column: write.start_column,
                rows,
            });
        }
    }

    for write in writes {
        for (row, (code, description)) in write.rows().zip(write.values.iter()) {
            cells[row] = [code.to_string(), description.clone()];
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(rows: &[(&str, &str)]) -> Vec<[String; 2]> {
        rows.iter().map(|(c, d)| [c.to_string(), d.to_string()]).collect()
    }

    #[test]
    fn row_write_targets_column_zero() {
        let w = CellWrite::row(4, &Row::new(7, "seven"));
        assert_eq!(w.start_row, 4);
        assert_eq!(w.start_column, 0);
        assert_eq!(w.values, vec![(7, "seven".to_string())]);
        assert_eq!(w.rows(), 4..5);
    }

    #[test]
    fn table_renders_codes_as_text() {
        let t = Table::from_rows(vec![Row::new(10, "ten")]);
        assert_eq!(table_to_cells(&t), cells(&[("10", "ten")]));
    }

    #[test]
    fn apply_sparse_writes() {
        let mut c = cells(&[("1", "A"), ("9", "X"), ("3", "C")]);
        apply_writes(&mut c, &[CellWrite::row(1, &Row::new(2, "B"))]).unwrap();
        assert_eq!(c, cells(&[("1", "A"), ("2", "B"), ("3", "C")]));
    }

    #[test]
    fn out_of_bounds_row_writes_nothing() {
        let mut c = cells(&[("1", "A")]);
        let writes = [
            CellWrite::row(0, &Row::new(5, "E")),
            CellWrite::row(3, &Row::new(6, "F")),
        ];
        let err = apply_writes(&mut c, &writes).unwrap_err();
        assert!(matches!(err, StoreError::OutOfBounds { row: 3, rows: 1, .. }));
        assert_eq!(c, cells(&[("1", "A")]));
    }

    #[test]
    fn nonzero_start_column_rejected() {
        let mut c = cells(&[("1", "A")]);
        let w = CellWrite { start_row: 0, start_column: 1, values: vec![(1, "A".into())] };
        assert!(matches!(
            apply_writes(&mut c, &[w]),
            Err(StoreError::OutOfBounds { column: 2, .. })
        ));
    }
}
