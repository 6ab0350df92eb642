use crate::code::RowCode;
use crate::row::Row;

/// Rows flattened to positional `(code, description)` pairs, one per table row.
pub type PositionalValues = Vec<(RowCode, String)>;

/// Translate rows into positional pairs, preserving order.
pub fn rows_to_positional_values<'a, I>(rows: I) -> PositionalValues
where
    I: IntoIterator<Item = &'a Row>,
{
    rows.into_iter().map(Row::to_pair).collect()
}
