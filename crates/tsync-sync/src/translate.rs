//! Translation between tables and the remote's cell-level representation.

use tracing::warn;
use tsync_diff::DiffResult;
use tsync_store::{CellWrite, RawRow};
use tsync_types::{parse_code, Row, Table};

use crate::error::{SyncError, SyncResult};
use crate::types::{ParseIssue, ParsePolicy};

pub use tsync_types::rows_to_positional_values;

/// Parse raw remote rows into a table.
///
/// Under [`ParsePolicy::Lenient`] a malformed code becomes `0` and is
/// reported in the returned issues. Under [`ParsePolicy::Strict`] any
/// malformed code fails with [`SyncError::Parse`].
pub fn parse_remote_rows(
    raw: &[RawRow],
    policy: ParsePolicy,
) -> SyncResult<(Table, Vec<ParseIssue>)> {
    let mut table = Table::new();
    let mut issues = Vec::new();
    for (index, (code, description)) in raw.iter().enumerate() {
        let code = parse_code(code).unwrap_or_else(|_| {
            issues.push(ParseIssue { index, raw: code.clone() });
            0
        });
        table.push(Row::new(code, description.as_str()));
    }

    if policy == ParsePolicy::Strict && !issues.is_empty() {
        return Err(SyncError::Parse { issues });
    }
    for issue in &issues {
        warn!(row = issue.index, raw = %issue.raw, "malformed row code coerced to 0");
    }
    Ok((table, issues))
}

/// One single-row write per changed row, in ascending row order.
pub fn diff_to_writes(diff: &DiffResult) -> Vec<CellWrite> {
    diff.iter().map(|(index, row)| CellWrite::row(index, row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsync_diff::diff_positional;

    fn raw(rows: &[(&str, &str)]) -> Vec<RawRow> {
        rows.iter().map(|(c, d)| (c.to_string(), d.to_string())).collect()
    }

    #[test]
    fn parses_clean_rows() {
        let (table, issues) =
            parse_remote_rows(&raw(&[("1", "A"), ("2", "B")]), ParsePolicy::Lenient).unwrap();
        assert_eq!(table.rows(), &[Row::new(1, "A"), Row::new(2, "B")]);
        assert!(issues.is_empty());
    }

    #[test]
    fn lenient_coerces_and_reports() {
        let (table, issues) =
            parse_remote_rows(&raw(&[("1", "A"), ("x", "B"), ("", "C")]), ParsePolicy::Lenient)
                .unwrap();
        assert_eq!(table[1], Row::new(0, "B"));
        assert_eq!(table[2], Row::new(0, "C"));
        assert_eq!(
            issues,
            vec![
                ParseIssue { index: 1, raw: "x".into() },
                ParseIssue { index: 2, raw: "".into() },
            ]
        );
    }

    #[test]
    fn strict_fails_with_every_issue() {
        let err = parse_remote_rows(&raw(&[("x", "A"), ("2", "B"), ("y", "C")]), ParsePolicy::Strict)
            .unwrap_err();
        match err {
            SyncError::Parse { issues } => {
                let indices: Vec<usize> = issues.iter().map(|i| i.index).collect();
                assert_eq!(indices, vec![0, 2]);
            }
            other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn writes_follow_diff_order() {
        let ours: Table = (0..6).map(|i| Row::new(i, "same")).collect();
        let mut theirs = ours.clone().into_rows();
        theirs[2].description = "other".into();
        theirs[5].code = 50;
        let diff = diff_positional(&ours, &Table::from_rows(theirs)).unwrap();

        let writes = diff_to_writes(&diff);
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], CellWrite { start_row: 2, start_column: 0, values: vec![(2, "same".into())] });
        assert_eq!(writes[1].start_row, 5);
        assert_eq!(writes[1].values, vec![(5, "same".to_string())]);
    }
}
