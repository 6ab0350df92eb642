use tracing::debug;
use tsync_types::{parse_code_lenient, Row, Table};

use crate::error::{SourceError, SourceResult};
use crate::html::{self, Block};

/// Class carried by tables rendered by Confluence pages.
pub const DEFAULT_TABLE_CLASS: &str = "confluenceTable";

/// Pulls a two-column `(code, description)` table out of an HTML page.
///
/// The first `<table>` whose `class` list contains `table_class` is used.
/// Later matching tables on the same page are ignored rather than appended.
/// Rows come from its `<tbody>` (or the whole table if there is none). For
/// each `<tr>`, the first cell is the code and the second the description.
/// Rows with no `<td>` cells, such as `<th>` header rows, are skipped. A code
/// that is not an integer becomes `0`; a missing description becomes empty.
#[derive(Clone, Debug)]
pub struct HtmlTableExtractor {
    table_class: String,
}

impl HtmlTableExtractor {
    pub fn new(table_class: impl Into<String>) -> Self {
        Self { table_class: table_class.into() }
    }

    pub fn table_class(&self) -> &str {
        &self.table_class
    }

    pub fn extract(&self, doc: &str) -> SourceResult<Table> {
        let lower = doc.to_ascii_lowercase();
        let table = self
            .find_table(doc, &lower)
            .ok_or_else(|| SourceError::TableNotFound { class: self.table_class.clone() })?;

        let (from, limit) = match html::next_element(&lower, "tbody", table.open_end, table.inner_end) {
            Some(body) => (body.open_end, body.inner_end),
            None => (table.open_end, table.inner_end),
        };

        let mut rows = Table::new();
        let mut pos = from;
        while let Some(mut tr) = html::next_element(&lower, "tr", pos, limit) {
            html::end_at_next_sibling(&lower, &mut tr, &["tr"]);
            pos = tr.end;
            if let Some(row) = read_row(doc, &lower, &tr) {
                rows.push(row);
            }
        }
        debug!(class = %self.table_class, rows = rows.len(), "extracted table");
        Ok(rows)
    }

    fn find_table(&self, doc: &str, lower: &str) -> Option<Block> {
        let mut pos = 0;
        while let Some(table) = html::next_element(lower, "table", pos, lower.len()) {
            let classes = html::attr(table.open_tag(doc), "class").unwrap_or_default();
            if classes.split_whitespace().any(|c| c == self.table_class) {
                return Some(table);
            }
            pos = table.open_end;
        }
        None
    }
}

impl Default for HtmlTableExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_CLASS)
    }
}

/// Next `<td>` or `<th>` cell in `lower[from..limit]`, and whether it is a `<td>`.
fn next_cell(lower: &str, from: usize, limit: usize) -> Option<(Block, bool)> {
    let td = html::find_open(lower, "td", from, limit);
    let th = html::find_open(lower, "th", from, limit);
    let (tag, is_data) = match (td, th) {
        (Some(d), Some(h)) if h < d => ("th", false),
        (Some(_), _) => ("td", true),
        (None, Some(_)) => ("th", false),
        (None, None) => return None,
    };
    let mut cell = html::next_element(lower, tag, from, limit)?;
    html::end_at_next_sibling(lower, &mut cell, &["td", "th"]);
    Some((cell, is_data))
}

fn read_row(doc: &str, lower: &str, tr: &Block) -> Option<Row> {
    let mut cells = Vec::new();
    let mut has_data = false;
    let mut pos = tr.open_end;
    while let Some((cell, is_data)) = next_cell(lower, pos, tr.inner_end) {
        has_data |= is_data;
        cells.push(html::text(cell.inner(doc)));
        pos = cell.end;
    }
    if !has_data {
        return None;
    }
    let mut cells = cells.into_iter();
    let code = parse_code_lenient(&cells.next().unwrap_or_default());
    let description = cells.next().unwrap_or_default();
    Some(Row::new(code, description))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
  <table class="other"><tr><td>99</td><td>Wrong table</td></tr></table>
  <div class="table-wrap">
  <table class="wrapped confluenceTable">
    <colgroup><col/><col/></colgroup>
    <TBODY>
      <tr><th class="confluenceTh">Code</th><th class="confluenceTh">Description</th></tr>
      <tr><td class="confluenceTd">1</td><td class="confluenceTd">Alpha</td></tr>
      <tr><td class="confluenceTd"> 2 </td><td class="confluenceTd"><p>Beta &amp; <b>Gamma</b></p></td></tr>
      <tr><td class="confluenceTd">n/a</td><td class="confluenceTd">Bad code</td></tr>
    </TBODY>
  </table>
  </div>
</body></html>"#;

    #[test]
    fn extracts_rows_from_matching_table() {
        let table = HtmlTableExtractor::default().extract(PAGE).unwrap();
        assert_eq!(
            table.rows(),
            &[
                Row::new(1, "Alpha"),
                Row::new(2, "Beta & Gamma"),
                Row::new(0, "Bad code"),
            ]
        );
    }

    #[test]
    fn custom_class() {
        let table = HtmlTableExtractor::new("other").extract(PAGE).unwrap();
        assert_eq!(table.rows(), &[Row::new(99, "Wrong table")]);
    }

    #[test]
    fn class_must_match_whole_token() {
        let err = HtmlTableExtractor::new("confluence").extract(PAGE).unwrap_err();
        assert!(matches!(err, SourceError::TableNotFound { class } if class == "confluence"));
    }

    #[test]
    fn table_without_tbody_and_unclosed_cells() {
        let page = "<table class=confluenceTable><tr><td>5<td>Five<tr><td>6<td>Six</table>";
        let table = HtmlTableExtractor::default().extract(page).unwrap();
        assert_eq!(table.rows(), &[Row::new(5, "Five"), Row::new(6, "Six")]);
    }

    #[test]
    fn single_cell_row_has_empty_description() {
        let page = r#"<table class="confluenceTable"><tbody><tr><td>7</td></tr></tbody></table>"#;
        let table = HtmlTableExtractor::default().extract(page).unwrap();
        assert_eq!(table.rows(), &[Row::new(7, "")]);
    }

    #[test]
    fn empty_tbody_gives_empty_table() {
        let page = r#"<table class="confluenceTable"><tbody></tbody></table>"#;
        assert!(HtmlTableExtractor::default().extract(page).unwrap().is_empty());
    }

    #[test]
    fn later_matching_tables_ignored() {
        let page = concat!(
            r#"<table class="confluenceTable"><tbody><tr><td>1</td><td>A</td></tr></tbody></table>"#,
            r#"<table class="confluenceTable"><tbody><tr><td>2</td><td>B</td></tr></tbody></table>"#,
        );
        let table = HtmlTableExtractor::default().extract(page).unwrap();
        assert_eq!(table.rows(), &[Row::new(1, "A")]);
    }
}
