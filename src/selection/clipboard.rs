//! Text exchange format for selected ranges.
//!
//! Cells are joined with tabs and rows with newlines, with no trailing
//! newline. A single cell is copied as its raw text; range cells that contain
//! tabs, newlines or quotes are quoted so a paste reproduces the same shape.

use crate::csv::{escape_field, parse_records, Delimiter};
use crate::provider::DataProvider;
use crate::selection::CellRange;

/// Serialize a range of cells for the clipboard.
pub fn serialize_range(provider: &dyn DataProvider, range: &CellRange) -> String {
    if range.is_single_cell() {
        return provider
            .cell_contents(range.left, range.top)
            .unwrap_or_default();
    }

    let mut out = String::new();
    for row in range.top..=range.bottom {
        if row > range.top {
            out.push('\n');
        }
        for col in range.left..=range.right {
            if col > range.left {
                out.push('\t');
            }
            if let Some(text) = provider.cell_contents(col, row) {
                out.push_str(&escape_field(&text));
            }
        }
    }
    out
}

/// Split clipboard text into rows of cells.
///
/// A trailing newline does not produce an extra empty row.
pub fn parse_clipboard(text: &str) -> Vec<Vec<String>> {
    parse_records(text, Delimiter::Tab)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::provider::TableProvider;

    fn table() -> TableProvider {
        TableProvider::new([["a", "b", "c"], ["d", "", "f"], ["g", "h", "i"]])
    }

    #[test]
    fn test_single_cell_is_raw() {
        let range = CellRange::from_corners((0, 0), (0, 0));
        assert_eq!(serialize_range(&table(), &range), "a");
    }

    #[test]
    fn test_range_has_no_trailing_newline() {
        let range = CellRange::from_corners((0, 0), (2, 1));
        assert_eq!(serialize_range(&table(), &range), "a\tb\tc\nd\t\tf");
    }

    #[test]
    fn test_empty_single_cell() {
        let range = CellRange::from_corners((1, 1), (1, 1));
        assert_eq!(serialize_range(&table(), &range), "");
    }

    #[test]
    fn test_tab_inside_cell_is_quoted() {
        let table = TableProvider::new([["x\ty", "z"]]);
        let range = CellRange::from_corners((0, 0), (1, 0));
        let text = serialize_range(&table, &range);
        assert_eq!(text, "\"x\ty\"\tz");
        assert_eq!(parse_clipboard(&text), vec![vec!["x\ty", "z"]]);
    }

    #[test]
    fn test_parse_trailing_newline() {
        let rows = parse_clipboard("1\t2\n3\t4\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["3", "4"]);
    }
}
