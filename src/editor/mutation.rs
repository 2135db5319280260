//! Cell editing mutations.
//!
//! Applies user edits and clears to a [`DataProvider`].

use crate::error::{GridError, Result};
use crate::provider::DataProvider;
use crate::selection::CellRange;

/// Apply a cell edit to the provider.
///
/// Surrounding whitespace is trimmed and an empty result clears the cell.
pub(crate) fn apply_cell_edit(
    provider: &mut dyn DataProvider,
    column: u32,
    row: u32,
    value: &str,
) -> Result<()> {
    let trimmed = value.trim();
    let value = (!trimmed.is_empty()).then_some(trimmed);
    provider.set_cell_contents(column, row, value)
}

/// Clear every cell of a range. Cells the provider refuses are skipped and
/// counted; the rest are still cleared.
///
/// Returns the number of cells cleared.
pub(crate) fn clear_range(provider: &mut dyn DataProvider, range: &CellRange) -> Result<usize> {
    if provider.is_read_only() {
        return Err(GridError::ReadOnly);
    }
    let mut writes = WriteTally::default();
    for (column, row) in range.cells() {
        writes.record(column, row, provider.set_cell_contents(column, row, None))?;
    }
    writes.finish()
}

/// Write rows of text starting at `(left, top)`, clipped to the provider's
/// extent. Returns the number of cells written.
pub(crate) fn write_block(
    provider: &mut dyn DataProvider,
    left: u32,
    top: u32,
    rows: &[Vec<String>],
) -> Result<usize> {
    if provider.is_read_only() {
        return Err(GridError::ReadOnly);
    }
    let column_count = provider.column_count();
    let row_count = provider.row_count();
    let mut writes = WriteTally::default();

    for (row, cells) in (top..row_count).zip(rows) {
        for (column, text) in (left..column_count).zip(cells) {
            let value = (!text.is_empty()).then_some(text.as_str());
            writes.record(column, row, provider.set_cell_contents(column, row, value))?;
        }
    }
    writes.finish()
}

/// Counts accepted and refused writes of a multi-cell operation.
#[derive(Default)]
struct WriteTally {
    written: usize,
    refused: usize,
    first_refused: Option<(u32, u32)>,
}

impl WriteTally {
    /// Record one write. Refusals are tallied; any other error aborts.
    fn record(&mut self, column: u32, row: u32, outcome: Result<()>) -> Result<()> {
        match outcome {
            Ok(()) => self.written += 1,
            Err(e) if e.is_refusal() => {
                tracing::warn!(column, row, error = %e, "write refused");
                self.refused += 1;
                self.first_refused.get_or_insert((column, row));
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn finish(self) -> Result<usize> {
        match self.first_refused {
            Some((column, row)) => Err(GridError::WritesRefused {
                refused: self.refused,
                column,
                row,
            }),
            None => Ok(self.written),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::provider::TableProvider;

    fn table() -> TableProvider {
        TableProvider::new([["a", "b"], ["c", "d"]]).with_headings(["H1", "H2"])
    }

    #[test]
    fn test_edit_trims_and_clears() {
        let mut t = table();
        apply_cell_edit(&mut t, 0, 1, "  hello ").unwrap();
        assert_eq!(t.cell_contents(0, 1).as_deref(), Some("hello"));
        apply_cell_edit(&mut t, 0, 1, "   ").unwrap();
        assert_eq!(t.cell_contents(0, 1), None);
    }

    #[test]
    fn test_clear_range_counts_refusals() {
        let mut t = table();
        let range = CellRange::from_corners((0, 0), (1, 2));
        let err = clear_range(&mut t, &range).unwrap_err();
        match err {
            GridError::WritesRefused { refused, column, row } => {
                assert_eq!(refused, 2);
                assert_eq!((column, row), (0, 0));
            }
            other => panic!("unexpected error {other:?}"),
        }
        // Data cells were still cleared.
        assert_eq!(t.cell_contents(0, 1), None);
        assert_eq!(t.cell_contents(1, 2), None);
        assert_eq!(t.cell_contents(0, 0).as_deref(), Some("H1"));
    }

    #[test]
    fn test_write_block_clips_to_extent() {
        let mut t = table();
        let rows = vec![
            vec!["1".to_string(), "2".to_string(), "3".to_string()],
            vec!["4".to_string()],
            vec!["5".to_string()],
        ];
        let written = write_block(&mut t, 1, 1, &rows).unwrap();
        assert_eq!(written, 2);
        assert_eq!(t.cell_contents(1, 1).as_deref(), Some("1"));
        assert_eq!(t.cell_contents(1, 2).as_deref(), Some("4"));
    }

    #[test]
    fn test_read_only_refused_up_front() {
        let mut t = table().read_only(true);
        let range = CellRange::from_corners((0, 1), (0, 1));
        assert!(matches!(clear_range(&mut t, &range), Err(GridError::ReadOnly)));
    }
}
