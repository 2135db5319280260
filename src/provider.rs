//! Data provider contract and an in-memory table implementation.
//!
//! The grid core never looks at storage; it only asks a [`DataProvider`] for
//! extents and cell text and hands it writes.

use crate::csv::{parse_records, Delimiter};
use crate::error::{GridError, Result};

/// Source of cell text and data extent for a grid view.
pub trait DataProvider {
    /// Number of columns.
    fn column_count(&self) -> u32;

    /// Number of rows, including any heading rows the provider presents.
    fn row_count(&self) -> u32;

    /// Text of a cell, `None` when the cell is empty or out of range.
    fn cell_contents(&self, column: u32, row: u32) -> Option<String>;

    /// Replace a cell's text; `None` clears it.
    ///
    /// # Errors
    /// Implementations refuse writes with [`GridError::ReadOnly`],
    /// [`GridError::ReadOnlyCell`] or [`GridError::OutOfRange`].
    fn set_cell_contents(&mut self, column: u32, row: u32, value: Option<&str>) -> Result<()>;

    /// Unit label shown for a column, if any.
    fn column_units(&self, _column: u32) -> Option<String> {
        None
    }

    /// True when no cell accepts writes.
    fn is_read_only(&self) -> bool {
        false
    }

    /// True when a single cell would refuse a write.
    fn is_cell_read_only(&self, _column: u32, _row: u32) -> bool {
        self.is_read_only()
    }
}

/// In-memory table of optional strings.
///
/// Headings and units, when present, are presented as the leading rows of the
/// grid (row 0 for headings, row 1 for units) and refuse writes. They are the
/// natural candidates for frozen rows.
#[derive(Debug, Clone, Default)]
pub struct TableProvider {
    headings: Option<Vec<String>>,
    units: Option<Vec<Option<String>>>,
    rows: Vec<Vec<Option<String>>>,
    column_count: u32,
    read_only: bool,
}

impl TableProvider {
    /// Create a table from rows of text. Empty strings become empty cells.
    pub fn new<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<Vec<Option<String>>> = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|s| {
                        let s: String = s.into();
                        (!s.is_empty()).then_some(s)
                    })
                    .collect()
            })
            .collect();
        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            headings: None,
            units: None,
            rows,
            column_count: u32::try_from(column_count).unwrap_or(u32::MAX),
            read_only: false,
        }
    }

    /// Present a heading row above the data.
    #[must_use]
    pub fn with_headings<S: Into<String>>(mut self, headings: impl IntoIterator<Item = S>) -> Self {
        let headings: Vec<String> = headings.into_iter().map(Into::into).collect();
        let len = u32::try_from(headings.len()).unwrap_or(u32::MAX);
        self.column_count = self.column_count.max(len);
        self.headings = Some(headings);
        self
    }

    /// Present a units row below the headings. Ignored if every unit is `None`.
    #[must_use]
    pub fn with_units<S: Into<String>>(
        mut self,
        units: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        let units: Vec<Option<String>> = units.into_iter().map(|u| u.map(Into::into)).collect();
        if units.iter().any(Option::is_some) {
            self.units = Some(units);
        }
        self
    }

    /// Refuse every write.
    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Load delimited text. With `has_headings`, the first record becomes the
    /// heading row.
    pub fn from_delimited(text: &str, delim: Delimiter, has_headings: bool) -> Self {
        let mut records = parse_records(text, delim);
        if has_headings && !records.is_empty() {
            let headings = records.remove(0);
            Self::new(records).with_headings(headings)
        } else {
            Self::new(records)
        }
    }

    /// Number of leading rows that are headings or units.
    pub fn heading_rows(&self) -> u32 {
        u32::from(self.headings.is_some()) + u32::from(self.units.is_some())
    }

    fn data_row(&self, row: u32) -> Option<usize> {
        row.checked_sub(self.heading_rows()).map(|r| r as usize)
    }
}

impl DataProvider for TableProvider {
    fn column_count(&self) -> u32 {
        self.column_count
    }

    fn row_count(&self) -> u32 {
        let data_rows = u32::try_from(self.rows.len()).unwrap_or(u32::MAX);
        data_rows.saturating_add(self.heading_rows())
    }

    fn cell_contents(&self, column: u32, row: u32) -> Option<String> {
        if column >= self.column_count {
            return None;
        }
        let col = column as usize;
        if let (0, Some(headings)) = (row, &self.headings) {
            return headings.get(col).cloned();
        }
        if self.units.is_some() && row.checked_add(1) == Some(self.heading_rows()) {
            return self.column_units(column);
        }
        let data_row = self.data_row(row)?;
        self.rows.get(data_row)?.get(col)?.clone()
    }

    fn set_cell_contents(&mut self, column: u32, row: u32, value: Option<&str>) -> Result<()> {
        if self.read_only {
            return Err(GridError::ReadOnly);
        }
        if column >= self.column_count || row >= self.row_count() {
            return Err(GridError::OutOfRange { column, row });
        }
        let Some(data_row) = self.data_row(row) else {
            return Err(GridError::ReadOnlyCell { column, row });
        };
        let width = self.column_count as usize;
        let cells = self
            .rows
            .get_mut(data_row)
            .ok_or(GridError::OutOfRange { column, row })?;
        if cells.len() < width {
            cells.resize(width, None);
        }
        let cell = cells
            .get_mut(column as usize)
            .ok_or(GridError::OutOfRange { column, row })?;
        *cell = value.filter(|v| !v.is_empty()).map(str::to_string);
        Ok(())
    }

    fn column_units(&self, column: u32) -> Option<String> {
        self.units.as_ref()?.get(column as usize)?.clone()
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn is_cell_read_only(&self, _column: u32, row: u32) -> bool {
        self.read_only || row < self.heading_rows()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn sample() -> TableProvider {
        TableProvider::new([["a1", "b1"], ["a2", "b2"]])
            .with_headings(["A", "B"])
            .with_units([None, Some("g/m2")])
    }

    #[test]
    fn test_extents_include_heading_rows() {
        let table = sample();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.heading_rows(), 2);
        assert_eq!(table.row_count(), 4);
    }

    #[test]
    fn test_heading_and_units_rows() {
        let table = sample();
        assert_eq!(table.cell_contents(0, 0).as_deref(), Some("A"));
        assert_eq!(table.cell_contents(0, 1), None);
        assert_eq!(table.cell_contents(1, 1).as_deref(), Some("g/m2"));
        assert_eq!(table.cell_contents(1, 3).as_deref(), Some("b2"));
    }

    #[test]
    fn test_units_all_none_is_ignored() {
        let table = TableProvider::new([["x"]])
            .with_headings(["X"])
            .with_units([None::<String>]);
        assert_eq!(table.heading_rows(), 1);
    }

    #[test]
    fn test_write_and_clear() {
        let mut table = sample();
        table.set_cell_contents(0, 2, Some("new")).unwrap();
        assert_eq!(table.cell_contents(0, 2).as_deref(), Some("new"));
        table.set_cell_contents(0, 2, None).unwrap();
        assert_eq!(table.cell_contents(0, 2), None);
    }

    #[test]
    fn test_heading_write_refused() {
        let mut table = sample();
        let err = table.set_cell_contents(0, 0, Some("x")).unwrap_err();
        assert!(matches!(err, GridError::ReadOnlyCell { column: 0, row: 0 }));
        assert!(table.is_cell_read_only(1, 1));
    }

    #[test]
    fn test_read_only_table_refuses_everything() {
        let mut table = sample().read_only(true);
        let err = table.set_cell_contents(0, 3, None).unwrap_err();
        assert!(matches!(err, GridError::ReadOnly));
        assert_eq!(table.cell_contents(0, 3).as_deref(), Some("a2"));
    }

    #[test]
    fn test_out_of_range() {
        let mut table = sample();
        assert_eq!(table.cell_contents(5, 0), None);
        assert_eq!(table.cell_contents(0, u32::MAX), None);
        assert_eq!(table.cell_contents(u32::MAX, u32::MAX), None);
        let err = table.set_cell_contents(0, 9, Some("x")).unwrap_err();
        assert!(matches!(err, GridError::OutOfRange { .. }));
    }

    #[test]
    fn test_ragged_rows_pad_on_write() {
        let mut table = TableProvider::new(vec![vec!["a", "b", "c"], vec!["d"]]);
        assert_eq!(table.column_count(), 3);
        table.set_cell_contents(2, 1, Some("f")).unwrap();
        assert_eq!(table.cell_contents(2, 1).as_deref(), Some("f"));
    }

    #[test]
    fn test_from_delimited_with_headings() {
        let table = TableProvider::from_delimited("A,B\n1,2\n3,4\n", Delimiter::Comma, true);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell_contents(1, 0).as_deref(), Some("B"));
        assert_eq!(table.cell_contents(1, 2).as_deref(), Some("4"));
    }

    #[test]
    fn test_empty_table() {
        let table = TableProvider::default();
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.cell_contents(0, 0), None);
    }
}
