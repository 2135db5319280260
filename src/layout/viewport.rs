//! Viewport state: column widths, frozen panes, scroll offsets, and the
//! pixel geometry derived from them.
//!
//! Scroll state is kept as *hidden counts* (how many leading non-frozen
//! columns/rows are scrolled out) rather than pixel offsets, so every cell
//! snaps to the viewport's leading edge.

use serde::Serialize;

use super::axis::{Axis, Sizes};
use crate::config::SheetConfig;

/// Pixel rectangle of a visible cell, relative to the viewport's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CellRect {
    /// X position (left edge)
    pub x: u32,
    /// Y position (top edge)
    pub y: u32,
    /// Width of the cell
    pub width: u32,
    /// Height of the cell
    pub height: u32,
}

impl CellRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Half-open containment: the right and bottom edges belong to the neighbour.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Viewport / geometry engine for one grid view.
#[derive(Debug, Clone)]
pub struct Viewport {
    columns: Axis,
    rows: Axis,
    cell_padding: u32,
    default_column_width: u32,
}

impl Viewport {
    /// Build a viewport for a grid of `column_count` x `row_count` cells.
    pub fn new(config: &SheetConfig, column_count: u32, row_count: u32) -> Self {
        let columns = Axis::new(
            Sizes::PerIndex {
                sizes: config.column_widths.clone(),
                fallback: config.default_column_width,
            },
            column_count,
            config.number_frozen_columns,
            config.width,
        );
        let rows = Axis::new(
            Sizes::Uniform(config.row_height),
            row_count,
            config.number_frozen_rows,
            config.height,
        );
        Self {
            columns,
            rows,
            cell_padding: config.cell_padding,
            default_column_width: config.default_column_width,
        }
    }

    // ---- Geometry queries ----

    /// Pixel bounds of a cell, or `None` when the cell is out of range,
    /// scrolled out, or starts beyond the viewport's right/bottom edge.
    ///
    /// Cells cut off by the right/bottom edge still report their full size.
    pub fn calculate_bounds(&self, column: u32, row: u32) -> Option<CellRect> {
        let (x, width) = self.columns.bounds(column)?;
        let (y, height) = self.rows.bounds(row)?;
        Some(CellRect::new(x, y, width, height))
    }

    /// Bounds inset by the horizontal cell padding, where text is laid out.
    pub fn text_bounds(&self, column: u32, row: u32) -> Option<CellRect> {
        let rect = self.calculate_bounds(column, row)?;
        let inset = self.cell_padding.min(rect.width / 2);
        Some(CellRect::new(
            rect.x + inset,
            rect.y,
            rect.width - 2 * inset,
            rect.height,
        ))
    }

    /// Hit-test a viewport pixel to a `(column, row)` pair.
    pub fn cell_at(&self, x: u32, y: u32) -> Option<(u32, u32)> {
        Some((self.columns.index_at(x)?, self.rows.index_at(y)?))
    }

    /// Columns rendered at full width, frozen first.
    pub fn fully_visible_column_indexes(&self) -> Vec<u32> {
        self.columns.fully_visible_indexes()
    }

    /// Rows rendered at full height, frozen first.
    pub fn fully_visible_row_indexes(&self) -> Vec<u32> {
        self.rows.fully_visible_indexes()
    }

    /// Columns with any part on screen, frozen first.
    pub fn visible_column_indexes(&self) -> Vec<u32> {
        self.columns.visible_indexes()
    }

    /// Rows with any part on screen, frozen first.
    pub fn visible_row_indexes(&self) -> Vec<u32> {
        self.rows.visible_indexes()
    }

    pub fn is_column_fully_visible(&self, column: u32) -> bool {
        self.columns.is_fully_visible(column)
    }

    pub fn is_row_fully_visible(&self, row: u32) -> bool {
        self.rows.is_fully_visible(row)
    }

    // ---- Scrolling ----

    /// Scroll right by the fewest columns that fully reveal the first
    /// partially visible column. Returns true if the view changed.
    pub fn scroll_right(&mut self) -> bool {
        let changed = self.columns.scroll_forward();
        if changed {
            tracing::debug!(hidden = self.columns.hidden(), "scroll right");
        }
        changed
    }

    /// Undo one `scroll_right` step. Returns true if the view changed.
    pub fn scroll_left(&mut self) -> bool {
        let changed = self.columns.scroll_back();
        if changed {
            tracing::debug!(hidden = self.columns.hidden(), "scroll left");
        }
        changed
    }

    pub fn scroll_down(&mut self) -> bool {
        let changed = self.rows.scroll_forward();
        if changed {
            tracing::debug!(hidden = self.rows.hidden(), "scroll down");
        }
        changed
    }

    pub fn scroll_up(&mut self) -> bool {
        let changed = self.rows.scroll_back();
        if changed {
            tracing::debug!(hidden = self.rows.hidden(), "scroll up");
        }
        changed
    }

    /// Scroll down by one page of fully visible rows.
    pub fn scroll_down_page(&mut self) -> bool {
        self.rows.page_forward()
    }

    /// Scroll up by one page of fully visible rows.
    pub fn scroll_up_page(&mut self) -> bool {
        self.rows.page_back()
    }

    /// Number of fully visible non-frozen rows (at least one).
    pub fn page_size(&self) -> u32 {
        self.rows.page_size()
    }

    /// Scroll horizontally until `column` is fully visible, or as far into
    /// view as it can get.
    pub fn scroll_column_into_view(&mut self, column: u32) -> bool {
        self.columns.reveal(column)
    }

    /// Scroll vertically until `row` is fully visible, or as far into view as
    /// it can get.
    pub fn scroll_row_into_view(&mut self, row: u32) -> bool {
        self.rows.reveal(row)
    }

    // ---- Scroll state ----

    pub fn hidden_columns(&self) -> u32 {
        self.columns.hidden()
    }

    pub fn hidden_rows(&self) -> u32 {
        self.rows.hidden()
    }

    /// Set the hidden column count, clamped to `[0, maximum_hidden_columns]`.
    pub fn set_hidden_columns(&mut self, hidden: u32) -> bool {
        self.columns.set_hidden(hidden)
    }

    /// Set the hidden row count, clamped to `[0, maximum_hidden_rows]`.
    pub fn set_hidden_rows(&mut self, hidden: u32) -> bool {
        self.rows.set_hidden(hidden)
    }

    /// Smallest hidden column count that leaves the last column fully visible.
    pub fn maximum_hidden_columns(&self) -> u32 {
        self.columns.max_hidden()
    }

    /// Smallest hidden row count that leaves the last row fully visible.
    pub fn maximum_hidden_rows(&self) -> u32 {
        self.rows.max_hidden()
    }

    // ---- Layout state ----

    pub fn column_count(&self) -> u32 {
        self.columns.count()
    }

    pub fn row_count(&self) -> u32 {
        self.rows.count()
    }

    pub fn frozen_columns(&self) -> u32 {
        self.columns.frozen()
    }

    pub fn frozen_rows(&self) -> u32 {
        self.rows.frozen()
    }

    pub fn width(&self) -> u32 {
        self.columns.extent()
    }

    pub fn height(&self) -> u32 {
        self.rows.extent()
    }

    pub fn column_width(&self, column: u32) -> u32 {
        self.columns.size(column)
    }

    pub fn row_height(&self) -> u32 {
        self.rows.size(0)
    }

    pub fn cell_padding(&self) -> u32 {
        self.cell_padding
    }

    /// Resize the viewport. Hidden counts are re-clamped.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.columns.set_extent(width);
        self.rows.set_extent(height);
    }

    /// Replace the column widths. Hidden counts are re-clamped.
    pub fn set_column_widths(&mut self, widths: Vec<u32>) {
        self.columns.set_sizes(Sizes::PerIndex {
            sizes: widths,
            fallback: self.default_column_width,
        });
    }

    /// Change the frozen counts. Hidden counts are re-clamped.
    pub fn set_frozen(&mut self, rows: u32, columns: u32) {
        self.rows.set_frozen(rows);
        self.columns.set_frozen(columns);
    }

    /// Change the data extent. Hidden counts are re-clamped. Returns true if
    /// the extent differed.
    pub fn set_extent(&mut self, column_count: u32, row_count: u32) -> bool {
        let changed = column_count != self.columns.count() || row_count != self.rows.count();
        if changed {
            self.columns.set_count(column_count);
            self.rows.set_count(row_count);
        }
        changed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn viewport(widths: &[u32], frozen_rows: u32, frozen_cols: u32, w: u32, h: u32) -> Viewport {
        let config = SheetConfig::default()
            .with_frozen(frozen_rows, frozen_cols)
            .with_column_widths(widths)
            .with_size(w, h);
        Viewport::new(&config, 4, 4)
    }

    #[test]
    fn test_bounds_no_scrolling() {
        let vp = viewport(&[30, 40, 50, 60], 1, 0, 80, 80);
        assert_eq!(vp.calculate_bounds(0, 0), Some(CellRect::new(0, 0, 30, 35)));
        assert_eq!(vp.calculate_bounds(1, 1), Some(CellRect::new(30, 35, 40, 35)));
        assert_eq!(vp.calculate_bounds(2, 2), Some(CellRect::new(70, 70, 50, 35)));
        assert_eq!(vp.calculate_bounds(3, 0), None);
        assert_eq!(vp.calculate_bounds(0, 3), None);
    }

    #[test]
    fn test_out_of_range_is_not_visible() {
        let vp = viewport(&[30, 40, 50, 60], 1, 0, 80, 80);
        assert_eq!(vp.calculate_bounds(4, 0), None);
        assert_eq!(vp.calculate_bounds(0, 4), None);
        assert_eq!(vp.calculate_bounds(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn test_zero_width_column_is_visible_not_absent() {
        let vp = viewport(&[0, 40, 50, 60], 0, 0, 80, 80);
        assert_eq!(vp.calculate_bounds(0, 0), Some(CellRect::new(0, 0, 0, 35)));
        assert_eq!(vp.calculate_bounds(1, 0), Some(CellRect::new(0, 0, 40, 35)));
    }

    #[test]
    fn test_text_bounds_inset_by_padding() {
        let vp = viewport(&[30, 40, 50, 60], 0, 0, 80, 80);
        assert_eq!(vp.text_bounds(1, 0), Some(CellRect::new(40, 0, 20, 35)));
        // Narrow column: padding limited to half the width
        let narrow = viewport(&[8, 40, 50, 60], 0, 0, 80, 80);
        assert_eq!(narrow.text_bounds(0, 0), Some(CellRect::new(4, 0, 0, 35)));
    }

    #[test]
    fn test_cell_at_matches_bounds() {
        let vp = viewport(&[30, 40, 50, 60], 1, 0, 80, 80);
        assert_eq!(vp.cell_at(0, 0), Some((0, 0)));
        assert_eq!(vp.cell_at(30, 34), Some((1, 0)));
        assert_eq!(vp.cell_at(75, 36), Some((2, 1)));
        assert_eq!(vp.cell_at(80, 0), None);
        assert_eq!(vp.cell_at(0, 80), None);
    }

    #[test]
    fn test_resize_reclamps_hidden() {
        let mut vp = viewport(&[20, 20, 20, 20], 0, 0, 60, 80);
        vp.set_hidden_columns(2);
        assert_eq!(vp.hidden_columns(), 2);
        vp.resize(200, 80);
        assert_eq!(vp.maximum_hidden_columns(), 0);
        assert_eq!(vp.hidden_columns(), 0);
    }

    #[test]
    fn test_set_extent_reports_change() {
        let mut vp = viewport(&[20, 20, 20, 20], 0, 0, 60, 80);
        assert!(!vp.set_extent(4, 4));
        assert!(vp.set_extent(2, 4));
        assert_eq!(vp.column_count(), 2);
        assert_eq!(vp.calculate_bounds(2, 0), None);
    }

    #[test]
    fn test_cell_rect_contains_half_open() {
        let rect = CellRect::new(10, 10, 20, 35);
        assert!(rect.contains(10, 10));
        assert!(rect.contains(29, 44));
        assert!(!rect.contains(30, 10));
        assert!(!rect.contains(10, 45));
    }
}
