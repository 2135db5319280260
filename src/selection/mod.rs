//! Cursor and range selection.
//!
//! A selection is an *anchor* (the active cell) and a *free corner*. In
//! [`SelectionMode::Point`] the two always coincide; in
//! [`SelectionMode::Range`] extending moves only the free corner. The
//! published rectangle is always normalized, so the left/top corner never
//! passes the right/bottom one regardless of which way the user dragged.
//!
//! Navigation takes the [`Viewport`] by reference and scrolls it when the
//! cursor would leave the fully visible area.

pub mod clipboard;

use serde::{Deserialize, Serialize};

use crate::layout::Viewport;

/// Which selection capabilities a view has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// A single cell cursor; extend requests just move the cursor.
    Point,
    /// A cursor plus a free corner spanning a rectangle.
    #[default]
    Range,
}

/// Normalized, inclusive cell rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRange {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CellRange {
    /// Rectangle spanning two corners given in any order.
    pub fn from_corners(a: (u32, u32), b: (u32, u32)) -> Self {
        Self {
            left: a.0.min(b.0),
            top: a.1.min(b.1),
            right: a.0.max(b.0),
            bottom: a.1.max(b.1),
        }
    }

    pub fn contains(&self, column: u32, row: u32) -> bool {
        column >= self.left && column <= self.right && row >= self.top && row <= self.bottom
    }

    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }

    pub fn cell_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    pub fn is_single_cell(&self) -> bool {
        self.left == self.right && self.top == self.bottom
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.top..=self.bottom).flat_map(move |row| (self.left..=self.right).map(move |col| (col, row)))
    }
}

/// Selection state for one view.
#[derive(Debug, Clone)]
pub struct Selection {
    mode: SelectionMode,
    /// Active cell `(column, row)`.
    anchor: (u32, u32),
    /// Free corner `(column, row)`.
    free: (u32, u32),
    /// Data extent `(columns, rows)` the corners were last clamped to.
    extent: (u32, u32),
}

impl Selection {
    /// Start at the first navigable cell: column 0, first row after the frozen rows.
    pub fn new(mode: SelectionMode, viewport: &Viewport) -> Self {
        let mut selection = Self {
            mode,
            anchor: (0, 0),
            free: (0, 0),
            extent: (viewport.column_count(), viewport.row_count()),
        };
        let start = (0, selection.first_row(viewport));
        selection.anchor = start;
        selection.free = start;
        selection.clamp_to(viewport.column_count(), viewport.row_count());
        selection
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switch modes. Dropping to point mode collapses onto the anchor.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        if mode == SelectionMode::Point {
            self.collapse();
        }
    }

    /// Active cell `(column, row)`, or `None` when the data is empty.
    pub fn cursor(&self) -> Option<(u32, u32)> {
        (!self.is_empty()).then_some(self.anchor)
    }

    /// Free corner `(column, row)`, or `None` when the data is empty.
    pub fn free_corner(&self) -> Option<(u32, u32)> {
        (!self.is_empty()).then_some(self.free)
    }

    /// True when there is no cell to select.
    pub fn is_empty(&self) -> bool {
        self.extent.0 == 0 || self.extent.1 == 0
    }

    /// The normalized selected rectangle, or `None` when the data is empty.
    pub fn range(&self) -> Option<CellRange> {
        (!self.is_empty()).then(|| CellRange::from_corners(self.anchor, self.free))
    }

    pub fn selected_column_index(&self) -> u32 {
        self.anchor.0.min(self.free.0)
    }

    pub fn selected_row_index(&self) -> u32 {
        self.anchor.1.min(self.free.1)
    }

    pub fn selected_column_index_right(&self) -> u32 {
        self.anchor.0.max(self.free.0)
    }

    pub fn selected_row_index_bottom(&self) -> u32 {
        self.anchor.1.max(self.free.1)
    }

    /// True iff the cell lies in the closed selected rectangle.
    pub fn is_selected(&self, column: u32, row: u32) -> bool {
        self.range().is_some_and(|r| r.contains(column, row))
    }

    /// `(right - left + 1) * (bottom - top + 1)`, or 0 for empty data.
    pub fn number_of_cells_selected(&self) -> u64 {
        self.range().map_or(0, |r| r.cell_count())
    }

    /// Pull both corners back inside a (possibly smaller) data extent.
    /// Returns true if a corner moved.
    pub fn clamp_to(&mut self, column_count: u32, row_count: u32) -> bool {
        self.extent = (column_count, row_count);
        let max = (column_count.saturating_sub(1), row_count.saturating_sub(1));
        let anchor = (self.anchor.0.min(max.0), self.anchor.1.min(max.1));
        let free = (self.free.0.min(max.0), self.free.1.min(max.1));
        let changed = anchor != self.anchor || free != self.free;
        self.anchor = anchor;
        self.free = free;
        changed
    }

    fn collapse(&mut self) {
        self.free = self.anchor;
    }

    fn extends(&self, extend: bool) -> bool {
        extend && self.mode == SelectionMode::Range
    }

    /// First row keyboard navigation lands on: the row after the frozen rows.
    fn first_row(&self, viewport: &Viewport) -> u32 {
        viewport
            .frozen_rows()
            .min(viewport.row_count().saturating_sub(1))
    }

    fn last_column(&self) -> u32 {
        self.extent.0.saturating_sub(1)
    }

    fn last_row(&self) -> u32 {
        self.extent.1.saturating_sub(1)
    }

    /// Apply a new corner position and publish it, scrolling the moved corner into view.
    fn commit_move(
        &mut self,
        viewport: &mut Viewport,
        extend: bool,
        target: (u32, u32),
    ) -> bool {
        let before = (self.anchor, self.free);
        if self.extends(extend) {
            self.free = target;
        } else {
            self.anchor = target;
            self.collapse();
        }
        let scrolled_col = viewport.scroll_column_into_view(target.0);
        let scrolled_row = viewport.scroll_row_into_view(target.1);
        let changed = before != (self.anchor, self.free);
        if changed {
            tracing::debug!(
                anchor = ?self.anchor,
                free = ?self.free,
                "selection moved"
            );
        }
        changed || scrolled_col || scrolled_row
    }

    /// The corner that navigation with this `extend` flag moves.
    fn moving_corner(&self, extend: bool) -> (u32, u32) {
        if self.extends(extend) {
            self.free
        } else {
            self.anchor
        }
    }

    // ---- Navigation ----

    pub fn move_left(&mut self, viewport: &mut Viewport, extend: bool) -> bool {
        if self.is_empty() {
            return false;
        }
        let (col, row) = self.moving_corner(extend);
        self.commit_move(viewport, extend, (col.saturating_sub(1), row))
    }

    pub fn move_right(&mut self, viewport: &mut Viewport, extend: bool) -> bool {
        if self.is_empty() {
            return false;
        }
        let (col, row) = self.moving_corner(extend);
        let target = (col.saturating_add(1).min(self.last_column()), row);
        self.commit_move(viewport, extend, target)
    }

    pub fn move_up(&mut self, viewport: &mut Viewport, extend: bool) -> bool {
        if self.is_empty() {
            return false;
        }
        let (col, row) = self.moving_corner(extend);
        let target = (col, row.saturating_sub(1).max(self.first_row(viewport)).min(row));
        self.commit_move(viewport, extend, target)
    }

    pub fn move_down(&mut self, viewport: &mut Viewport, extend: bool) -> bool {
        if self.is_empty() {
            return false;
        }
        let (col, row) = self.moving_corner(extend);
        let target = (col, row.saturating_add(1).min(self.last_row()));
        self.commit_move(viewport, extend, target)
    }

    /// Move both corners up one page and scroll up a page.
    pub fn page_up(&mut self, viewport: &mut Viewport) -> bool {
        if self.is_empty() {
            return false;
        }
        let page = viewport.page_size();
        let first = self.first_row(viewport);
        let before = (self.anchor, self.free);
        self.anchor.1 = self.anchor.1.saturating_sub(page).max(first).min(self.anchor.1);
        self.free.1 = self.free.1.saturating_sub(page).max(first).min(self.free.1);
        let scrolled = viewport.scroll_up_page();
        let revealed = viewport.scroll_row_into_view(self.anchor.1);
        before != (self.anchor, self.free) || scrolled || revealed
    }

    /// Move both corners down one page and scroll down a page.
    pub fn page_down(&mut self, viewport: &mut Viewport) -> bool {
        if self.is_empty() {
            return false;
        }
        let page = viewport.page_size();
        let last = self.last_row();
        let before = (self.anchor, self.free);
        self.anchor.1 = self.anchor.1.saturating_add(page).min(last);
        self.free.1 = self.free.1.saturating_add(page).min(last);
        let scrolled = viewport.scroll_down_page();
        let revealed = viewport.scroll_row_into_view(self.anchor.1);
        before != (self.anchor, self.free) || scrolled || revealed
    }

    pub fn move_to_far_left(&mut self, viewport: &mut Viewport) -> bool {
        if self.is_empty() {
            return false;
        }
        let target = (0, self.anchor.1);
        self.jump(target, |vp| vp.set_hidden_columns(0), viewport)
    }

    pub fn move_to_far_right(&mut self, viewport: &mut Viewport) -> bool {
        if self.is_empty() {
            return false;
        }
        let target = (self.last_column(), self.anchor.1);
        self.jump(
            target,
            |vp| vp.set_hidden_columns(vp.maximum_hidden_columns()),
            viewport,
        )
    }

    pub fn move_to_top(&mut self, viewport: &mut Viewport) -> bool {
        if self.is_empty() {
            return false;
        }
        let target = (self.anchor.0, self.first_row(viewport));
        self.jump(target, |vp| vp.set_hidden_rows(0), viewport)
    }

    pub fn move_to_bottom(&mut self, viewport: &mut Viewport) -> bool {
        if self.is_empty() {
            return false;
        }
        let target = (self.anchor.0, self.last_row());
        self.jump(
            target,
            |vp| vp.set_hidden_rows(vp.maximum_hidden_rows()),
            viewport,
        )
    }

    fn jump(
        &mut self,
        target: (u32, u32),
        scroll: impl FnOnce(&mut Viewport) -> bool,
        viewport: &mut Viewport,
    ) -> bool {
        let before = (self.anchor, self.free);
        self.anchor = target;
        self.collapse();
        let scrolled = scroll(viewport);
        before != (self.anchor, self.free) || scrolled
    }

    /// Select a cell. With `extend` in range mode only the free corner moves;
    /// otherwise both corners reset to the cell. Does not scroll.
    pub fn click(&mut self, column: u32, row: u32, extend: bool) -> bool {
        if self.is_empty() {
            return false;
        }
        let target = (column.min(self.last_column()), row.min(self.last_row()));
        let before = (self.anchor, self.free);
        if self.extends(extend) {
            self.free = target;
        } else {
            self.anchor = target;
            self.collapse();
        }
        before != (self.anchor, self.free)
    }

    /// Expand to the full data extent. No-op in point mode or on empty data.
    pub fn select_all(&mut self) -> bool {
        if self.is_empty() || self.mode == SelectionMode::Point {
            return false;
        }
        let before = (self.anchor, self.free);
        self.anchor = (0, 0);
        self.free = (self.last_column(), self.last_row());
        before != (self.anchor, self.free)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;

    fn viewport(cols: u32, rows: u32, frozen_rows: u32) -> Viewport {
        let config = SheetConfig::default()
            .with_frozen(frozen_rows, 0)
            .with_column_widths(&[20; 8])
            .with_size(60, 80);
        Viewport::new(&config, cols, rows)
    }

    #[test]
    fn test_initial_cursor_after_frozen_rows() {
        let vp = viewport(4, 4, 1);
        let sel = Selection::new(SelectionMode::Range, &vp);
        assert_eq!(sel.cursor(), Some((0, 1)));
        assert_eq!(sel.number_of_cells_selected(), 1);
    }

    #[test]
    fn test_reversed_click_normalizes() {
        let vp = viewport(4, 4, 0);
        let mut sel = Selection::new(SelectionMode::Range, &vp);
        sel.click(3, 3, false);
        sel.click(1, 1, true);
        assert_eq!(sel.selected_column_index(), 1);
        assert_eq!(sel.selected_row_index(), 1);
        assert_eq!(sel.selected_column_index_right(), 3);
        assert_eq!(sel.selected_row_index_bottom(), 3);
        assert_eq!(sel.number_of_cells_selected(), 9);
    }

    #[test]
    fn test_point_mode_ignores_extend() {
        let mut vp = viewport(4, 4, 0);
        let mut sel = Selection::new(SelectionMode::Point, &vp);
        sel.move_right(&mut vp, true);
        assert_eq!(sel.range().unwrap(), CellRange::from_corners((1, 0), (1, 0)));
        assert!(!sel.select_all());
    }

    #[test]
    fn test_extend_crosses_anchor() {
        let mut vp = viewport(4, 4, 0);
        let mut sel = Selection::new(SelectionMode::Range, &vp);
        sel.click(2, 2, false);
        sel.move_left(&mut vp, true);
        sel.move_left(&mut vp, true);
        let range = sel.range().unwrap();
        assert_eq!((range.left, range.right), (0, 2));
        assert_eq!(sel.cursor(), Some((2, 2)));
    }

    #[test]
    fn test_plain_move_collapses_from_anchor() {
        let mut vp = viewport(4, 4, 0);
        let mut sel = Selection::new(SelectionMode::Range, &vp);
        sel.click(1, 1, false);
        sel.click(3, 3, true);
        sel.move_down(&mut vp, false);
        assert_eq!(sel.range().unwrap(), CellRange::from_corners((1, 2), (1, 2)));
    }

    #[test]
    fn test_move_up_stops_at_first_navigable_row() {
        let mut vp = viewport(4, 4, 1);
        let mut sel = Selection::new(SelectionMode::Range, &vp);
        assert!(!sel.move_up(&mut vp, false));
        assert_eq!(sel.cursor(), Some((0, 1)));
    }

    #[test]
    fn test_clamp_after_extent_shrinks() {
        let vp = viewport(4, 4, 0);
        let mut sel = Selection::new(SelectionMode::Range, &vp);
        sel.click(3, 3, false);
        assert!(sel.clamp_to(2, 2));
        assert_eq!(sel.cursor(), Some((1, 1)));
        assert!(!sel.is_selected(3, 3));
    }

    #[test]
    fn test_empty_data_is_noop() {
        let mut vp = viewport(0, 0, 0);
        let mut sel = Selection::new(SelectionMode::Range, &vp);
        assert!(sel.is_empty());
        assert_eq!(sel.range(), None);
        assert_eq!(sel.number_of_cells_selected(), 0);
        assert!(!sel.move_right(&mut vp, false));
        assert!(!sel.select_all());
        assert!(!sel.is_selected(0, 0));
    }

    #[test]
    fn test_cells_row_major() {
        let range = CellRange::from_corners((1, 0), (0, 1));
        let cells: Vec<_> = range.cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
