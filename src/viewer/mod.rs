//! `SheetView` - the controller that drives one grid view.
//!
//! A view owns its data provider, viewport, selection, cell editor and
//! clipboard sink, and is the only thing that mutates them. UI layers feed it
//! mouse, wheel and key events; it answers geometry queries and produces a
//! paint list of visible cells.
//!
//! Every operation first re-reads the provider's extent so that a provider
//! that grew or shrank underneath the view never leaves the viewport or the
//! selection pointing past the data.

pub mod clipboard;
pub mod events;
mod scroll;

use serde::Serialize;

use crate::config::SheetConfig;
use crate::editor::{mutation, CellEditor};
use crate::error::{GridError, Result};
use crate::layout::{autosize_columns, CellRect, Viewport};
use crate::provider::DataProvider;
use crate::selection::clipboard::{parse_clipboard, serialize_range};
use crate::selection::{CellRange, Selection, SelectionMode};

use clipboard::ClipboardSink;
use events::{key_action, Action, Direction, InteractionState};

/// One entry of the paint list returned by [`SheetView::visible_cells`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleCell {
    pub column: u32,
    pub row: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Cell text, or the in-progress edit text for the edited cell.
    pub text: Option<String>,
    pub selected: bool,
    pub editing: bool,
}

/// Controller for a single grid view.
pub struct SheetView<P, C> {
    provider: P,
    clipboard: C,
    config: SheetConfig,
    viewport: Viewport,
    selection: Selection,
    editor: CellEditor,
    state: InteractionState,
    mouse_down: bool,
    needs_render: bool,
}

impl<P: DataProvider, C: ClipboardSink> SheetView<P, C> {
    /// Build a view over `provider`.
    ///
    /// Columns without configured widths are autosized from their text.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidConfig`] for a config that cannot lay out a grid.
    pub fn new(provider: P, clipboard: C, config: SheetConfig) -> Result<Self> {
        config.validate()?;
        let mut config = config;
        if config.column_widths.is_empty() {
            config.column_widths = autosize_columns(&provider, &config);
        }
        let viewport = Viewport::new(&config, provider.column_count(), provider.row_count());
        let selection = Selection::new(config.selection_mode, &viewport);
        tracing::debug!(
            columns = provider.column_count(),
            rows = provider.row_count(),
            frozen_rows = config.number_frozen_rows,
            frozen_columns = config.number_frozen_columns,
            "sheet view created"
        );
        Ok(Self {
            provider,
            clipboard,
            config,
            viewport,
            selection,
            editor: CellEditor::new(),
            state: InteractionState::Idle,
            mouse_down: false,
            needs_render: true,
        })
    }

    // ---- Accessors ----

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable provider access. Extent changes are picked up by the next operation.
    pub fn provider_mut(&mut self) -> &mut P {
        self.needs_render = true;
        &mut self.provider
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn editor(&self) -> &CellEditor {
        &self.editor
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.state
    }

    /// Return and clear the repaint flag.
    pub fn take_needs_render(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }

    // ---- Extent tracking ----

    /// Re-read the provider's extent and re-clamp viewport, selection and any
    /// open edit. Returns true if anything changed.
    pub fn sync_extent(&mut self) -> bool {
        let columns = self.provider.column_count();
        let rows = self.provider.row_count();
        let resized = self.viewport.set_extent(columns, rows);
        let clamped = self.selection.clamp_to(columns, rows);
        let dropped = match self.editor.editing_cell() {
            Some((c, r)) if c >= columns || r >= rows => self.editor.cancel_edit(),
            _ => false,
        };
        let changed = resized || clamped || dropped;
        if changed {
            tracing::debug!(columns, rows, "data extent changed");
            self.needs_render = true;
        }
        changed
    }

    /// Selection rectangle clamped to the provider's current extent.
    fn current_range(&self) -> Option<CellRange> {
        let mut selection = self.selection.clone();
        selection.clamp_to(self.provider.column_count(), self.provider.row_count());
        selection.range()
    }

    // ---- Geometry queries ----

    /// Pixel bounds of a cell, or `None` when it is not visible.
    pub fn calculate_bounds(&self, column: u32, row: u32) -> Option<CellRect> {
        if column >= self.provider.column_count() || row >= self.provider.row_count() {
            return None;
        }
        self.viewport.calculate_bounds(column, row)
    }

    /// Map a viewport pixel to the cell under it.
    pub fn cell_at(&self, x: u32, y: u32) -> Option<(u32, u32)> {
        self.viewport
            .cell_at(x, y)
            .filter(|&(c, r)| c < self.provider.column_count() && r < self.provider.row_count())
    }

    /// Where an editor overlay for the open edit session goes.
    pub fn editor_bounds(&self) -> Option<CellRect> {
        let (column, row) = self.editor.editing_cell()?;
        self.viewport.text_bounds(column, row)
    }

    /// True iff the cell lies in the selected rectangle.
    pub fn is_selected(&self, column: u32, row: u32) -> bool {
        self.current_range().is_some_and(|r| r.contains(column, row))
    }

    /// Selected rectangle, `None` for empty data.
    pub fn selected_range(&self) -> Option<CellRange> {
        self.current_range()
    }

    pub fn number_of_cells_selected(&self) -> u64 {
        self.current_range().map_or(0, |r| r.cell_count())
    }

    /// Paint list of every visible cell, frozen cells first.
    pub fn visible_cells(&self) -> Vec<VisibleCell> {
        let range = self.current_range();
        let session = self.editor.session();
        let columns = self.viewport.visible_column_indexes();
        let rows = self.viewport.visible_row_indexes();

        let mut cells = Vec::with_capacity(columns.len() * rows.len());
        for &row in &rows {
            for &column in &columns {
                let Some(rect) = self.calculate_bounds(column, row) else {
                    continue;
                };
                let editing = session.is_some_and(|s| s.column == column && s.row == row);
                let text = match session {
                    Some(s) if editing => Some(s.text.clone()),
                    _ => self.provider.cell_contents(column, row),
                };
                cells.push(VisibleCell {
                    column,
                    row,
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                    text,
                    selected: range.is_some_and(|r| r.contains(column, row)),
                    editing,
                });
            }
        }
        cells
    }

    // ---- Layout changes ----

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.viewport.resize(width, height);
        self.needs_render = true;
    }

    pub fn set_column_widths(&mut self, widths: Vec<u32>) {
        self.config.column_widths.clone_from(&widths);
        self.viewport.set_column_widths(widths);
        self.needs_render = true;
    }

    pub fn set_frozen(&mut self, rows: u32, columns: u32) {
        self.config.number_frozen_rows = rows;
        self.config.number_frozen_columns = columns;
        self.viewport.set_frozen(rows, columns);
        self.needs_render = true;
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.config.selection_mode = mode;
        self.selection.set_mode(mode);
        self.needs_render = true;
    }

    // ---- Edit session ----

    /// Commit the open edit, if any.
    fn commit_pending_edit(&mut self) -> Result<()> {
        if self.editor.end_edit(&mut self.provider)?.is_some() {
            self.needs_render = true;
        }
        Ok(())
    }

    /// Open an edit on the cursor cell with its current text.
    ///
    /// # Errors
    /// Read-only providers and cells refuse the edit.
    pub fn begin_edit(&mut self) -> Result<()> {
        self.begin_edit_with(None)
    }

    fn begin_edit_with(&mut self, initial: Option<&str>) -> Result<()> {
        self.sync_extent();
        let Some((column, row)) = self.selection.cursor() else {
            return Ok(());
        };
        self.editor
            .begin_edit(&mut self.provider, column, row, initial)?;
        self.needs_render = true;
        Ok(())
    }

    /// Replace the text of the open edit.
    pub fn set_edit_text(&mut self, text: &str) {
        if self.editor.is_editing() {
            self.editor.set_text(text);
            self.needs_render = true;
        }
    }

    /// Commit the open edit.
    ///
    /// # Errors
    /// A refused write keeps the session open and returns the refusal.
    pub fn commit_edit(&mut self) -> Result<()> {
        self.sync_extent();
        self.commit_pending_edit()
    }

    /// Discard the open edit.
    pub fn cancel_edit(&mut self) {
        if self.editor.cancel_edit() {
            self.needs_render = true;
        }
    }

    // ---- Navigation ----

    /// Run a selection move after committing any open edit.
    fn navigate(
        &mut self,
        extend: bool,
        step: impl FnOnce(&mut Selection, &mut Viewport) -> bool,
    ) -> Result<()> {
        self.sync_extent();
        self.commit_pending_edit()?;
        self.state = if extend {
            InteractionState::Extending
        } else {
            InteractionState::Idle
        };
        if step(&mut self.selection, &mut self.viewport) {
            self.needs_render = true;
        }
        Ok(())
    }

    /// # Errors
    /// Fails only when an open edit cannot be committed; the cursor stays put.
    pub fn move_left(&mut self, extend: bool) -> Result<()> {
        self.navigate(extend, |s, vp| s.move_left(vp, extend))
    }

    /// # Errors
    /// Fails only when an open edit cannot be committed.
    pub fn move_right(&mut self, extend: bool) -> Result<()> {
        self.navigate(extend, |s, vp| s.move_right(vp, extend))
    }

    /// # Errors
    /// Fails only when an open edit cannot be committed.
    pub fn move_up(&mut self, extend: bool) -> Result<()> {
        self.navigate(extend, |s, vp| s.move_up(vp, extend))
    }

    /// # Errors
    /// Fails only when an open edit cannot be committed.
    pub fn move_down(&mut self, extend: bool) -> Result<()> {
        self.navigate(extend, |s, vp| s.move_down(vp, extend))
    }

    fn move_in(&mut self, direction: Direction, extend: bool) -> Result<()> {
        match direction {
            Direction::Left => self.move_left(extend),
            Direction::Right => self.move_right(extend),
            Direction::Up => self.move_up(extend),
            Direction::Down => self.move_down(extend),
        }
    }

    /// # Errors
    /// Fails only when an open edit cannot be committed.
    pub fn page_up(&mut self) -> Result<()> {
        self.navigate(false, Selection::page_up)
    }

    /// # Errors
    /// Fails only when an open edit cannot be committed.
    pub fn page_down(&mut self) -> Result<()> {
        self.navigate(false, Selection::page_down)
    }

    /// # Errors
    /// Fails only when an open edit cannot be committed.
    pub fn move_to_far_left(&mut self) -> Result<()> {
        self.navigate(false, Selection::move_to_far_left)
    }

    /// # Errors
    /// Fails only when an open edit cannot be committed.
    pub fn move_to_far_right(&mut self) -> Result<()> {
        self.navigate(false, Selection::move_to_far_right)
    }

    /// # Errors
    /// Fails only when an open edit cannot be committed.
    pub fn move_to_top(&mut self) -> Result<()> {
        self.navigate(false, Selection::move_to_top)
    }

    /// # Errors
    /// Fails only when an open edit cannot be committed.
    pub fn move_to_bottom(&mut self) -> Result<()> {
        self.navigate(false, Selection::move_to_bottom)
    }

    /// Expand the selection to the whole data extent (range mode only).
    ///
    /// # Errors
    /// Fails only when an open edit cannot be committed.
    pub fn select_all(&mut self) -> Result<()> {
        self.navigate(false, |s, _| s.select_all())
    }

    // ---- Clipboard and clearing ----

    /// Copy the selection to the clipboard sink.
    ///
    /// # Errors
    /// Fails only when an open edit cannot be committed; nothing is copied then.
    pub fn copy(&mut self) -> Result<()> {
        self.sync_extent();
        self.commit_pending_edit()?;
        if let Some(range) = self.selection.range() {
            let text = serialize_range(&self.provider, &range);
            tracing::debug!(cells = range.cell_count(), bytes = text.len(), "copy");
            self.clipboard.set_text(&text);
        }
        Ok(())
    }

    /// Copy, then clear the selection.
    ///
    /// # Errors
    /// See [`Self::copy`] and [`Self::delete`].
    pub fn cut(&mut self) -> Result<usize> {
        self.copy()?;
        self.delete()
    }

    /// Clear every selected cell. Rows and columns are kept.
    ///
    /// Returns the number of cells cleared.
    ///
    /// # Errors
    /// [`GridError::ReadOnly`] if the provider refuses all writes;
    /// [`GridError::WritesRefused`] if some cells refused (the others are
    /// still cleared).
    pub fn delete(&mut self) -> Result<usize> {
        self.sync_extent();
        self.commit_pending_edit()?;
        let Some(range) = self.selection.range() else {
            return Ok(0);
        };
        let outcome = mutation::clear_range(&mut self.provider, &range);
        if !matches!(outcome, Err(GridError::ReadOnly)) {
            self.needs_render = true;
        }
        outcome
    }

    /// Write tab/newline separated text starting at the selection's top-left
    /// cell, clipped to the data extent.
    ///
    /// Returns the number of cells written.
    ///
    /// # Errors
    /// Refusals are reported as for [`Self::delete`].
    pub fn paste(&mut self, text: &str) -> Result<usize> {
        self.sync_extent();
        self.commit_pending_edit()?;
        let Some(range) = self.selection.range() else {
            return Ok(0);
        };
        let rows = parse_clipboard(text);
        if rows.is_empty() {
            return Ok(0);
        }
        let outcome = mutation::write_block(&mut self.provider, range.left, range.top, &rows);
        if !matches!(outcome, Err(GridError::ReadOnly)) {
            self.needs_render = true;
        }
        outcome
    }

    // ---- Mouse ----

    /// Press at a viewport pixel. Shift extends the selection in range mode.
    ///
    /// # Errors
    /// Clicking away from an open edit commits it; a refused commit is
    /// returned and the selection stays put.
    pub fn mouse_down(&mut self, x: u32, y: u32, shift: bool) -> Result<()> {
        self.sync_extent();
        let Some((column, row)) = self.cell_at(x, y) else {
            return Ok(());
        };
        if self.editor.editing_cell() != Some((column, row)) {
            self.commit_pending_edit()?;
        }
        if self.selection.click(column, row, shift) {
            self.needs_render = true;
        }
        self.mouse_down = true;
        self.state = if shift {
            InteractionState::Extending
        } else {
            InteractionState::Idle
        };
        tracing::trace!(column, row, shift, "mouse down");
        Ok(())
    }

    /// Drag to a viewport pixel. Only acts while the button is held.
    pub fn mouse_move(&mut self, x: u32, y: u32) {
        if !self.mouse_down {
            return;
        }
        let Some((column, row)) = self.cell_at(x, y) else {
            return;
        };
        if self.selection.mode() == SelectionMode::Range {
            self.state = InteractionState::Extending;
        }
        if self.selection.click(column, row, true) {
            self.needs_render = true;
        }
    }

    pub fn mouse_up(&mut self) {
        self.mouse_down = false;
        self.state = InteractionState::Idle;
    }

    /// Select the cell under the pointer and open an edit on it.
    ///
    /// # Errors
    /// See [`Self::mouse_down`] and [`Self::begin_edit`].
    pub fn double_click(&mut self, x: u32, y: u32) -> Result<()> {
        self.mouse_down(x, y, false)?;
        self.mouse_up();
        if self.cell_at(x, y).is_some() {
            self.begin_edit()?;
        }
        Ok(())
    }

    // ---- Keyboard ----

    /// Handle a key press. Returns true if the key was consumed.
    ///
    /// # Errors
    /// Refused writes and refused edit commits are returned; the view stays usable.
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool) -> Result<bool> {
        let Some(action) = key_action(key, ctrl, shift, self.editor.is_editing()) else {
            return Ok(false);
        };
        tracing::trace!(key, ctrl, shift, ?action, "key down");
        match action {
            Action::Move { direction, extend } => self.move_in(direction, extend)?,
            Action::PageUp => self.page_up()?,
            Action::PageDown => self.page_down()?,
            Action::FarLeft => self.move_to_far_left()?,
            Action::FarRight => self.move_to_far_right()?,
            Action::Top => self.move_to_top()?,
            Action::Bottom => self.move_to_bottom()?,
            Action::Copy => self.copy()?,
            Action::Cut => {
                self.cut()?;
            }
            Action::SelectAll => self.select_all()?,
            Action::Delete => {
                self.delete()?;
            }
            Action::BeginEdit => self.begin_edit()?,
            Action::Type(ch) => {
                if self.editor.is_editing() {
                    self.editor.push_char(ch);
                    self.needs_render = true;
                } else {
                    let text = ch.to_string();
                    self.begin_edit_with(Some(&text))?;
                }
            }
            Action::EditBackspace => {
                self.editor.backspace();
                self.needs_render = true;
            }
            Action::CommitEdit { then } => {
                self.commit_edit()?;
                if let Some(direction) = then {
                    self.move_in(direction, false)?;
                }
            }
            Action::CancelEdit => self.cancel_edit(),
        }
        Ok(true)
    }

    /// Handle a key release. Releasing Shift ends an extend gesture.
    pub fn key_up(&mut self, key: &str) {
        if key == "Shift" && !self.mouse_down {
            self.state = InteractionState::Idle;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::clipboard::MemoryClipboard;
    use super::*;
    use crate::provider::TableProvider;

    fn view() -> SheetView<TableProvider, MemoryClipboard> {
        let table = TableProvider::new([["a", "b", "c"], ["d", "e", "f"]]).with_headings(["A", "B", "C"]);
        let config = SheetConfig::default()
            .with_frozen(1, 0)
            .with_column_widths(&[30, 30, 30])
            .with_size(200, 200);
        SheetView::new(table, MemoryClipboard::new(), config).unwrap()
    }

    #[test]
    fn test_new_view_needs_render() {
        let mut v = view();
        assert!(v.take_needs_render());
        assert!(!v.take_needs_render());
    }

    #[test]
    fn test_autosize_when_no_widths() {
        let table = TableProvider::new([["a much longer piece of text"]]);
        let v = SheetView::new(table, MemoryClipboard::new(), SheetConfig::default()).unwrap();
        assert_eq!(v.config().column_widths, vec![236]);
    }

    #[test]
    fn test_shrinking_provider_reclamps_selection() {
        let mut v = view();
        v.mouse_down(70, 70, false).unwrap();
        assert_eq!(v.selection().cursor(), Some((2, 2)));
        *v.provider_mut() = TableProvider::new([["x"]]);
        assert!(!v.is_selected(2, 2));
        assert_eq!(v.number_of_cells_selected(), 1);
        assert!(v.sync_extent());
        assert_eq!(v.selection().cursor(), Some((0, 0)));
    }

    #[test]
    fn test_visible_cells_marks_selection() {
        let mut v = view();
        let cells = v.visible_cells();
        assert_eq!(cells.len(), 9);
        let selected: Vec<_> = cells.iter().filter(|c| c.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!((selected[0].column, selected[0].row), (0, 1));
        v.key_down("F2", false, false).unwrap();
        v.key_down("!", false, false).unwrap();
        let cells = v.visible_cells();
        let editing = cells.iter().find(|c| c.editing).unwrap();
        assert_eq!(editing.text.as_deref(), Some("a!"));
    }

    #[test]
    fn test_shift_key_up_returns_to_idle() {
        let mut v = view();
        v.key_down("ArrowRight", false, true).unwrap();
        assert_eq!(v.interaction_state(), InteractionState::Extending);
        v.key_up("Shift");
        assert_eq!(v.interaction_state(), InteractionState::Idle);
    }
}
