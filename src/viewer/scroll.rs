//! Mouse-wheel scrolling for `SheetView`.
//!
//! Wheel scrolling moves the viewport only; the selection stays where it is
//! even if it scrolls out of view.

use super::clipboard::ClipboardSink;
use super::SheetView;
use crate::layout::Viewport;
use crate::provider::DataProvider;

/// Repeat a single-step scroll up to `steps` times, stopping once it stops
/// moving. Returns true if anything scrolled.
fn repeat_scroll(viewport: &mut Viewport, steps: u32, step: fn(&mut Viewport) -> bool) -> bool {
    let mut moved = false;
    for _ in 0..steps {
        if !step(viewport) {
            break;
        }
        moved = true;
    }
    moved
}

impl<P: DataProvider, C: ClipboardSink> SheetView<P, C> {
    /// Scroll vertically by wheel notches; positive scrolls down.
    /// Each notch moves `wheelRows` rows.
    pub fn scroll_wheel(&mut self, notches: i32) -> bool {
        self.sync_extent();
        let steps = notches.unsigned_abs().saturating_mul(self.config.wheel_rows);
        let step: fn(&mut Viewport) -> bool = if notches > 0 {
            Viewport::scroll_down
        } else {
            Viewport::scroll_up
        };
        let moved = repeat_scroll(&mut self.viewport, steps, step);
        if moved {
            tracing::trace!(notches, hidden_rows = self.viewport.hidden_rows(), "wheel");
            self.needs_render = true;
        }
        moved
    }

    /// Scroll horizontally by wheel notches, one column per notch; positive
    /// scrolls right.
    pub fn scroll_wheel_horizontal(&mut self, notches: i32) -> bool {
        self.sync_extent();
        let step: fn(&mut Viewport) -> bool = if notches > 0 {
            Viewport::scroll_right
        } else {
            Viewport::scroll_left
        };
        let moved = repeat_scroll(&mut self.viewport, notches.unsigned_abs(), step);
        if moved {
            tracing::trace!(
                notches,
                hidden_columns = self.viewport.hidden_columns(),
                "wheel"
            );
            self.needs_render = true;
        }
        moved
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::config::SheetConfig;
    use crate::provider::TableProvider;
    use crate::viewer::clipboard::MemoryClipboard;
    use crate::viewer::SheetView;

    fn tall_view() -> SheetView<TableProvider, MemoryClipboard> {
        let rows: Vec<Vec<String>> = (0..20).map(|r| vec![r.to_string()]).collect();
        let config = SheetConfig::default()
            .with_column_widths(&[50])
            .with_size(100, 100);
        SheetView::new(TableProvider::new(rows), MemoryClipboard::new(), config).unwrap()
    }

    #[test]
    fn test_wheel_scrolls_rows_per_notch() {
        let mut v = tall_view();
        assert!(v.scroll_wheel(1));
        assert_eq!(v.viewport().hidden_rows(), 3);
        assert!(v.scroll_wheel(-1));
        assert_eq!(v.viewport().hidden_rows(), 0);
    }

    #[test]
    fn test_wheel_stops_at_maximum() {
        let mut v = tall_view();
        v.scroll_wheel(100);
        assert_eq!(v.viewport().hidden_rows(), v.viewport().maximum_hidden_rows());
        assert!(!v.scroll_wheel(1));
    }

    #[test]
    fn test_wheel_leaves_selection() {
        let mut v = tall_view();
        v.scroll_wheel(2);
        assert_eq!(v.selection().cursor(), Some((0, 0)));
    }

    #[test]
    fn test_zero_notches_do_nothing() {
        let mut v = tall_view();
        assert!(!v.scroll_wheel(0));
        assert!(!v.scroll_wheel_horizontal(0));
    }
}
