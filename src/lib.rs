//! sheetgrid - virtualized spreadsheet grid core
//!
//! Pixel-exact geometry and selection for a grid that only ever lays out the
//! cells in view:
//! - Per-column widths, fixed row height, frozen leading rows and columns
//! - Scrolling by whole cells, clamped so the last cell can always be shown
//! - Point or range selection with keyboard, mouse and wheel input
//! - Copy/cut/paste/delete and in-place cell editing through a data provider
//!
//! Drawing is left to the host: [`SheetView::visible_cells`] returns a paint
//! list of rectangles and text.
//!
//! # Usage
//!
//! ```
//! use sheetgrid::{ClipboardSink, MemoryClipboard, SheetConfig, SheetView, TableProvider};
//!
//! let table = TableProvider::new([["a", "b"], ["c", "d"]]);
//! let config = SheetConfig::default().with_column_widths(&[40, 40]);
//! let mut view = SheetView::new(table, MemoryClipboard::new(), config)?;
//! view.key_down("ArrowRight", false, true)?;
//! view.copy()?;
//! assert_eq!(view.clipboard().text().as_deref(), Some("a\tb"));
//! # Ok::<(), sheetgrid::GridError>(())
//! ```

pub mod config;
pub mod csv;
pub mod editor;
pub mod error;
pub mod layout;
pub mod provider;
pub mod selection;
pub mod viewer;

#[cfg(target_arch = "wasm32")]
pub mod bindings;

use wasm_bindgen::prelude::*;

pub use config::SheetConfig;
pub use error::{GridError, Result};
pub use layout::{CellRect, Viewport};
pub use provider::{DataProvider, TableProvider};
pub use selection::{CellRange, Selection, SelectionMode};
pub use viewer::clipboard::{ClipboardSink, MemoryClipboard};
pub use viewer::events::InteractionState;
pub use viewer::{SheetView, VisibleCell};

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
