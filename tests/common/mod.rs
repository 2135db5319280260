//! Common test fixtures for sheetgrid integration tests.
//!
//! Builders for configs, tables and views shared by the geometry, selection
//! and controller suites.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use sheetgrid::{
    CellRect, MemoryClipboard, SheetConfig, SheetView, TableProvider, Viewport,
};

/// Row height every fixture uses.
pub const ROW: u32 = 35;

pub type TestView = SheetView<TableProvider, MemoryClipboard>;

// ============================================================================
// Config and viewport builders
// ============================================================================

/// Config with explicit frozen counts, widths and viewport size.
pub fn config(frozen_rows: u32, frozen_cols: u32, widths: &[u32], width: u32, height: u32) -> SheetConfig {
    SheetConfig::default()
        .with_frozen(frozen_rows, frozen_cols)
        .with_column_widths(widths)
        .with_size(width, height)
}

/// Viewport over a grid with one column per width.
pub fn viewport(
    frozen_rows: u32,
    frozen_cols: u32,
    widths: &[u32],
    width: u32,
    height: u32,
    rows: u32,
) -> Viewport {
    let cols = u32::try_from(widths.len()).unwrap();
    Viewport::new(&config(frozen_rows, frozen_cols, widths, width, height), cols, rows)
}

pub fn rect(x: u32, y: u32, width: u32, height: u32) -> Option<CellRect> {
    Some(CellRect::new(x, y, width, height))
}

// ============================================================================
// Table builders
// ============================================================================

/// Column letter for small test grids.
pub fn letter(col: u32) -> char {
    char::from(b'a' + u8::try_from(col).unwrap())
}

/// `cols` x `rows` data cells named `a1`, `b1`, ... with no heading row.
pub fn letters_table(cols: u32, rows: u32) -> TableProvider {
    TableProvider::new(
        (1..=rows).map(|r| (0..cols).map(move |c| format!("{}{}", letter(c), r))),
    )
}

/// The classic 4x4 sheet: heading row `A..D` above data rows `a1..d3`.
pub fn headed_table() -> TableProvider {
    TableProvider::new(
        (1..=3).map(|r| (0..4).map(move |c| format!("{}{}", letter(c), r))),
    )
    .with_headings(["A", "B", "C", "D"])
}

// ============================================================================
// View builders
// ============================================================================

pub fn view(table: TableProvider, config: SheetConfig) -> TestView {
    SheetView::new(table, MemoryClipboard::new(), config).unwrap()
}

/// A 6x30 view with one frozen heading row and 40px columns in a 200x200 window.
pub fn tall_view() -> TestView {
    let table = TableProvider::new(
        (1..30).map(|r| (0..6).map(move |c| format!("{}{}", letter(c), r))),
    )
    .with_headings(["A", "B", "C", "D", "E", "F"]);
    view(table, config(1, 0, &[40; 6], 200, 200))
}

/// Selected rectangle as `(left, top, right, bottom)`.
pub fn corners(view: &TestView) -> (u32, u32, u32, u32) {
    let r = view.selected_range().expect("non-empty selection");
    (r.left, r.top, r.right, r.bottom)
}
