//! JavaScript bindings.
//!
//! `GridHandle` wraps a [`SheetView`] over delimited text and forwards DOM
//! events to it. Pixel coordinates arrive as JS numbers and are clamped to
//! non-negative integers.
//!
//! ```javascript
//! import init, { GridHandle } from 'sheetgrid';
//! await init();
//! const grid = new GridHandle(csvText, JSON.stringify({ numberFrozenRows: 1 }), true);
//! canvas.addEventListener('keydown', (e) => { if (grid.handle_key_event(e)) draw(grid.visible_cells()); });
//! ```

use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, MouseEvent, WheelEvent};

use crate::config::SheetConfig;
use crate::csv::Delimiter;
use crate::layout::CellRect;
use crate::provider::TableProvider;
use crate::viewer::clipboard::WebClipboard;
use crate::viewer::SheetView;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_px(v: f64) -> u32 {
    if v.is_nan() || v <= 0.0 {
        0
    } else {
        v.min(f64::from(u32::MAX)) as u32
    }
}

fn event_px(v: i32) -> u32 {
    u32::try_from(v).unwrap_or(0)
}

fn rect_vec(rect: CellRect) -> Vec<u32> {
    vec![rect.x, rect.y, rect.width, rect.height]
}

/// A grid view exported to JavaScript.
#[wasm_bindgen]
pub struct GridHandle {
    view: SheetView<TableProvider, WebClipboard>,
}

#[wasm_bindgen]
impl GridHandle {
    /// Build a grid from CSV or TSV text and a JSON config (empty string for
    /// defaults). With `has_headings` the first record becomes a read-only
    /// heading row, frozen unless the config says otherwise.
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str, config_json: &str, has_headings: bool) -> Result<GridHandle, JsValue> {
        console_error_panic_hook::set_once();

        let mut config = if config_json.trim().is_empty() {
            SheetConfig::default()
        } else {
            SheetConfig::from_json(config_json)?
        };
        let first_line = text.lines().next().unwrap_or_default();
        let delim = if first_line.contains('\t') {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        };
        let table = TableProvider::from_delimited(text, delim, has_headings);
        if config.number_frozen_rows == 0 {
            config.number_frozen_rows = table.heading_rows();
        }
        let view = SheetView::new(table, WebClipboard, config)?;
        Ok(GridHandle { view })
    }

    // ---- Events ----

    /// Forward a `keydown` event. Returns true (and prevents the default
    /// action) when the grid consumed the key.
    pub fn handle_key_event(&mut self, event: &KeyboardEvent) -> Result<bool, JsValue> {
        let ctrl = event.ctrl_key() || event.meta_key();
        let handled = self.view.key_down(&event.key(), ctrl, event.shift_key())?;
        if handled {
            event.prevent_default();
        }
        Ok(handled)
    }

    pub fn on_key_down(&mut self, key: &str, ctrl: bool, shift: bool) -> Result<bool, JsValue> {
        Ok(self.view.key_down(key, ctrl, shift)?)
    }

    pub fn on_key_up(&mut self, key: &str) {
        self.view.key_up(key);
    }

    pub fn handle_mouse_down_event(&mut self, event: &MouseEvent) -> Result<(), JsValue> {
        let (x, y) = (event_px(event.offset_x()), event_px(event.offset_y()));
        Ok(self.view.mouse_down(x, y, event.shift_key())?)
    }

    pub fn on_mouse_down(&mut self, x: f64, y: f64, shift: bool) -> Result<(), JsValue> {
        Ok(self.view.mouse_down(to_px(x), to_px(y), shift)?)
    }

    pub fn on_mouse_move(&mut self, x: f64, y: f64) {
        self.view.mouse_move(to_px(x), to_px(y));
    }

    pub fn on_mouse_up(&mut self) {
        self.view.mouse_up();
    }

    pub fn on_double_click(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        Ok(self.view.double_click(to_px(x), to_px(y))?)
    }

    /// Forward a `wheel` event; each event counts as one notch per axis.
    pub fn handle_wheel_event(&mut self, event: &WheelEvent) -> bool {
        let vertical = self.on_wheel(event.delta_y());
        let horizontal = if event.delta_x() > 0.0 {
            self.view.scroll_wheel_horizontal(1)
        } else if event.delta_x() < 0.0 {
            self.view.scroll_wheel_horizontal(-1)
        } else {
            false
        };
        if vertical || horizontal {
            event.prevent_default();
        }
        vertical || horizontal
    }

    pub fn on_wheel(&mut self, delta_y: f64) -> bool {
        if delta_y > 0.0 {
            self.view.scroll_wheel(1)
        } else if delta_y < 0.0 {
            self.view.scroll_wheel(-1)
        } else {
            false
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.view.resize(to_px(width), to_px(height));
    }

    // ---- Commands ----

    pub fn copy(&mut self) -> Result<(), JsValue> {
        Ok(self.view.copy()?)
    }

    pub fn cut(&mut self) -> Result<u32, JsValue> {
        let cleared = self.view.cut()?;
        Ok(u32::try_from(cleared).unwrap_or(u32::MAX))
    }

    pub fn delete(&mut self) -> Result<u32, JsValue> {
        let cleared = self.view.delete()?;
        Ok(u32::try_from(cleared).unwrap_or(u32::MAX))
    }

    pub fn paste(&mut self, text: &str) -> Result<u32, JsValue> {
        let written = self.view.paste(text)?;
        Ok(u32::try_from(written).unwrap_or(u32::MAX))
    }

    pub fn select_all(&mut self) -> Result<(), JsValue> {
        Ok(self.view.select_all()?)
    }

    pub fn set_edit_text(&mut self, text: &str) {
        self.view.set_edit_text(text);
    }

    pub fn commit_edit(&mut self) -> Result<(), JsValue> {
        Ok(self.view.commit_edit()?)
    }

    pub fn cancel_edit(&mut self) {
        self.view.cancel_edit();
    }

    // ---- Queries ----

    /// `[x, y, width, height]`, or `undefined` when the cell is not visible.
    pub fn calculate_bounds(&self, column: u32, row: u32) -> Option<Vec<u32>> {
        self.view.calculate_bounds(column, row).map(rect_vec)
    }

    /// `[column, row]` under a viewport pixel.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<Vec<u32>> {
        self.view
            .cell_at(to_px(x), to_px(y))
            .map(|(c, r)| vec![c, r])
    }

    /// `[left, top, right, bottom]` of the selection.
    pub fn get_selection(&self) -> Option<Vec<u32>> {
        self.view
            .selected_range()
            .map(|r| vec![r.left, r.top, r.right, r.bottom])
    }

    pub fn number_of_cells_selected(&self) -> u64 {
        self.view.number_of_cells_selected()
    }

    /// Overlay rectangle for the open edit, `[x, y, width, height]`.
    pub fn editor_bounds(&self) -> Option<Vec<u32>> {
        self.view.editor_bounds().map(rect_vec)
    }

    pub fn is_editing(&self) -> bool {
        self.view.editor().is_editing()
    }

    pub fn hidden_columns(&self) -> u32 {
        self.view.viewport().hidden_columns()
    }

    pub fn hidden_rows(&self) -> u32 {
        self.view.viewport().hidden_rows()
    }

    /// Scroll state for scrollbars: hidden and maximum hidden counts, frozen
    /// counts and viewport size.
    pub fn viewport_info(&self) -> JsValue {
        let vp = self.view.viewport();
        let fields = [
            ("hiddenColumns", vp.hidden_columns()),
            ("hiddenRows", vp.hidden_rows()),
            ("maximumHiddenColumns", vp.maximum_hidden_columns()),
            ("maximumHiddenRows", vp.maximum_hidden_rows()),
            ("frozenColumns", vp.frozen_columns()),
            ("frozenRows", vp.frozen_rows()),
            ("width", vp.width()),
            ("height", vp.height()),
        ];
        let obj = js_sys::Object::new();
        for (key, value) in fields {
            let _ = js_sys::Reflect::set(&obj, &key.into(), &value.into());
        }
        obj.into()
    }

    /// Paint list as an array of `{column, row, x, y, width, height, text, selected, editing}`.
    pub fn visible_cells(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.view.visible_cells())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    pub fn take_needs_render(&mut self) -> bool {
        self.view.take_needs_render()
    }
}
