//! Construction configuration for a grid view.
//!
//! JSON keys follow the option names the UI layer already uses
//! (`numberFrozenRows`, `columnWidths`, ...). Every field has a default, so
//! `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::selection::SelectionMode;

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: u32 = 35;

/// Default horizontal padding on each side of a cell's text, in pixels.
pub const DEFAULT_CELL_PADDING: u32 = 10;

/// Default column width in pixels, used for columns without a configured width.
pub const DEFAULT_COLUMN_WIDTH: u32 = 64;

/// Default average glyph width used when autosizing columns.
pub const DEFAULT_CHAR_WIDTH: u32 = 8;

/// Default number of rows scrolled per mouse-wheel notch.
pub const DEFAULT_WHEEL_ROWS: u32 = 3;

/// Layout and behavior options for one grid view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SheetConfig {
    /// Leading rows that never scroll.
    pub number_frozen_rows: u32,
    /// Leading columns that never scroll.
    pub number_frozen_columns: u32,
    /// Pixel width per column. Empty means autosize from cell text.
    pub column_widths: Vec<u32>,
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Fixed row height in pixels
    pub row_height: u32,
    /// Horizontal text padding on each side of a cell
    pub cell_padding: u32,
    /// Width for columns beyond `column_widths`, and the autosize floor
    pub default_column_width: u32,
    /// Average glyph width used by autosizing
    pub char_width: u32,
    /// Rows per wheel notch
    pub wheel_rows: u32,
    /// Point (single cursor) or range selection
    pub selection_mode: SelectionMode,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            number_frozen_rows: 0,
            number_frozen_columns: 0,
            column_widths: Vec::new(),
            width: 800,
            height: 600,
            row_height: DEFAULT_ROW_HEIGHT,
            cell_padding: DEFAULT_CELL_PADDING,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            char_width: DEFAULT_CHAR_WIDTH,
            wheel_rows: DEFAULT_WHEEL_ROWS,
            selection_mode: SelectionMode::Range,
        }
    }
}

impl SheetConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    /// Returns [`GridError::Config`] for malformed JSON and
    /// [`GridError::InvalidConfig`] for values that cannot lay out a grid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SheetConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    /// Returns [`GridError::Config`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make geometry degenerate.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidConfig`] naming the offending option.
    pub fn validate(&self) -> Result<()> {
        if self.row_height == 0 {
            return Err(GridError::InvalidConfig("rowHeight must be positive".into()));
        }
        if self.default_column_width == 0 {
            return Err(GridError::InvalidConfig(
                "defaultColumnWidth must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Builder-style frozen counts, handy for tests and embedding.
    #[must_use]
    pub fn with_frozen(mut self, rows: u32, columns: u32) -> Self {
        self.number_frozen_rows = rows;
        self.number_frozen_columns = columns;
        self
    }

    /// Builder-style column widths.
    #[must_use]
    pub fn with_column_widths(mut self, widths: &[u32]) -> Self {
        self.column_widths = widths.to_vec();
        self
    }

    /// Builder-style viewport size.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder-style selection mode.
    #[must_use]
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }
}
