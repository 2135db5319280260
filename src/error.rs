//! Structured error types for sheetgrid.
//!
//! Geometry and selection queries never fail; only writes into the data
//! provider and configuration loading produce a [`GridError`].

/// All errors that can occur while driving a grid view.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Cell address outside the provider's current extent.
    #[error("Cell ({column}, {row}) is outside the data extent")]
    OutOfRange { column: u32, row: u32 },

    /// The whole data provider refuses writes.
    #[error("Data provider is read-only")]
    ReadOnly,

    /// A single cell refuses writes (heading and unit rows, for example).
    #[error("Cell ({column}, {row}) is read-only")]
    ReadOnlyCell { column: u32, row: u32 },

    /// A multi-cell write where some cells were refused.
    #[error("{refused} cell write(s) refused, first at ({column}, {row})")]
    WritesRefused { refused: usize, column: u32, row: u32 },

    /// Configuration JSON could not be parsed.
    #[error("Config: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration parsed but holds unusable values.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

impl GridError {
    /// True for errors that mean "the provider refused this write" rather than
    /// a broken call.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::ReadOnly | Self::ReadOnlyCell { .. } | Self::WritesRefused { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
