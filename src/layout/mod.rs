//! Layout engine for cell positions and viewport management.
//!
//! This module handles:
//! - Per-axis scroll state as hidden counts with frozen leading indices
//! - Pixel bounds and hit testing for visible cells
//! - Column autosizing from cell text

mod autosize;
mod axis;
mod viewport;

pub use autosize::autosize_columns;
pub use viewport::{CellRect, Viewport};
