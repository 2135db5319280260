//! Clipboard sinks for copy and cut.
//!
//! The view hands one string per copy to a [`ClipboardSink`]. Tests and the
//! CLI use [`MemoryClipboard`]; in the browser [`WebClipboard`] forwards to
//! `navigator.clipboard`.

/// Destination for copied text.
pub trait ClipboardSink {
    /// Replace the clipboard contents.
    fn set_text(&mut self, text: &str);

    /// Current contents, when the sink can read them back.
    fn text(&self) -> Option<String> {
        None
    }
}

/// Clipboard kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) {
        self.contents = Some(text.to_string());
    }

    fn text(&self) -> Option<String> {
        self.contents.clone()
    }
}

/// Clipboard backed by the browser's async clipboard API.
///
/// Writes are fire-and-forget; the page must have clipboard permission.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct WebClipboard;

#[cfg(target_arch = "wasm32")]
impl ClipboardSink for WebClipboard {
    fn set_text(&mut self, text: &str) {
        if let Some(window) = web_sys::window() {
            let clipboard = window.navigator().clipboard();
            let _ = clipboard.write_text(text);
        }
    }
}
