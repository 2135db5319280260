//! Cell edit session.
//!
//! At most one cell is edited at a time. The session holds the text being
//! typed; committing writes it through the [`DataProvider`], cancelling
//! throws it away. Operations that change or destroy the selection commit the
//! session first so typed text is never silently lost.

pub(crate) mod mutation;

use crate::error::{GridError, Result};
use crate::provider::DataProvider;

/// An open edit on one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub column: u32,
    pub row: u32,
    /// Text typed so far.
    pub text: String,
}

/// Editor state for one view.
#[derive(Debug, Default)]
pub struct CellEditor {
    session: Option<EditSession>,
}

impl CellEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// The cell being edited, if any.
    pub fn editing_cell(&self) -> Option<(u32, u32)> {
        self.session.as_ref().map(|s| (s.column, s.row))
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Open a session on a cell.
    ///
    /// `initial` replaces the cell's text (typing over a cell); `None` starts
    /// from the current contents. An already open session is committed first.
    ///
    /// # Errors
    /// Refuses read-only providers and cells, and propagates a failed commit of
    /// the previous session.
    pub fn begin_edit(
        &mut self,
        provider: &mut dyn DataProvider,
        column: u32,
        row: u32,
        initial: Option<&str>,
    ) -> Result<()> {
        if self.editing_cell() == Some((column, row)) {
            return Ok(());
        }
        self.end_edit(provider)?;
        if column >= provider.column_count() || row >= provider.row_count() {
            return Err(GridError::OutOfRange { column, row });
        }
        if provider.is_read_only() {
            return Err(GridError::ReadOnly);
        }
        if provider.is_cell_read_only(column, row) {
            return Err(GridError::ReadOnlyCell { column, row });
        }
        let text = match initial {
            Some(text) => text.to_string(),
            None => provider.cell_contents(column, row).unwrap_or_default(),
        };
        tracing::debug!(column, row, "edit started");
        self.session = Some(EditSession { column, row, text });
        Ok(())
    }

    /// Replace the session text. Ignored when no session is open.
    pub fn set_text(&mut self, text: &str) {
        if let Some(session) = self.session.as_mut() {
            session.text = text.to_string();
        }
    }

    pub fn push_char(&mut self, ch: char) {
        if let Some(session) = self.session.as_mut() {
            session.text.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.text.pop();
        }
    }

    /// Commit the open session, if any. Returns the committed cell.
    ///
    /// # Errors
    /// If the provider refuses the write the session stays open with its text
    /// intact and the error is returned.
    pub fn end_edit(&mut self, provider: &mut dyn DataProvider) -> Result<Option<(u32, u32)>> {
        let Some(session) = self.session.as_ref() else {
            return Ok(None);
        };
        let (column, row) = (session.column, session.row);
        if let Err(e) = mutation::apply_cell_edit(provider, column, row, &session.text) {
            tracing::warn!(column, row, error = %e, "edit commit refused");
            return Err(e);
        }
        tracing::debug!(column, row, "edit committed");
        self.session = None;
        Ok(Some((column, row)))
    }

    /// Discard the open session. Returns true if one was open.
    pub fn cancel_edit(&mut self) -> bool {
        self.session.take().is_some()
    }
}
