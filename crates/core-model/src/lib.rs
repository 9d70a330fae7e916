//! Edit session model: the single document, its cursor, and the view onto it.
//!
//! `EditSession` owns everything a keystroke can touch:
//! * the line `Buffer` and the logical cursor into it,
//! * the `Viewport` (terminal size, bar margins, scroll offsets),
//! * the `Clipboard` and the `SessionStatus` label,
//! * bookkeeping flags (`needs_redraw`, `stopped`, consecutive-cut tracking).
//!
//! Command semantics live in `core-actions`; this crate only guarantees the
//! structural invariants that must hold after every public call:
//! * the buffer holds at least one line,
//! * `cursor.row < line_count` and `cursor.col <= line_len(cursor.row)`,
//! * the drawable band is at least one row tall (`SessionError::TerminalTooSmall`
//!   otherwise).
//!
//! Keeping the cursor *visible* is the dispatcher's job (it knows which scroll
//! policy a command implies); `ensure_cursor_visible` is the generic fallback.

pub mod viewport;

use core_state::{Clipboard, SessionStatus, StatusKind};
use core_text::{Buffer, Position};
use thiserror::Error;
use tracing::{debug, info, warn};
pub use viewport::{
    CONTINUATION_MARKER, Margins, ScreenPosition, ScrollOffsets, TerminalSize, Viewport,
    drawable_height, fit_column, logical_to_screen, reveal, reveal_column, reveal_row,
    screen_to_logical,
};

/// Persistence callback: receives the full serialized document, returns success.
pub type SaveFn = Box<dyn FnMut(&str) -> bool>;

/// Default number of spaces a tab expands to.
pub const DEFAULT_TAB_WIDTH: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(
        "terminal too small: {rows}x{cols} leaves no room for text between margins {top}+{bottom}"
    )]
    TerminalTooSmall {
        rows: u16,
        cols: u16,
        top: u16,
        bottom: u16,
    },
}

impl SessionError {
    fn too_small(size: TerminalSize, margins: Margins) -> Self {
        SessionError::TerminalTooSmall {
            rows: size.rows,
            cols: size.cols,
            top: margins.top,
            bottom: margins.bottom,
        }
    }
}

pub struct EditSession {
    label: String,
    buffer: Buffer,
    cursor: Position,
    viewport: Viewport,
    clipboard: Clipboard,
    status: SessionStatus,
    tab_width: usize,
    needs_redraw: bool,
    stopped: bool,
    last_was_cut: bool,
    save_fn: Option<SaveFn>,
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("label", &self.label)
            .field("lines", &self.buffer.line_count())
            .field("cursor", &self.cursor)
            .field("viewport", &self.viewport)
            .field("status", &self.status)
            .field("needs_redraw", &self.needs_redraw)
            .field("stopped", &self.stopped)
            .field("has_save_fn", &self.save_fn.is_some())
            .finish()
    }
}

impl EditSession {
    /// Create a session over `text` with the cursor at the origin and no scrolling.
    pub fn new(
        label: impl Into<String>,
        text: &str,
        size: TerminalSize,
        margins: Margins,
    ) -> Result<Self, SessionError> {
        let viewport = Viewport::new(size, margins);
        if viewport.is_degenerate() {
            return Err(SessionError::too_small(size, margins));
        }
        let buffer = Buffer::from_text(text);
        let label = label.into();
        info!(
            target: "model",
            label = %label,
            lines = buffer.line_count(),
            rows = size.rows,
            cols = size.cols,
            "session_open"
        );
        Ok(Self {
            label,
            buffer,
            cursor: Position::origin(),
            viewport,
            clipboard: Clipboard::new(),
            status: SessionStatus::new(),
            tab_width: DEFAULT_TAB_WIDTH,
            needs_redraw: true,
            stopped: false,
            last_was_cut: false,
            save_fn: None,
        })
    }

    pub fn with_save_fn(mut self, save: SaveFn) -> Self {
        self.save_fn = Some(save);
        self
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Serialized document (lines joined by the delimiter).
    pub fn text(&self) -> String {
        self.buffer.to_text()
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Move the cursor, clamping it to a valid buffer position.
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.buffer.clamp(pos);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn offsets(&self) -> ScrollOffsets {
        self.viewport.offsets
    }

    pub fn margins(&self) -> Margins {
        self.viewport.margins
    }

    pub fn size(&self) -> TerminalSize {
        self.viewport.size
    }

    /// Screen cell currently occupied by the cursor.
    pub fn screen_cursor(&self) -> ScreenPosition {
        self.viewport.screen_cursor(self.cursor)
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Disjoint borrows of buffer and clipboard for cut/paste.
    pub fn buffer_and_clipboard_mut(&mut self) -> (&mut Buffer, &mut Clipboard) {
        (&mut self.buffer, &mut self.clipboard)
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Update the status label; a change requests a redraw.
    pub fn set_status(&mut self, kind: StatusKind) -> bool {
        let changed = self.status.set(kind);
        if changed {
            self.needs_redraw = true;
        }
        changed
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn mark_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Read and clear the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn stop(&mut self) {
        if !self.stopped {
            debug!(target: "model", "session_stop");
        }
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether the previously dispatched command was a line cut.
    pub fn last_command_was_cut(&self) -> bool {
        self.last_was_cut
    }

    /// Record whether the command just dispatched was a line cut.
    pub fn note_command(&mut self, was_cut: bool) {
        self.last_was_cut = was_cut;
    }

    pub fn has_save_fn(&self) -> bool {
        self.save_fn.is_some()
    }

    /// Hand the serialized document to the save callback.
    ///
    /// Returns `None` when no callback is installed, otherwise the callback's verdict.
    pub fn invoke_save(&mut self) -> Option<bool> {
        let text = self.buffer.to_text();
        let save = self.save_fn.as_mut()?;
        Some(save(&text))
    }

    /// Adopt a new terminal size and refit scroll offsets to the cursor.
    pub fn resize(&mut self, size: TerminalSize) -> Result<(), SessionError> {
        let candidate = Viewport {
            size,
            ..self.viewport
        };
        if candidate.is_degenerate() {
            warn!(
                target: "model",
                rows = size.rows,
                cols = size.cols,
                "resize_too_small"
            );
            return Err(SessionError::too_small(size, self.viewport.margins));
        }
        self.viewport = candidate;
        self.viewport.reveal_row(self.cursor.row);
        self.viewport.fit_column(self.cursor.col);
        self.needs_redraw = true;
        debug!(
            target: "model",
            rows = size.rows,
            cols = size.cols,
            vertical = self.viewport.offsets.vertical,
            horizontal = self.viewport.offsets.horizontal,
            "resize"
        );
        Ok(())
    }

    /// Minimal scroll on both axes to bring the cursor on screen.
    /// Returns true (and requests a redraw) if an offset changed.
    pub fn ensure_cursor_visible(&mut self) -> bool {
        let v = self.viewport.reveal_row(self.cursor.row);
        let h = self.viewport.reveal_column(self.cursor.col);
        if v || h {
            self.needs_redraw = true;
        }
        v || h
    }
}
