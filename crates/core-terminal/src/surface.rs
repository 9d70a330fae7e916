use anyhow::Result;
use core_events::InputEvent;
use std::time::Duration;

/// Drawing and input primitives consumed by the renderer and event loop.
///
/// Coordinates are `(row, col)` terminal cells with the origin at the top-left.
/// Output may be buffered until `flush`.
pub trait TerminalSurface {
    /// Current size as `(rows, cols)`.
    fn size(&self) -> Result<(u16, u16)>;
    fn move_to(&mut self, row: u16, col: u16) -> Result<()>;
    /// Write at the current position, advancing the cursor.
    fn write_str(&mut self, text: &str) -> Result<()>;
    /// Clear from the current position to the end of the row.
    fn clear_to_eol(&mut self) -> Result<()>;
    fn clear_all(&mut self) -> Result<()>;
    /// Toggle reverse video for subsequent writes.
    fn set_reverse(&mut self, on: bool) -> Result<()>;
    /// Delete the cell under the cursor, shifting the rest of the row left.
    /// Returns false when the terminal cannot do this.
    fn delete_char(&mut self) -> Result<bool>;
    /// Wait at most `timeout` for one input event.
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>>;
    fn flush(&mut self) -> Result<()>;
}
