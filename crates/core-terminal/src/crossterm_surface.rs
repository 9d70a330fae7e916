use crate::{TerminalCapabilities, TerminalSurface};
use anyhow::{Context, Result};
use core_events::InputEvent;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType},
};
use std::io::{Stdout, Write, stdout};
use std::time::Duration;

/// Delete Character (DCH): removes the cell under the cursor, pulling the rest
/// of the row one column left.
const DELETE_CHAR: &str = "\x1b[P";

/// Surface backed by crossterm commands queued onto `W` (stdout by default).
pub struct CrosstermSurface<W: Write = Stdout> {
    out: W,
    caps: TerminalCapabilities,
}

impl CrosstermSurface<Stdout> {
    pub fn stdout(caps: TerminalCapabilities) -> Self {
        Self::new(stdout(), caps)
    }
}

impl<W: Write> CrosstermSurface<W> {
    pub fn new(out: W, caps: TerminalCapabilities) -> Self {
        Self { out, caps }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TerminalSurface for CrosstermSurface<W> {
    fn size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = terminal::size().context("query terminal size")?;
        Ok((rows, cols))
    }

    fn move_to(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(self.out, MoveTo(col, row))?;
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        if !text.is_empty() {
            queue!(self.out, Print(text))?;
        }
        Ok(())
    }

    fn clear_to_eol(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    fn clear_all(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        Ok(())
    }

    fn set_reverse(&mut self, on: bool) -> Result<()> {
        let attr = if on {
            Attribute::Reverse
        } else {
            Attribute::NoReverse
        };
        queue!(self.out, SetAttribute(attr))?;
        Ok(())
    }

    fn delete_char(&mut self) -> Result<bool> {
        if !self.caps.supports_delete_char {
            return Ok(false);
        }
        queue!(self.out, Print(DELETE_CHAR))?;
        Ok(true)
    }

    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        core_input::poll_event(timeout)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flush terminal output")
    }
}
