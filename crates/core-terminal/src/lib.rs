//! Terminal lifecycle and the drawing surface the editor renders onto.
//!
//! * `TerminalBackend` / `CrosstermBackend`: raw mode + alternate screen
//!   enter/leave, with `TerminalGuard` restoring the terminal on drop so every
//!   exit path (early return, fatal error, panic unwind) leaves a usable shell.
//! * `TerminalSurface`: the small set of drawing and input primitives the
//!   renderer and event loop need. `CrosstermSurface` drives a real terminal;
//!   `HeadlessSurface` is an in-memory cell grid with scripted input for tests.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;
use tracing::{debug, warn};

pub mod capabilities;
mod crossterm_surface;
mod headless;
mod surface;

pub use capabilities::TerminalCapabilities;
pub use crossterm_surface::CrosstermSurface;
pub use headless::HeadlessSurface;
pub use surface::TerminalSurface;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct CrosstermBackend {
    entered: bool,
}

/// Leaves the terminal when dropped, however the scope is exited.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen)?;
            self.entered = true;
            debug!(target: "terminal", "entered");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            debug!(target: "terminal", "left");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.backend.leave() {
            warn!(target: "terminal", ?e, "restore_failed");
        }
    }
}
