//! Single-threaded event loop: poll, dispatch one action per event, redraw
//! when idle.
//!
//! The only suspension point is the bounded poll timeout. A frame is drawn
//! only once no input is pending and the session reports `needs_redraw`, so a
//! burst of keys (a paste typed by the terminal, key repeat) costs one frame.

use anyhow::Result;
use core_actions::{Action, EditKind, dispatch, translate_key};
use core_events::InputEvent;
use core_model::EditSession;
use core_render::render_frame;
use core_terminal::TerminalSurface;
use std::fmt;
use std::time::Duration;
use tracing::{error, trace};

/// Why the loop returned normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::Quit => "quit",
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum LoopControl {
    Continue,
    Break { reason: ExitReason },
}

pub struct EventLoop<'a, S: TerminalSurface + ?Sized> {
    session: &'a mut EditSession,
    surface: &'a mut S,
    idle_delay: Duration,
    frames: usize,
}

impl<'a, S: TerminalSurface + ?Sized> EventLoop<'a, S> {
    pub fn new(session: &'a mut EditSession, surface: &'a mut S, idle_delay: Duration) -> Self {
        Self {
            session,
            surface,
            idle_delay,
            frames: 0,
        }
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Run until the quit key. A terminal resized below a usable size ends the
    /// loop with an error; the caller's terminal guard restores the screen.
    pub fn run(&mut self) -> Result<ExitReason> {
        let span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter = span.enter();
        loop {
            if self.session.is_stopped() {
                return Ok(ExitReason::Quit);
            }
            let control = match self.surface.poll_event(self.idle_delay)? {
                Some(event) => self.handle_event(event)?,
                None => {
                    self.redraw_if_needed()?;
                    LoopControl::Continue
                }
            };
            if let LoopControl::Break { reason } = control {
                trace!(target: "runtime", reason = reason.as_str(), "loop_exit");
                return Ok(reason);
            }
        }
    }

    fn handle_event(&mut self, event: InputEvent) -> Result<LoopControl> {
        let Some(action) = translate_key(&event) else {
            trace!(target: "runtime", ?event, "input_ignored");
            return Ok(LoopControl::Continue);
        };
        if action == Action::Edit(EditKind::DeleteForward) && !self.surface.delete_char()? {
            trace!(target: "runtime", "delete_char_unsupported");
            return Ok(LoopControl::Continue);
        }
        let result = match dispatch(action, &mut *self.session) {
            Ok(result) => result,
            Err(e) => {
                error!(target: "runtime", error = %e, "dispatch_fatal");
                return Err(e.into());
            }
        };
        if result.quit {
            return Ok(LoopControl::Break {
                reason: ExitReason::Quit,
            });
        }
        Ok(LoopControl::Continue)
    }

    fn redraw_if_needed(&mut self) -> Result<()> {
        if !self.session.take_redraw() {
            return Ok(());
        }
        let stats = render_frame(&*self.session, &mut *self.surface)?;
        self.frames += 1;
        trace!(
            target: "runtime",
            frame = self.frames,
            text_rows = stats.text_rows,
            "redraw"
        );
        Ok(())
    }
}
