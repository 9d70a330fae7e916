//! Terminal input decoding and non-blocking polling.
//!
//! `poll_event` waits at most `timeout` for one crossterm event and converts it
//! into a `core_events::InputEvent`. Events the editor does not understand
//! (mouse, focus, paste, unsupported keys) are consumed and reported as `None`
//! so the caller treats them like an idle tick.

mod key;

use anyhow::{Context, Result};
use core_events::InputEvent;
use crossterm::event::{self, Event as CEvent};
use std::time::Duration;
use tracing::trace;

/// Convert one crossterm event. `None` means "ignore".
pub fn decode(event: &CEvent) -> Option<InputEvent> {
    let decoded = match event {
        CEvent::Key(k) => key::map_key_event(k).map(InputEvent::Key),
        CEvent::Resize(cols, rows) => Some(InputEvent::Resize(*cols, *rows)),
        _ => None,
    };
    if decoded.is_none() {
        log_ignored(event);
    }
    decoded
}

/// Wait up to `timeout` for input; `Ok(None)` on timeout or ignored input.
pub fn poll_event(timeout: Duration) -> Result<Option<InputEvent>> {
    if !event::poll(timeout).context("poll terminal input")? {
        return Ok(None);
    }
    let raw = event::read().context("read terminal input")?;
    Ok(decode(&raw))
}

fn log_ignored(event: &CEvent) {
    let kind = match event {
        CEvent::Key(_) => "key",
        CEvent::Resize(..) => "resize",
        CEvent::Mouse(_) => "mouse",
        CEvent::Paste(p) => {
            trace!(target: "input", len = p.len(), "paste_ignored");
            return;
        }
        _ => "other",
    };
    trace!(target: "input", kind, "event_ignored");
}
