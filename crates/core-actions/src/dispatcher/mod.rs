//! Dispatcher applying `Action` to an `EditSession`.
//!
//! Sub-modules:
//! * `motion`    - cursor movement and the scroll policy it implies
//! * `edit`      - text mutation (insert/newline/backspace/delete)
//! * `clipboard` - line cut and paste
//! * `command`   - save, resize, quit
//!
//! Cross-cutting rules enforced here rather than per handler:
//! * a stopped session ignores every action,
//! * any action other than `CutLine` breaks cut consecutiveness (resize is
//!   not a command and leaves it alone),
//! * a dirty result requests a redraw from the session,
//! * the cursor stays inside the drawable band after every action.

use crate::Action;
use core_model::{EditSession, SessionError};
use tracing::trace;

mod clipboard;
mod command;
mod edit;
mod motion;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// The frame must be redrawn.
    pub dirty: bool,
    /// The session stopped; the event loop should exit.
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: false,
            quit: true,
        }
    }
    pub(crate) fn from_dirty(dirty: bool) -> Self {
        if dirty { Self::dirty() } else { Self::clean() }
    }
}

/// Apply one action. Only a resize to an unusable terminal size fails.
pub fn dispatch(action: Action, session: &mut EditSession) -> Result<DispatchResult, SessionError> {
    if session.is_stopped() {
        trace!(target: "actions.dispatch", ?action, "ignored_stopped");
        return Ok(DispatchResult::clean());
    }
    let consecutive_cut = session.last_command_was_cut();
    let result = match action {
        Action::Motion(kind) => motion::handle_motion(kind, 1, session),
        Action::MotionWithCount {
            motion: kind,
            count,
        } => motion::handle_motion(kind, count, session),
        Action::Edit(kind) => edit::handle_edit(kind, session),
        Action::CutLine => clipboard::handle_cut(session, consecutive_cut),
        Action::Paste => clipboard::handle_paste(session),
        Action::Save => command::handle_save(session),
        Action::Resize { rows, cols } => command::handle_resize(rows, cols, session)?,
        Action::Quit => command::handle_quit(session),
    };
    if !matches!(action, Action::Resize { .. }) {
        session.note_command(matches!(action, Action::CutLine));
    }
    if result.dirty {
        session.mark_redraw();
    }
    debug_assert!(
        session.viewport().contains(session.cursor()),
        "cursor {:?} left viewport {:?} after {:?}",
        session.cursor(),
        session.viewport(),
        action
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditKind, MotionKind};
    use core_model::{Margins, TerminalSize};
    use core_state::StatusKind;
    use core_text::Position;

    fn session(text: &str) -> EditSession {
        EditSession::new("t", text, TerminalSize::new(24, 80), Margins::default()).unwrap()
    }

    #[test]
    fn stopped_session_ignores_everything() {
        let mut s = session("abc");
        dispatch(Action::Quit, &mut s).unwrap();
        assert!(s.is_stopped());
        s.take_redraw();
        let r = dispatch(Action::Edit(EditKind::InsertChar('x')), &mut s).unwrap();
        assert_eq!(r, DispatchResult::clean());
        assert_eq!(s.text(), "abc");
        assert!(!s.needs_redraw());
    }

    #[test]
    fn quit_reports_quit() {
        let mut s = session("");
        let r = dispatch(Action::Quit, &mut s).unwrap();
        assert!(r.quit);
    }

    #[test]
    fn motion_breaks_cut_run() {
        let mut s = session("a\nb\nc\nd");
        dispatch(Action::CutLine, &mut s).unwrap();
        assert!(s.last_command_was_cut());
        dispatch(Action::Motion(MotionKind::Down), &mut s).unwrap();
        assert!(!s.last_command_was_cut());
        dispatch(Action::CutLine, &mut s).unwrap();
        assert_eq!(s.clipboard().lines(), ["c"]);
    }

    #[test]
    fn resize_keeps_cut_run() {
        let mut s = session("a\nb\nc");
        dispatch(Action::CutLine, &mut s).unwrap();
        dispatch(Action::Resize { rows: 30, cols: 90 }, &mut s).unwrap();
        dispatch(Action::CutLine, &mut s).unwrap();
        assert_eq!(s.clipboard().lines(), ["a", "b"]);
    }

    #[test]
    fn resize_too_small_is_an_error() {
        let mut s = session("a");
        let err = dispatch(Action::Resize { rows: 4, cols: 80 }, &mut s).unwrap_err();
        assert!(matches!(err, SessionError::TerminalTooSmall { .. }));
    }

    #[test]
    fn dirty_result_requests_redraw() {
        let mut s = session("abc");
        s.take_redraw();
        let r = dispatch(Action::Motion(MotionKind::Right), &mut s).unwrap();
        assert!(r.dirty);
        assert!(s.take_redraw());
        // Clamped no-op stays clean.
        s.set_cursor(Position::new(0, 3));
        let r = dispatch(Action::Motion(MotionKind::Right), &mut s).unwrap();
        assert!(!r.dirty);
        assert!(!s.needs_redraw());
    }

    #[test]
    fn insert_sets_modified() {
        let mut s = session("");
        dispatch(Action::Edit(EditKind::InsertChar('z')), &mut s).unwrap();
        assert_eq!(s.status().kind(), StatusKind::Modified);
    }
}
