//! Editing commands: the key table, the dispatcher, and file IO helpers.
//!
//! `translate_key` maps one decoded input event to at most one `Action`;
//! `dispatch` applies that action to an `EditSession`. Unknown keys never
//! reach the dispatcher.

mod dispatcher;
pub mod io_ops;
mod key_translator;

pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::translate_key;

/// Cursor movements. Page motions repeat `Up`/`Down` one drawable page
/// (minus one row) at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    Up,
    Down,
    Left,
    Right,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Insert a character; `'\t'` expands to the session's tab width in spaces.
    InsertChar(char),
    Newline,
    Backspace,
    DeleteForward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    MotionWithCount { motion: MotionKind, count: u32 },
    Edit(EditKind),
    CutLine,
    Paste,
    Save,
    Resize { rows: u16, cols: u16 },
    Quit,
}
