//! Fixed key table.
//!
//! | key                  | action                      |
//! |----------------------|-----------------------------|
//! | printable char       | `Edit(InsertChar(c))`       |
//! | Tab                  | `Edit(InsertChar('\t'))`    |
//! | Enter                | `Edit(Newline)`             |
//! | Backspace            | `Edit(Backspace)`           |
//! | Delete               | `Edit(DeleteForward)`       |
//! | arrows, Home, End    | `Motion(..)`                |
//! | PageUp / PageDown    | `Motion(PageUp / PageDown)` |
//! | Ctrl-K / Ctrl-U      | `CutLine` / `Paste`         |
//! | Ctrl-O / Ctrl-C      | `Save` / `Quit`             |
//! | terminal resize      | `Resize`                    |
//!
//! Control commands are also recognised as raw control characters (VT, NAK,
//! SI, ETX) for terminals that report them without a modifier.

use crate::{Action, EditKind, MotionKind};
use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers};

pub fn translate_key(event: &InputEvent) -> Option<Action> {
    match event {
        InputEvent::Resize(cols, rows) => Some(Action::Resize {
            rows: *rows,
            cols: *cols,
        }),
        InputEvent::Key(key) => translate(key),
    }
}

fn translate(key: &KeyEvent) -> Option<Action> {
    if key.mods.contains(KeyModifiers::CTRL) {
        return match key.code {
            KeyCode::Char(c) => control_command(c),
            _ => None,
        };
    }
    if key.mods.contains(KeyModifiers::ALT) {
        return None;
    }
    let action = match key.code {
        KeyCode::Char(c) => match raw_control(c) {
            Some(action) => action,
            None if c.is_control() => return None,
            None => Action::Edit(EditKind::InsertChar(c)),
        },
        KeyCode::Tab => Action::Edit(EditKind::InsertChar('\t')),
        KeyCode::Enter => Action::Edit(EditKind::Newline),
        KeyCode::Backspace => Action::Edit(EditKind::Backspace),
        KeyCode::Delete => Action::Edit(EditKind::DeleteForward),
        KeyCode::Up => Action::Motion(MotionKind::Up),
        KeyCode::Down => Action::Motion(MotionKind::Down),
        KeyCode::Left => Action::Motion(MotionKind::Left),
        KeyCode::Right => Action::Motion(MotionKind::Right),
        KeyCode::Home => Action::Motion(MotionKind::LineStart),
        KeyCode::End => Action::Motion(MotionKind::LineEnd),
        KeyCode::PageUp => Action::Motion(MotionKind::PageUp),
        KeyCode::PageDown => Action::Motion(MotionKind::PageDown),
        KeyCode::Esc => return None,
    };
    Some(action)
}

fn control_command(c: char) -> Option<Action> {
    match c {
        'k' => Some(Action::CutLine),
        'u' => Some(Action::Paste),
        'o' => Some(Action::Save),
        'c' => Some(Action::Quit),
        _ => None,
    }
}

fn raw_control(c: char) -> Option<Action> {
    match c {
        '\u{0b}' => Some(Action::CutLine),
        '\u{15}' => Some(Action::Paste),
        '\u{0f}' => Some(Action::Save),
        '\u{03}' => Some(Action::Quit),
        '\u{7f}' => Some(Action::Edit(EditKind::Backspace)),
        _ => None,
    }
}
