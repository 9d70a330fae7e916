#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{Action, DispatchResult, dispatch, translate_key};
use core_events::{InputEvent, KeyCode, KeyEvent};
use core_model::{EditSession, Margins, TerminalSize};

pub fn session(text: &str, rows: u16, cols: u16) -> EditSession {
    EditSession::new("test.txt", text, TerminalSize::new(rows, cols), Margins::default())
        .expect("usable terminal size")
}

pub fn apply(session: &mut EditSession, action: Action) -> DispatchResult {
    dispatch(action, session).expect("dispatch")
}

/// Feed one key through the key table; unmapped keys are dropped like the event loop does.
pub fn press(session: &mut EditSession, code: KeyCode) -> Option<DispatchResult> {
    key(session, KeyEvent::plain(code))
}

pub fn key(session: &mut EditSession, key: KeyEvent) -> Option<DispatchResult> {
    let action = translate_key(&InputEvent::Key(key))?;
    Some(apply(session, action))
}

pub fn type_str(session: &mut EditSession, text: &str) {
    for c in text.chars() {
        let code = match c {
            '\n' => KeyCode::Enter,
            '\t' => KeyCode::Tab,
            c => KeyCode::Char(c),
        };
        press(session, code);
    }
}
