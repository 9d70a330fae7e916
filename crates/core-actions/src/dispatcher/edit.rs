//! Text edit action handling (insert/newline/backspace/delete-forward).
//!
//! Status becomes `Modified` only when the buffer actually changed; a
//! backspace at the origin or a delete at the very end is a clean no-op.

use super::DispatchResult;
use crate::EditKind;
use core_model::EditSession;
use core_state::StatusKind;
use core_text::Position;
use tracing::{error, trace};

pub(crate) fn handle_edit(kind: EditKind, session: &mut EditSession) -> DispatchResult {
    let before = session.cursor();
    let changed = match kind {
        EditKind::InsertChar('\t') => {
            for _ in 0..session.tab_width() {
                insert_char(session, ' ');
            }
            session.tab_width() > 0
        }
        EditKind::InsertChar(c) => insert_char(session, c),
        EditKind::Newline => newline(session),
        EditKind::Backspace => backspace(session),
        EditKind::DeleteForward => delete_forward(session),
    };
    if !changed {
        return DispatchResult::clean();
    }
    session.set_status(StatusKind::Modified);
    let after = session.cursor();
    trace!(
        target: "actions.dispatch",
        op = ?kind,
        row = before.row,
        col = before.col,
        to_row = after.row,
        to_col = after.col,
        "edit"
    );
    DispatchResult::dirty()
}

fn insert_char(session: &mut EditSession, c: char) -> bool {
    let cur = session.cursor();
    if let Err(e) = session.buffer_mut().insert_char(cur.row, cur.col, c) {
        error!(target: "actions.dispatch", ?e, "insert_char_failed");
        return false;
    }
    let col = cur.col + 1;
    session.set_cursor(Position::new(cur.row, col));
    session.viewport_mut().reveal_column(col);
    true
}

fn newline(session: &mut EditSession) -> bool {
    let cur = session.cursor();
    if let Err(e) = session.buffer_mut().split_line(cur.row, cur.col) {
        error!(target: "actions.dispatch", ?e, "split_line_failed");
        return false;
    }
    let row = cur.row + 1;
    session.set_cursor(Position::new(row, 0));
    let viewport = session.viewport_mut();
    viewport.reveal_row(row);
    viewport.reset_horizontal();
    true
}

fn backspace(session: &mut EditSession) -> bool {
    let cur = session.cursor();
    if cur.col > 0 {
        let col = cur.col - 1;
        if let Err(e) = session.buffer_mut().delete_char(cur.row, col) {
            error!(target: "actions.dispatch", ?e, "backspace_failed");
            return false;
        }
        session.set_cursor(Position::new(cur.row, col));
        session.viewport_mut().reveal_column(col);
        true
    } else if cur.row > 0 {
        let row = cur.row - 1;
        let join_col = session.buffer().line_len(row);
        if let Err(e) = session.buffer_mut().join_line(row) {
            error!(target: "actions.dispatch", ?e, "join_line_failed");
            return false;
        }
        session.set_cursor(Position::new(row, join_col));
        let viewport = session.viewport_mut();
        viewport.reveal_row(row);
        viewport.fit_column(join_col);
        true
    } else {
        false
    }
}

fn delete_forward(session: &mut EditSession) -> bool {
    let cur = session.cursor();
    let buffer = session.buffer_mut();
    let result = if cur.col < buffer.line_len(cur.row) {
        buffer.delete_char(cur.row, cur.col).map(|_| ())
    } else if cur.row + 1 < buffer.line_count() {
        buffer.join_line(cur.row)
    } else {
        return false;
    };
    if let Err(e) = result {
        error!(target: "actions.dispatch", ?e, "delete_forward_failed");
        return false;
    }
    true
}
