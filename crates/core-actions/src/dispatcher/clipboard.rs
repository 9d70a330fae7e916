//! Line cut (`^K`) and paste (`^U`).

use super::DispatchResult;
use core_model::EditSession;
use core_state::StatusKind;
use core_text::Position;
use tracing::{debug, error};

pub(crate) fn handle_cut(session: &mut EditSession, consecutive: bool) -> DispatchResult {
    let row = session.cursor().row;
    let (buffer, clipboard) = session.buffer_and_clipboard_mut();
    let outcome = match clipboard.cut(buffer, row, consecutive) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(target: "actions.dispatch", ?e, row, "cut_failed");
            return DispatchResult::clean();
        }
    };
    let row = row.min(session.buffer().line_count() - 1);
    session.set_cursor(Position::new(row, 0));
    let viewport = session.viewport_mut();
    viewport.reset_horizontal();
    viewport.reveal_row(row);
    if outcome.changed() {
        session.set_status(StatusKind::Modified);
    }
    debug!(
        target: "actions.dispatch",
        row,
        consecutive,
        clipboard_lines = session.clipboard().lines().len(),
        "cut_line"
    );
    DispatchResult::dirty()
}

pub(crate) fn handle_paste(session: &mut EditSession) -> DispatchResult {
    let at = session.cursor();
    let (buffer, clipboard) = session.buffer_and_clipboard_mut();
    let outcome = match clipboard.paste(buffer, at) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(target: "actions.dispatch", ?e, row = at.row, col = at.col, "paste_failed");
            return DispatchResult::clean();
        }
    };
    if outcome.lines_inserted == 0 {
        return DispatchResult::clean();
    }
    session.set_cursor(outcome.cursor);
    let viewport = session.viewport_mut();
    viewport.reveal_row(outcome.cursor.row);
    viewport.reset_horizontal();
    session.set_status(StatusKind::Modified);
    debug!(
        target: "actions.dispatch",
        lines = outcome.lines_inserted,
        to_row = outcome.cursor.row,
        "paste"
    );
    DispatchResult::dirty()
}
