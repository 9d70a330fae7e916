//! Motion sub-dispatch (cursor movement).
//!
//! Every step moves the cursor by at most one row or column and shifts the
//! viewport just enough to keep it visible:
//! * vertical steps move the vertical offset by at most one and recompute the
//!   horizontal offset outright for the clamped target column,
//! * left/right steps within a line move the horizontal offset by at most one,
//! * left at column 0 wraps to the end of the previous line, right at the end
//!   of a line wraps to the start of the next one,
//! * `LineStart` resets the horizontal offset, `LineEnd` recomputes it.
//!
//! Page motions are `Up`/`Down` repeated `drawable_height - 1` times.

use super::DispatchResult;
use crate::MotionKind;
use core_model::EditSession;
use core_text::Position;
use tracing::trace;

pub(crate) fn handle_motion(
    kind: MotionKind,
    count: u32,
    session: &mut EditSession,
) -> DispatchResult {
    let before = (session.cursor(), session.offsets());
    let page = session.viewport().text_rows().saturating_sub(1);
    let (step, repeat) = match kind {
        MotionKind::PageUp => (MotionKind::Up, page.saturating_mul(count as usize)),
        MotionKind::PageDown => (MotionKind::Down, page.saturating_mul(count as usize)),
        other => (other, count as usize),
    };
    for _ in 0..repeat {
        if !step_once(step, session) {
            break;
        }
    }
    let after = (session.cursor(), session.offsets());
    let moved = before != after;
    if moved {
        trace!(
            target: "actions.dispatch",
            motion = ?kind,
            count,
            row = before.0.row,
            col = before.0.col,
            to_row = after.0.row,
            to_col = after.0.col,
            "motion"
        );
    }
    DispatchResult::from_dirty(moved)
}

/// Apply one step. Returns false when the cursor could not move.
fn step_once(kind: MotionKind, session: &mut EditSession) -> bool {
    let cur = session.cursor();
    let buffer = session.buffer();
    let line_count = buffer.line_count();
    let line_len = buffer.line_len(cur.row);
    match kind {
        MotionKind::Up => {
            if cur.row == 0 {
                return false;
            }
            move_vertical(session, cur.row - 1, cur.col);
        }
        MotionKind::Down => {
            if cur.row + 1 >= line_count {
                return false;
            }
            move_vertical(session, cur.row + 1, cur.col);
        }
        MotionKind::Left => {
            if cur.col > 0 {
                let col = cur.col - 1;
                session.set_cursor(Position::new(cur.row, col));
                session.viewport_mut().reveal_column(col);
            } else if cur.row > 0 {
                let row = cur.row - 1;
                let col = session.buffer().line_len(row);
                session.set_cursor(Position::new(row, col));
                let viewport = session.viewport_mut();
                viewport.reveal_row(row);
                viewport.fit_column(col);
            } else {
                return false;
            }
        }
        MotionKind::Right => {
            if cur.col < line_len {
                let col = cur.col + 1;
                session.set_cursor(Position::new(cur.row, col));
                session.viewport_mut().reveal_column(col);
            } else if cur.row + 1 < line_count {
                let row = cur.row + 1;
                session.set_cursor(Position::new(row, 0));
                let viewport = session.viewport_mut();
                viewport.reveal_row(row);
                viewport.reset_horizontal();
            } else {
                return false;
            }
        }
        MotionKind::LineStart => {
            session.set_cursor(Position::new(cur.row, 0));
            session.viewport_mut().reset_horizontal();
        }
        MotionKind::LineEnd => {
            session.set_cursor(Position::new(cur.row, line_len));
            session.viewport_mut().fit_column(line_len);
        }
        // Page motions are expanded by the caller.
        MotionKind::PageUp | MotionKind::PageDown => return false,
    }
    true
}

fn move_vertical(session: &mut EditSession, row: usize, col: usize) {
    let col = col.min(session.buffer().line_len(row));
    session.set_cursor(Position::new(row, col));
    let viewport = session.viewport_mut();
    viewport.reveal_row(row);
    viewport.fit_column(col);
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::{Margins, TerminalSize};

    fn session(text: &str, rows: u16, cols: u16) -> EditSession {
        EditSession::new("t", text, TerminalSize::new(rows, cols), Margins::default()).unwrap()
    }

    fn numbered(n: usize) -> String {
        (0..n).map(|i| format!("l{i}")).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn left_at_origin_is_noop() {
        let mut s = session("abc\ndef", 10, 10);
        let r = handle_motion(MotionKind::Left, 1, &mut s);
        assert!(!r.dirty);
        assert_eq!(s.cursor(), Position::origin());
        assert_eq!(s.text(), "abc\ndef");
    }

    #[test]
    fn right_at_end_of_last_line_is_noop() {
        let mut s = session("abc\ndef", 10, 10);
        s.set_cursor(Position::new(1, 3));
        assert!(!handle_motion(MotionKind::Right, 1, &mut s).dirty);
        assert_eq!(s.cursor(), Position::new(1, 3));
    }

    #[test]
    fn horizontal_wraps_between_lines() {
        let mut s = session("abc\nde", 10, 10);
        s.set_cursor(Position::new(0, 3));
        handle_motion(MotionKind::Right, 1, &mut s);
        assert_eq!(s.cursor(), Position::new(1, 0));
        handle_motion(MotionKind::Left, 1, &mut s);
        assert_eq!(s.cursor(), Position::new(0, 3));
    }

    #[test]
    fn vertical_clamps_column() {
        let mut s = session("abcdef\nab\nabcd", 10, 20);
        s.set_cursor(Position::new(0, 5));
        handle_motion(MotionKind::Down, 1, &mut s);
        assert_eq!(s.cursor(), Position::new(1, 2));
        // Column is not remembered across short lines.
        handle_motion(MotionKind::Down, 1, &mut s);
        assert_eq!(s.cursor(), Position::new(2, 2));
    }

    #[test]
    fn down_past_band_scrolls_by_one() {
        // 10 rows, margins 2+2 -> 6 drawable rows.
        let mut s = session(&numbered(20), 10, 10);
        handle_motion(MotionKind::Down, 5, &mut s);
        assert_eq!(s.offsets().vertical, 0);
        handle_motion(MotionKind::Down, 1, &mut s);
        assert_eq!(s.cursor().row, 6);
        assert_eq!(s.offsets().vertical, 1);
        handle_motion(MotionKind::Down, 1, &mut s);
        assert_eq!(s.offsets().vertical, 2);
        handle_motion(MotionKind::Up, 5, &mut s);
        assert_eq!(s.cursor().row, 2);
        assert_eq!(s.offsets().vertical, 2);
        handle_motion(MotionKind::Up, 1, &mut s);
        assert_eq!(s.offsets().vertical, 1);
    }

    #[test]
    fn page_moves_drawable_height_minus_one() {
        let mut s = session(&numbered(40), 10, 10);
        handle_motion(MotionKind::PageDown, 1, &mut s);
        assert_eq!(s.cursor().row, 5);
        handle_motion(MotionKind::PageDown, 1, &mut s);
        assert_eq!(s.cursor().row, 10);
        assert_eq!(s.offsets().vertical, 5);
        handle_motion(MotionKind::PageUp, 1, &mut s);
        assert_eq!(s.cursor().row, 5);
        assert_eq!(s.offsets().vertical, 5);
    }

    #[test]
    fn page_down_stops_at_last_line() {
        let mut s = session(&numbered(3), 10, 10);
        handle_motion(MotionKind::PageDown, 3, &mut s);
        assert_eq!(s.cursor().row, 2);
    }

    #[test]
    fn one_row_band_cannot_page() {
        let mut s = session(&numbered(3), 5, 10);
        assert_eq!(s.viewport().text_rows(), 1);
        assert!(!handle_motion(MotionKind::PageDown, 1, &mut s).dirty);
        assert_eq!(s.cursor().row, 0);
    }

    #[test]
    fn end_and_home_recompute_horizontal_offset() {
        let mut s = session("0123456789abc\nxy", 10, 5);
        handle_motion(MotionKind::LineEnd, 1, &mut s);
        assert_eq!(s.cursor(), Position::new(0, 13));
        assert_eq!(s.offsets().horizontal, 9);
        handle_motion(MotionKind::LineStart, 1, &mut s);
        assert_eq!(s.cursor(), Position::new(0, 0));
        assert_eq!(s.offsets().horizontal, 0);
    }

    #[test]
    fn end_of_line_fitting_width_keeps_zero_offset() {
        let mut s = session("abcd", 10, 5);
        handle_motion(MotionKind::LineEnd, 1, &mut s);
        assert_eq!(s.offsets().horizontal, 0);
    }

    #[test]
    fn right_scrolls_one_column_at_edge() {
        let mut s = session("0123456789", 10, 5);
        handle_motion(MotionKind::Right, 4, &mut s);
        assert_eq!(s.offsets().horizontal, 0);
        handle_motion(MotionKind::Right, 1, &mut s);
        assert_eq!(s.offsets().horizontal, 1);
        handle_motion(MotionKind::Right, 2, &mut s);
        assert_eq!(s.offsets().horizontal, 3);
        // Back to the left edge of the window then one more step.
        handle_motion(MotionKind::Left, 4, &mut s);
        assert_eq!(s.cursor().col, 3);
        assert_eq!(s.offsets().horizontal, 3);
        handle_motion(MotionKind::Left, 1, &mut s);
        assert_eq!(s.offsets().horizontal, 2);
    }

    #[test]
    fn vertical_move_onto_short_line_resets_offset() {
        let mut s = session("0123456789\nab", 10, 5);
        handle_motion(MotionKind::LineEnd, 1, &mut s);
        assert_eq!(s.offsets().horizontal, 6);
        handle_motion(MotionKind::Down, 1, &mut s);
        assert_eq!(s.cursor(), Position::new(1, 2));
        assert_eq!(s.offsets().horizontal, 0);
    }

    #[test]
    fn vertical_move_onto_long_line_fits_column() {
        let mut s = session("0123456789\n0123456789", 10, 5);
        handle_motion(MotionKind::Right, 7, &mut s);
        assert_eq!(s.offsets().horizontal, 3);
        handle_motion(MotionKind::Down, 1, &mut s);
        assert_eq!(s.cursor(), Position::new(1, 7));
        assert_eq!(s.offsets().horizontal, 3);
    }
}
