//! Full-frame redraw of an `EditSession` onto a `TerminalSurface`.
//!
//! Every frame is drawn from scratch: clear, top bar, visible document rows,
//! bottom bar, then the hardware cursor is parked on the logical cursor's
//! screen cell. The event loop only calls this when the session reports
//! `needs_redraw`, so there is no partial-repaint path.
//!
//! Row rules:
//! * Only the cursor's row honours the horizontal offset; every other row is
//!   drawn from column 0 and clipped to the terminal width.
//! * A scrolled cursor row shows the continuation marker in column 0.
//! * Nothing is ever written past the last column, so the terminal never wraps
//!   or scrolls on its own.

pub mod status;

use anyhow::Result;
use core_model::{CONTINUATION_MARKER, EditSession};
use core_terminal::TerminalSurface;
use core_text::char_window;
use status::{TopBarContext, bottom_bar_spans, build_top_bar};
use tracing::trace;

/// Counters for one drawn frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub text_rows: usize,
}

pub fn render_frame<S: TerminalSurface + ?Sized>(
    session: &EditSession,
    surface: &mut S,
) -> Result<FrameStats> {
    let viewport = session.viewport();
    let width = viewport.width();
    surface.clear_all()?;

    // A zero-height margin has no row for its bar.
    if viewport.margins.top > 0 {
        draw_top_bar(session, surface, width)?;
    }
    let text_rows = draw_text(session, surface, width)?;
    if viewport.margins.bottom > 0 {
        draw_bottom_bar(surface, viewport.size.rows, width)?;
    }

    let cursor = session.screen_cursor();
    surface.move_to(cursor.row, cursor.col)?;
    surface.flush()?;
    trace!(
        target: "render",
        text_rows,
        vertical = viewport.offsets.vertical,
        horizontal = viewport.offsets.horizontal,
        "frame"
    );
    Ok(FrameStats { text_rows })
}

fn draw_top_bar<S: TerminalSurface + ?Sized>(
    session: &EditSession,
    surface: &mut S,
    width: usize,
) -> Result<()> {
    let cursor = session.cursor();
    let ctx = TopBarContext {
        label: session.label(),
        status: session.status().text(),
        row: cursor.row,
        line_count: session.buffer().line_count(),
        col: cursor.col,
    };
    surface.move_to(0, 0)?;
    surface.set_reverse(true)?;
    surface.write_str(&build_top_bar(&ctx, width))?;
    surface.set_reverse(false)
}

fn draw_text<S: TerminalSurface + ?Sized>(
    session: &EditSession,
    surface: &mut S,
    width: usize,
) -> Result<usize> {
    let viewport = session.viewport();
    let buffer = session.buffer();
    let cursor_row = session.cursor().row;
    let horizontal = viewport.offsets.horizontal;
    let mut screen_row = viewport.top_row();
    let mut drawn = 0;
    for row in viewport.visible_rows() {
        let Some(line) = buffer.line(row) else {
            break;
        };
        surface.move_to(screen_row, 0)?;
        if row == cursor_row {
            surface.write_str(char_window(line, horizontal, width))?;
            if horizontal > 0 {
                surface.move_to(screen_row, 0)?;
                let mut marker = [0u8; 4];
                surface.write_str(CONTINUATION_MARKER.encode_utf8(&mut marker))?;
            }
        } else {
            surface.write_str(char_window(line, 0, width))?;
        }
        screen_row += 1;
        drawn += 1;
    }
    Ok(drawn)
}

fn draw_bottom_bar<S: TerminalSurface + ?Sized>(
    surface: &mut S,
    rows: u16,
    width: usize,
) -> Result<()> {
    surface.move_to(rows.saturating_sub(1), 0)?;
    for span in bottom_bar_spans(width) {
        surface.set_reverse(span.reverse)?;
        surface.write_str(span.text)?;
    }
    surface.set_reverse(false)
}
