//! Cut buffer accumulated by line cuts and replayed by paste.
//!
//! Accumulation rule: a cut that directly follows another cut appends to the
//! clipboard; any other cut clears it first. Lines keep their original
//! top-to-bottom order because a consecutive cut always removes the line that
//! slid up into the cursor row.

use core_text::{Buffer, BufferError, Position};
use tracing::trace;

/// Result of cutting one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutOutcome {
    /// Text of the cut line (appended to the clipboard when non-empty or when the
    /// line itself was removed).
    pub text: String,
    /// True when the line was removed from the buffer; false when the only
    /// remaining line was emptied in place.
    pub line_removed: bool,
}

impl CutOutcome {
    /// Whether the buffer content changed.
    pub fn changed(&self) -> bool {
        self.line_removed || !self.text.is_empty()
    }
}

/// Result of replaying the clipboard into a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteOutcome {
    pub lines_inserted: usize,
    /// Start of the line following the last pasted line.
    pub cursor: Position,
}

#[derive(Debug, Default, Clone)]
pub struct Clipboard {
    lines: Vec<String>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Cut line `row` out of `buffer`.
    ///
    /// With more than one line the row is removed and its text appended. When it
    /// is the only line, its text is appended (if any) and the line is emptied so
    /// the document never becomes empty.
    pub fn cut(
        &mut self,
        buffer: &mut Buffer,
        row: usize,
        consecutive: bool,
    ) -> Result<CutOutcome, BufferError> {
        if row >= buffer.line_count() {
            return Err(BufferError::RowOutOfRange {
                row,
                line_count: buffer.line_count(),
            });
        }
        if !consecutive {
            self.lines.clear();
        }
        let outcome = if buffer.line_count() > 1 {
            let text = buffer.remove_line(row)?;
            self.lines.push(text.clone());
            CutOutcome {
                text,
                line_removed: true,
            }
        } else {
            let text = buffer.replace_line(row, String::new())?;
            if !text.is_empty() {
                self.lines.push(text.clone());
            }
            CutOutcome {
                text,
                line_removed: false,
            }
        };
        trace!(
            target: "state.clipboard",
            row,
            consecutive,
            line_removed = outcome.line_removed,
            clipboard_lines = self.lines.len(),
            "cut"
        );
        Ok(outcome)
    }

    /// Insert every clipboard line at `at`, each followed by a line split.
    pub fn paste(&self, buffer: &mut Buffer, at: Position) -> Result<PasteOutcome, BufferError> {
        let mut cursor = at;
        for line in &self.lines {
            buffer.insert_str(cursor.row, cursor.col, line)?;
            cursor.col += line.chars().count();
            buffer.split_line(cursor.row, cursor.col)?;
            cursor = Position::new(cursor.row + 1, 0);
        }
        trace!(
            target: "state.clipboard",
            row = at.row,
            lines = self.lines.len(),
            "paste"
        );
        Ok(PasteOutcome {
            lines_inserted: self.lines.len(),
            cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn consecutive_cuts_preserve_order() {
        let mut buf = Buffer::from_text("l0\nl1\nl2\nl3");
        let mut clip = Clipboard::new();
        clip.cut(&mut buf, 0, false).unwrap();
        clip.cut(&mut buf, 0, true).unwrap();
        clip.cut(&mut buf, 0, true).unwrap();
        assert_eq!(clip.lines(), ["l0", "l1", "l2"]);
        assert_eq!(buf.lines(), ["l3"]);
    }

    #[test]
    fn fresh_cut_replaces_clipboard() {
        let mut buf = Buffer::from_text("a\nb\nc");
        let mut clip = Clipboard::new();
        clip.cut(&mut buf, 0, false).unwrap();
        clip.cut(&mut buf, 1, false).unwrap();
        assert_eq!(clip.lines(), ["c"]);
        assert_eq!(buf.lines(), ["b"]);
    }

    #[test]
    fn cutting_only_line_empties_it() {
        let mut buf = Buffer::from_text("solo");
        let mut clip = Clipboard::new();
        let out = clip.cut(&mut buf, 0, false).unwrap();
        assert!(out.changed());
        assert!(!out.line_removed);
        assert_eq!(buf.lines(), [""]);
        assert_eq!(clip.lines(), ["solo"]);

        let again = clip.cut(&mut buf, 0, true).unwrap();
        assert!(!again.changed());
        assert_eq!(buf.line_count(), 1);
        assert_eq!(clip.lines(), ["solo"]);
    }

    #[test]
    fn cut_then_paste_restores_line() {
        let mut buf = Buffer::from_text("one\ntwo\nthree");
        let mut clip = Clipboard::new();
        clip.cut(&mut buf, 1, false).unwrap();
        assert_eq!(buf.lines(), ["one", "three"]);
        let out = clip.paste(&mut buf, Position::new(1, 0)).unwrap();
        assert_eq!(out.lines_inserted, 1);
        assert_eq!(out.cursor, Position::new(2, 0));
        assert_eq!(buf.lines(), ["one", "two", "three"]);
    }

    #[test]
    fn paste_multiple_lines_in_order() {
        let mut buf = Buffer::from_text("a\nb\nc\nd");
        let mut clip = Clipboard::new();
        for _ in 0..3 {
            let consecutive = !clip.is_empty();
            clip.cut(&mut buf, 0, consecutive).unwrap();
        }
        assert_eq!(buf.lines(), ["d"]);
        let out = clip.paste(&mut buf, Position::new(0, 0)).unwrap();
        assert_eq!(out.lines_inserted, 3);
        assert_eq!(out.cursor, Position::new(3, 0));
        assert_eq!(buf.lines(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn paste_mid_line_splits_around_content() {
        let mut buf = Buffer::from_text("xy");
        let mut clip = Clipboard::new();
        let mut src = Buffer::from_text("p\nq");
        clip.cut(&mut src, 0, false).unwrap();
        let out = clip.paste(&mut buf, Position::new(0, 1)).unwrap();
        assert_eq!(buf.lines(), ["xp", "y"]);
        assert_eq!(out.cursor, Position::new(1, 0));
    }

    #[test]
    fn empty_clipboard_paste_is_noop() {
        let mut buf = Buffer::from_text("keep");
        let clip = Clipboard::new();
        let out = clip.paste(&mut buf, Position::new(0, 2)).unwrap();
        assert_eq!(out.lines_inserted, 0);
        assert_eq!(out.cursor, Position::new(0, 2));
        assert_eq!(buf.lines(), ["keep"]);
    }

    #[test]
    fn cut_rejects_invalid_row_without_touching_clipboard() {
        let mut buf = Buffer::from_text("a");
        let mut clip = Clipboard::new();
        clip.cut(&mut buf, 0, false).unwrap();
        assert!(clip.cut(&mut buf, 3, false).is_err());
        assert_eq!(clip.lines(), ["a"]);
    }
}
