//! Line buffer: the ordered sequence of text lines that owns all document content.
//!
//! The buffer is a plain `Vec<String>`; every line is stored without its
//! delimiter. Columns are counted in `char`s (no display-width awareness), so a
//! column may equal the line length to address the slot after the last
//! character.
//!
//! Invariants:
//! * The buffer always holds at least one line (an empty document is `[""]`).
//! * Every mutator validates `(row, column)` and returns a `BufferError`
//!   instead of panicking; callers are expected never to hit these paths.
//! * No operation performs I/O.

use thiserror::Error;

/// Delimiter used to split loaded text into lines and to join them back.
pub const LINE_DELIMITER: char = '\n';

/// A position inside a buffer expressed as (row index, char column within that row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// Out-of-range conditions reported by buffer mutators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("row {row} out of range (line count {line_count})")]
    RowOutOfRange { row: usize, line_count: usize },
    #[error("column {col} out of range for row {row} (length {len})")]
    ColumnOutOfRange { row: usize, col: usize, len: usize },
    #[error("cannot remove the only remaining line")]
    LastLine,
}

/// Ordered, mutable sequence of text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Empty document: a single empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Split `text` on the line delimiter. A trailing delimiter yields a trailing
    /// empty line so `to_text` reproduces the input exactly.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split(LINE_DELIMITER).map(str::to_owned).collect(),
        }
    }

    /// Join all lines with the delimiter (no trailing delimiter is added).
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push(LINE_DELIMITER);
            }
            out.push_str(line);
        }
        out
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Length of `row` in chars; zero for rows past the end.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| l.chars().count())
    }

    /// Clamp a position so it satisfies the cursor invariant.
    pub fn clamp(&self, pos: Position) -> Position {
        let row = pos.row.min(self.lines.len() - 1);
        Position {
            row,
            col: pos.col.min(self.line_len(row)),
        }
    }

    /// Truncate `row` at `col` and insert the remainder as a new line right after it.
    pub fn split_line(&mut self, row: usize, col: usize) -> Result<(), BufferError> {
        let at = self.byte_index(row, col)?;
        let tail = self.lines[row].split_off(at);
        self.lines.insert(row + 1, tail);
        Ok(())
    }

    /// Append line `row + 1` onto `row` and remove it.
    pub fn join_line(&mut self, row: usize) -> Result<(), BufferError> {
        self.check_row(row)?;
        self.check_row(row + 1)?;
        let next = self.lines.remove(row + 1);
        self.lines[row].push_str(&next);
        Ok(())
    }

    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) -> Result<(), BufferError> {
        let at = self.byte_index(row, col)?;
        self.lines[row].insert(at, ch);
        Ok(())
    }

    /// Insert `text` (expected to contain no delimiter) at `(row, col)`.
    pub fn insert_str(&mut self, row: usize, col: usize, text: &str) -> Result<(), BufferError> {
        let at = self.byte_index(row, col)?;
        self.lines[row].insert_str(at, text);
        Ok(())
    }

    /// Remove and return the char at `(row, col)`; `col` must address an existing char.
    pub fn delete_char(&mut self, row: usize, col: usize) -> Result<char, BufferError> {
        let len = self.checked_line_len(row)?;
        if col >= len {
            return Err(BufferError::ColumnOutOfRange { row, col, len });
        }
        let at = self.byte_index(row, col)?;
        Ok(self.lines[row].remove(at))
    }

    /// Insert a new line at index `row` (`row == line_count()` appends).
    pub fn insert_line(&mut self, row: usize, text: impl Into<String>) -> Result<(), BufferError> {
        if row > self.lines.len() {
            return Err(BufferError::RowOutOfRange {
                row,
                line_count: self.lines.len(),
            });
        }
        self.lines.insert(row, text.into());
        Ok(())
    }

    /// Remove line `row` and return its text. Refuses to empty the document.
    pub fn remove_line(&mut self, row: usize) -> Result<String, BufferError> {
        self.check_row(row)?;
        if self.lines.len() == 1 {
            return Err(BufferError::LastLine);
        }
        Ok(self.lines.remove(row))
    }

    /// Replace the text of `row`, returning the previous content.
    pub fn replace_line(&mut self, row: usize, text: impl Into<String>) -> Result<String, BufferError> {
        self.check_row(row)?;
        Ok(std::mem::replace(&mut self.lines[row], text.into()))
    }

    fn check_row(&self, row: usize) -> Result<(), BufferError> {
        if row < self.lines.len() {
            Ok(())
        } else {
            Err(BufferError::RowOutOfRange {
                row,
                line_count: self.lines.len(),
            })
        }
    }

    fn checked_line_len(&self, row: usize) -> Result<usize, BufferError> {
        self.check_row(row)?;
        Ok(self.line_len(row))
    }

    // Char column -> byte offset, accepting `col == len` (end of line).
    fn byte_index(&self, row: usize, col: usize) -> Result<usize, BufferError> {
        self.check_row(row)?;
        let line = &self.lines[row];
        match line.char_indices().nth(col) {
            Some((byte, _)) => Ok(byte),
            None => {
                let len = line.chars().count();
                if col == len {
                    Ok(line.len())
                } else {
                    Err(BufferError::ColumnOutOfRange { row, col, len })
                }
            }
        }
    }
}

/// Slice `line` by char columns `[start, start + width)`, clamped to the line.
pub fn char_window(line: &str, start: usize, width: usize) -> &str {
    let mut indices = line.char_indices().map(|(b, _)| b).chain(std::iter::once(line.len()));
    let Some(begin) = indices.nth(start) else {
        return "";
    };
    let end = if width == 0 {
        begin
    } else {
        indices.nth(width - 1).unwrap_or(line.len())
    };
    &line[begin..end]
}
