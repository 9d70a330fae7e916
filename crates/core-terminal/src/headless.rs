use crate::TerminalSurface;
use anyhow::Result;
use core_events::{InputEvent, KeyEvent};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    reverse: bool,
}

const BLANK: Cell = Cell {
    ch: ' ',
    reverse: false,
};

/// In-memory surface: a cell grid plus a queue of scripted input.
///
/// Writes clip at the right edge. A scripted `Resize(cols, rows)` event also
/// resizes the grid (blanking it), the way a real terminal would before the
/// editor sees the event. An empty input queue polls as idle.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    rows: u16,
    cols: u16,
    cells: Vec<Vec<Cell>>,
    cursor: (u16, u16),
    reverse: bool,
    delete_supported: bool,
    input: VecDeque<InputEvent>,
    polls: usize,
    flushes: usize,
}

impl HeadlessSurface {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            cells: blank_grid(rows, cols),
            cursor: (0, 0),
            reverse: false,
            delete_supported: true,
            input: VecDeque::new(),
            polls: 0,
            flushes: 0,
        }
    }

    pub fn with_delete_char(mut self, supported: bool) -> Self {
        self.delete_supported = supported;
        self
    }

    pub fn push_input(&mut self, ev: InputEvent) {
        self.input.push_back(ev);
    }

    pub fn push_key(&mut self, key: KeyEvent) {
        self.push_input(InputEvent::Key(key));
    }

    /// Full text of a screen row (trailing blanks kept).
    pub fn row_text(&self, row: u16) -> String {
        self.cells
            .get(row as usize)
            .map(|r| r.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    /// Row text with trailing blanks removed.
    pub fn row_trimmed(&self, row: u16) -> String {
        self.row_text(row).trim_end().to_string()
    }

    pub fn is_reverse(&self, row: u16, col: u16) -> bool {
        self.cells
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .is_some_and(|c| c.reverse)
    }

    /// Current `(row, col)` of the output cursor.
    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    pub fn polls(&self) -> usize {
        self.polls
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }

    fn resize(&mut self, rows: u16, cols: u16) {
        self.rows = rows;
        self.cols = cols;
        self.cells = blank_grid(rows, cols);
        self.cursor = (0, 0);
    }

    fn row_mut(&mut self) -> Option<&mut Vec<Cell>> {
        self.cells.get_mut(self.cursor.0 as usize)
    }
}

fn blank_grid(rows: u16, cols: u16) -> Vec<Vec<Cell>> {
    vec![vec![BLANK; cols as usize]; rows as usize]
}

impl TerminalSurface for HeadlessSurface {
    fn size(&self) -> Result<(u16, u16)> {
        Ok((self.rows, self.cols))
    }

    fn move_to(&mut self, row: u16, col: u16) -> Result<()> {
        self.cursor = (row, col);
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        let reverse = self.reverse;
        let mut col = self.cursor.1 as usize;
        if let Some(row) = self.row_mut() {
            for ch in text.chars() {
                if let Some(cell) = row.get_mut(col) {
                    *cell = Cell { ch, reverse };
                }
                col += 1;
            }
        }
        self.cursor.1 = u16::try_from(col).unwrap_or(u16::MAX);
        Ok(())
    }

    fn clear_to_eol(&mut self) -> Result<()> {
        let col = self.cursor.1 as usize;
        if let Some(row) = self.row_mut() {
            for cell in row.iter_mut().skip(col) {
                *cell = BLANK;
            }
        }
        Ok(())
    }

    fn clear_all(&mut self) -> Result<()> {
        self.cells = blank_grid(self.rows, self.cols);
        Ok(())
    }

    fn set_reverse(&mut self, on: bool) -> Result<()> {
        self.reverse = on;
        Ok(())
    }

    fn delete_char(&mut self) -> Result<bool> {
        if !self.delete_supported {
            return Ok(false);
        }
        let col = self.cursor.1 as usize;
        if let Some(row) = self.row_mut()
            && col < row.len()
        {
            row.remove(col);
            row.push(BLANK);
        }
        Ok(true)
    }

    fn poll_event(&mut self, _timeout: Duration) -> Result<Option<InputEvent>> {
        self.polls += 1;
        let ev = self.input.pop_front();
        if let Some(InputEvent::Resize(cols, rows)) = ev {
            self.resize(rows, cols);
        }
        Ok(ev)
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
