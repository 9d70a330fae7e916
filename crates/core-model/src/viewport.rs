//! Logical <-> screen coordinate transform and scroll-policy helpers.
//!
//! Everything here is plain integer math: no terminal handle, no mutable state
//! beyond the offsets the caller owns. Screen coordinates are terminal cell
//! units (`u16`, origin top-left); logical coordinates are `(row, char column)`
//! into the document.
//!
//! Screen layout (rows):
//! ```text
//! 0 .. top                      top bar (status / title)
//! top .. rows - bottom          drawable band, one document line per row
//! rows - bottom .. rows         bottom bar (command help)
//! ```
//!
//! Horizontal scrolling applies to the cursor's line only; other lines are
//! always drawn from column 0. When `horizontal > 0` the cursor line carries a
//! continuation marker at screen column 0.

use core_text::Position;

/// Marker drawn at the start of a horizontally scrolled cursor line.
pub const CONTINUATION_MARKER: char = '$';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub rows: u16,
    pub cols: u16,
}

impl TerminalSize {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

/// Heights of the reserved top and bottom bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub top: u16,
    pub bottom: u16,
}

impl Margins {
    pub const fn new(top: u16, bottom: u16) -> Self {
        Self { top, bottom }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

/// Document rows / cursor-line columns scrolled past the top / left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOffsets {
    pub vertical: usize,
    pub horizontal: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPosition {
    pub row: u16,
    pub col: u16,
}

impl ScreenPosition {
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

/// Rows available for document text (may be zero for a degenerate terminal).
pub fn drawable_height(size: TerminalSize, margins: Margins) -> usize {
    (size.rows as usize).saturating_sub(margins.top as usize + margins.bottom as usize)
}

/// Map a logical cursor to its screen cell, clamped into the drawable band.
pub fn logical_to_screen(
    cursor: Position,
    offsets: ScrollOffsets,
    margins: Margins,
    size: TerminalSize,
) -> ScreenPosition {
    let top = margins.top as usize;
    let last_row = (size.rows as usize)
        .saturating_sub(margins.bottom as usize + 1)
        .max(top);
    let row = (top + cursor.row.saturating_sub(offsets.vertical)).clamp(top, last_row);
    let last_col = (size.cols as usize).saturating_sub(1);
    let col = cursor.col.saturating_sub(offsets.horizontal).min(last_col);
    ScreenPosition::new(to_cell(row), to_cell(col))
}

/// Map a screen cell back to a logical position.
///
/// Rows inside the top bar resolve to the first drawable row, so before any
/// scrolling the top of the screen corresponds to logical row 0.
pub fn screen_to_logical(
    screen: ScreenPosition,
    offsets: ScrollOffsets,
    margins: Margins,
) -> Position {
    let band_row = screen.row.saturating_sub(margins.top) as usize;
    Position::new(
        band_row + offsets.vertical,
        screen.col as usize + offsets.horizontal,
    )
}

/// Smallest change to `first` that keeps `index` inside `[first, first + extent)`.
///
/// Used for both axes: a single navigation step past an edge shifts the
/// offset by exactly one. A zero extent leaves the offset untouched.
pub fn reveal(index: usize, first: usize, extent: usize) -> usize {
    if extent == 0 {
        first
    } else if index < first {
        index
    } else if index >= first + extent {
        index + 1 - extent
    } else {
        first
    }
}

/// Vertical offset keeping document `row` inside a band `height` rows tall.
pub fn reveal_row(row: usize, vertical: usize, height: usize) -> usize {
    reveal(row, vertical, height)
}

/// Horizontal offset keeping cursor `col` inside a terminal `width` columns wide.
pub fn reveal_column(col: usize, horizontal: usize, width: usize) -> usize {
    reveal(col, horizontal, width)
}

/// Horizontal offset recomputed from scratch for a cursor at `col`: zero when the
/// column fits, otherwise just enough to put the cursor in the last column.
pub fn fit_column(col: usize, width: usize) -> usize {
    (col + 1).saturating_sub(width)
}

fn to_cell(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

/// Geometry + offsets for the single document view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub size: TerminalSize,
    pub margins: Margins,
    pub offsets: ScrollOffsets,
}

impl Viewport {
    pub fn new(size: TerminalSize, margins: Margins) -> Self {
        Self {
            size,
            margins,
            offsets: ScrollOffsets::default(),
        }
    }

    /// Number of document rows visible at once.
    pub fn text_rows(&self) -> usize {
        drawable_height(self.size, self.margins)
    }

    pub fn width(&self) -> usize {
        self.size.cols as usize
    }

    /// True when the terminal cannot show a single document cell.
    pub fn is_degenerate(&self) -> bool {
        self.text_rows() == 0 || self.size.cols == 0
    }

    /// Screen row of the first drawable line.
    pub fn top_row(&self) -> u16 {
        self.margins.top
    }

    /// Screen row of the last drawable line.
    pub fn bottom_row(&self) -> u16 {
        self.size
            .rows
            .saturating_sub(self.margins.bottom + 1)
            .max(self.margins.top)
    }

    pub fn screen_cursor(&self, cursor: Position) -> ScreenPosition {
        logical_to_screen(cursor, self.offsets, self.margins, self.size)
    }

    /// Document rows currently on screen: `[vertical, vertical + text_rows)`.
    pub fn visible_rows(&self) -> std::ops::Range<usize> {
        self.offsets.vertical..self.offsets.vertical + self.text_rows()
    }

    /// True when `cursor` maps inside the drawable band without clamping.
    pub fn contains(&self, cursor: Position) -> bool {
        self.visible_rows().contains(&cursor.row)
            && cursor.col >= self.offsets.horizontal
            && cursor.col < self.offsets.horizontal + self.width()
    }

    /// Minimal vertical shift to show `row`. Returns true if the offset changed.
    pub fn reveal_row(&mut self, row: usize) -> bool {
        let next = reveal_row(row, self.offsets.vertical, self.text_rows());
        std::mem::replace(&mut self.offsets.vertical, next) != next
    }

    /// Minimal horizontal shift to show `col`. Returns true if the offset changed.
    pub fn reveal_column(&mut self, col: usize) -> bool {
        let next = reveal_column(col, self.offsets.horizontal, self.width());
        std::mem::replace(&mut self.offsets.horizontal, next) != next
    }

    /// Recompute the horizontal offset outright for `col`. Returns true if it changed.
    pub fn fit_column(&mut self, col: usize) -> bool {
        let next = fit_column(col, self.width());
        std::mem::replace(&mut self.offsets.horizontal, next) != next
    }

    /// Reset the horizontal offset to zero. Returns true if it changed.
    pub fn reset_horizontal(&mut self) -> bool {
        std::mem::take(&mut self.offsets.horizontal) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: Margins = Margins::new(2, 2);

    fn size(rows: u16, cols: u16) -> TerminalSize {
        TerminalSize::new(rows, cols)
    }

    #[test]
    fn drawable_height_excludes_both_bars() {
        assert_eq!(drawable_height(size(24, 80), M), 20);
        assert_eq!(drawable_height(size(4, 80), M), 0);
        assert_eq!(drawable_height(size(3, 80), M), 0);
    }

    #[test]
    fn logical_to_screen_applies_offsets_and_margin() {
        let offsets = ScrollOffsets {
            vertical: 5,
            horizontal: 3,
        };
        let s = logical_to_screen(Position::new(7, 10), offsets, M, size(24, 80));
        assert_eq!(s, ScreenPosition::new(4, 7));
    }

    #[test]
    fn logical_to_screen_clamps_into_band() {
        let offsets = ScrollOffsets::default();
        // Far below the band -> last drawable row (24 - 2 - 1).
        let s = logical_to_screen(Position::new(100, 200), offsets, M, size(24, 80));
        assert_eq!(s, ScreenPosition::new(21, 79));
        // Above the band (row < vertical) -> first drawable row.
        let offsets = ScrollOffsets {
            vertical: 10,
            horizontal: 0,
        };
        let s = logical_to_screen(Position::new(3, 0), offsets, M, size(24, 80));
        assert_eq!(s, ScreenPosition::new(2, 0));
    }

    #[test]
    fn screen_to_logical_inverts_transform() {
        let offsets = ScrollOffsets {
            vertical: 4,
            horizontal: 2,
        };
        let cursor = Position::new(9, 6);
        let s = logical_to_screen(cursor, offsets, M, size(24, 80));
        assert_eq!(screen_to_logical(s, offsets, M), cursor);
    }

    #[test]
    fn screen_rows_in_top_bar_map_to_first_line() {
        let offsets = ScrollOffsets::default();
        assert_eq!(
            screen_to_logical(ScreenPosition::new(0, 0), offsets, M),
            Position::new(0, 0)
        );
        assert_eq!(
            screen_to_logical(ScreenPosition::new(1, 4), offsets, M),
            Position::new(0, 4)
        );
    }

    #[test]
    fn reveal_shifts_by_one_at_edges() {
        // Band of 5 starting at 0: moving to row 5 scrolls by exactly one.
        assert_eq!(reveal_row(5, 0, 5), 1);
        assert_eq!(reveal_row(4, 0, 5), 0);
        // Moving above the band scrolls up by one.
        assert_eq!(reveal_row(2, 3, 5), 2);
        assert_eq!(reveal_column(80, 0, 80), 1);
        assert_eq!(reveal_column(3, 4, 80), 3);
        assert_eq!(reveal(9, 2, 0), 2, "zero extent is a no-op");
    }

    #[test]
    fn fit_column_matches_end_policy() {
        assert_eq!(fit_column(3, 80), 0);
        assert_eq!(fit_column(79, 80), 0);
        assert_eq!(fit_column(80, 80), 1);
        assert_eq!(fit_column(7, 5), 3);
    }

    #[test]
    fn viewport_contains_tracks_offsets() {
        let mut vp = Viewport::new(size(10, 5), M);
        assert_eq!(vp.text_rows(), 6);
        assert!(vp.contains(Position::new(5, 4)));
        assert!(!vp.contains(Position::new(6, 0)));
        assert!(vp.reveal_row(6));
        assert_eq!(vp.offsets.vertical, 1);
        assert!(!vp.reveal_row(6));
        assert!(vp.fit_column(7));
        assert_eq!(vp.offsets.horizontal, 3);
        assert!(vp.contains(Position::new(6, 7)));
        assert!(vp.reset_horizontal());
        assert!(!vp.reset_horizontal());
    }

    #[test]
    fn degenerate_viewport_detected() {
        assert!(Viewport::new(size(4, 80), M).is_degenerate());
        assert!(Viewport::new(size(24, 0), M).is_degenerate());
        assert!(!Viewport::new(size(5, 1), M).is_degenerate());
    }

    #[test]
    fn band_edges() {
        let vp = Viewport::new(size(24, 80), M);
        assert_eq!(vp.top_row(), 2);
        assert_eq!(vp.bottom_row(), 21);
        assert_eq!(vp.visible_rows(), 0..20);
    }
}
