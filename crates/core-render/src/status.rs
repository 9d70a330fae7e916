//! Top and bottom bar composition.
//!
//! Top bar (row 0, reverse video across the full width):
//! `<title><gap><label>[ (<status>)]<gap>line: <n>/<total> pos: <col> `
//! The two gaps split the free width evenly; an odd leftover column is
//! appended after the position so the bar always spans the terminal.
//!
//! Bottom bar (last row): each control renders its key chord in reverse video
//! followed by a plain description and one space.

use core_text::char_window;

pub const TITLE: &str = "oxnano";

/// Help controls shown in the bottom bar, `(chord, description)`.
pub const CONTROLS: [(&str, &str); 4] = [
    ("^O", " Save"),
    ("^C", " Quit"),
    ("^K", " Cut Text"),
    ("^U", " Uncut Text"),
];

/// Inputs for the top bar.
pub struct TopBarContext<'a> {
    pub label: &'a str,
    pub status: &'a str,
    /// 0-based cursor row.
    pub row: usize,
    pub line_count: usize,
    /// 0-based cursor column.
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopBarSegment<'a> {
    Title(&'static str),
    /// Document label with the status text in parentheses when non-empty.
    Document { label: &'a str, status: &'a str },
    Line { line_1: usize, total: usize },
    Column(usize),
}

pub fn compose_top_bar<'a>(ctx: &TopBarContext<'a>) -> Vec<TopBarSegment<'a>> {
    vec![
        TopBarSegment::Title(TITLE),
        TopBarSegment::Document {
            label: ctx.label,
            status: ctx.status,
        },
        TopBarSegment::Line {
            line_1: ctx.row + 1,
            total: ctx.line_count.max(1),
        },
        TopBarSegment::Column(ctx.col),
    ]
}

fn segment_text(seg: &TopBarSegment<'_>) -> String {
    match seg {
        TopBarSegment::Title(t) => (*t).to_string(),
        TopBarSegment::Document { label, status } => {
            if status.is_empty() {
                (*label).to_string()
            } else {
                format!("{label} ({status})")
            }
        }
        TopBarSegment::Line { line_1, total } => format!("line: {line_1}/{total}"),
        TopBarSegment::Column(col) => format!(" pos: {col} "),
    }
}

/// Lay the segments out across `width` columns and clip to it.
pub fn format_top_bar(segments: &[TopBarSegment<'_>], width: usize) -> String {
    let parts: Vec<String> = segments.iter().map(segment_text).collect();
    let used: usize = parts.iter().map(|p| p.chars().count()).sum();
    let free = width.saturating_sub(used);
    let gap = " ".repeat(free / 2);
    let mut s = String::with_capacity(width);
    for (i, part) in parts.iter().enumerate() {
        // Gaps surround the document segment.
        if i == 1 || i == 2 {
            s.push_str(&gap);
        }
        s.push_str(part);
    }
    if free % 2 != 0 {
        s.push(' ');
    }
    s.chars().take(width).collect()
}

pub fn build_top_bar(ctx: &TopBarContext<'_>, width: usize) -> String {
    format_top_bar(&compose_top_bar(ctx), width)
}

/// One styled run of the bottom bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarSpan {
    pub text: &'static str,
    pub reverse: bool,
}

/// Bottom bar runs clipped to `width` columns.
pub fn bottom_bar_spans(width: usize) -> Vec<BarSpan> {
    let mut remaining = width;
    let mut spans = Vec::new();
    for (chord, desc) in CONTROLS {
        for (text, reverse) in [(chord, true), (desc, false), (" ", false)] {
            if remaining == 0 {
                return spans;
            }
            let shown = char_window(text, 0, remaining);
            remaining -= shown.chars().count();
            spans.push(BarSpan {
                text: shown,
                reverse,
            });
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(label: &'a str, status: &'a str) -> TopBarContext<'a> {
        TopBarContext {
            label,
            status,
            row: 2,
            line_count: 10,
            col: 7,
        }
    }

    #[test]
    fn segments_in_order() {
        let c = ctx("notes.txt", "MODIFIED");
        let segs = compose_top_bar(&c);
        assert_eq!(segs[0], TopBarSegment::Title("oxnano"));
        assert_eq!(
            segs[2],
            TopBarSegment::Line {
                line_1: 3,
                total: 10
            }
        );
        assert_eq!(segs[3], TopBarSegment::Column(7));
    }

    #[test]
    fn top_bar_spans_full_width() {
        let c = ctx("a.txt", "");
        for width in [40usize, 41, 80] {
            let bar = build_top_bar(&c, width);
            assert_eq!(bar.chars().count(), width, "width {width}");
            assert!(bar.starts_with("oxnano "));
            assert!(bar.contains("a.txt"));
            assert!(bar.contains("line: 3/10 pos: 7 "));
        }
    }

    #[test]
    fn status_shown_in_parentheses() {
        let bar = build_top_bar(&ctx("a.txt", "SAVED"), 80);
        assert!(bar.contains("a.txt (SAVED)"));
    }

    #[test]
    fn narrow_terminal_clips_without_gaps() {
        let bar = build_top_bar(&ctx("long_file_name.txt", "MODIFIED"), 12);
        assert_eq!(bar, "oxnanolong_f");
    }

    #[test]
    fn empty_document_counts_one_line() {
        let c = TopBarContext {
            label: "x",
            status: "",
            row: 0,
            line_count: 0,
            col: 0,
        };
        assert!(build_top_bar(&c, 60).contains("line: 1/1"));
    }

    fn plain(spans: &[BarSpan]) -> String {
        spans.iter().map(|s| s.text).collect()
    }

    #[test]
    fn bottom_bar_lists_controls() {
        assert_eq!(
            plain(&bottom_bar_spans(200)),
            "^O Save ^C Quit ^K Cut Text ^U Uncut Text "
        );
        assert_eq!(plain(&bottom_bar_spans(7)), "^O Save");
    }

    #[test]
    fn bottom_bar_chords_are_reversed() {
        let spans = bottom_bar_spans(9);
        assert_eq!(
            spans,
            vec![
                BarSpan { text: "^O", reverse: true },
                BarSpan { text: " Save", reverse: false },
                BarSpan { text: " ", reverse: false },
                BarSpan { text: "^", reverse: true },
            ]
        );
    }
}
