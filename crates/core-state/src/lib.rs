//! Session-level editor state that outlives individual commands.
//!
//! * `clipboard`: the cut buffer shared by cut/paste.
//! * `SessionStatus`: the label shown in the top bar, set by every mutating
//!   operation and by save attempts.
//!
//! Presentation (where and how the label is drawn) lives in `core-render`.

pub mod clipboard;
pub use clipboard::{Clipboard, CutOutcome, PasteOutcome};

/// Status label category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Unmodified,
    Modified,
    Saved,
    SaveError,
}

impl StatusKind {
    /// Default text shown for the category (empty while unmodified).
    pub fn default_text(self) -> &'static str {
        match self {
            StatusKind::Unmodified => "",
            StatusKind::Modified => "MODIFIED",
            StatusKind::Saved => "SAVED",
            StatusKind::SaveError => "ERROR SAVING FILE",
        }
    }
}

/// Status category plus free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionStatus {
    kind: StatusKind,
    text: String,
}

impl SessionStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the category with its default text. Returns true if anything changed.
    pub fn set(&mut self, kind: StatusKind) -> bool {
        self.set_with_text(kind, kind.default_text())
    }

    /// Set the category with custom text. Returns true if anything changed.
    pub fn set_with_text(&mut self, kind: StatusKind, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.kind == kind && self.text == text {
            return false;
        }
        self.kind = kind;
        self.text = text;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unmodified_with_empty_text() {
        let st = SessionStatus::new();
        assert_eq!(st.kind(), StatusKind::Unmodified);
        assert_eq!(st.text(), "");
    }

    #[test]
    fn set_reports_change_only_once() {
        let mut st = SessionStatus::new();
        assert!(st.set(StatusKind::Modified));
        assert_eq!(st.text(), "MODIFIED");
        assert!(!st.set(StatusKind::Modified));
        assert!(st.set(StatusKind::Saved));
        assert_eq!(st.text(), "SAVED");
    }

    #[test]
    fn custom_text_is_kept() {
        let mut st = SessionStatus::new();
        st.set_with_text(StatusKind::SaveError, "disk full");
        assert_eq!(st.kind(), StatusKind::SaveError);
        assert_eq!(st.text(), "disk full");
    }
}
