//! Terminal capability probing.
//!
//! Detection runs once at startup and only consults the environment; no probe
//! sequences are sent. The only flag today gates the delete-forward key: when
//! the terminal cannot delete a cell in place the editor ignores the key
//! rather than leave the screen out of sync with the document.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    pub supports_delete_char: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        Self::from_term(std::env::var("TERM").ok().as_deref())
    }

    /// Capabilities implied by a `TERM` value. Unset counts as capable
    /// (Windows consoles do not export `TERM`).
    pub fn from_term(term: Option<&str>) -> Self {
        let supports_delete_char = !matches!(term, Some("dumb") | Some(""));
        Self {
            supports_delete_char,
        }
    }

    pub fn with_delete_char(supports_delete_char: bool) -> Self {
        Self {
            supports_delete_char,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_terms_support_delete() {
        assert!(TerminalCapabilities::from_term(Some("xterm-256color")).supports_delete_char);
        assert!(TerminalCapabilities::from_term(None).supports_delete_char);
    }

    #[test]
    fn dumb_terminal_cannot_delete() {
        assert!(!TerminalCapabilities::from_term(Some("dumb")).supports_delete_char);
    }
}
