//! File IO helpers: the load collaborator used at startup and the save
//! collaborator installed into the session.
//!
//! Synchronous and whole-file. Document text is lines joined by `'\n'`; no
//! line ending translation happens here.

use core_model::SaveFn;
use std::io;
use std::path::{Path, PathBuf};

/// Text read from disk plus whether the file already existed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub text: String,
    pub existed: bool,
}

/// Read `path` into a document.
///
/// A missing file yields an empty document (saving creates it). Any other read
/// error is logged and returned.
pub fn load_document(path: &Path) -> io::Result<LoadedDocument> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            tracing::info!(target: "io", path = %path.display(), bytes = text.len(), "file_loaded");
            Ok(LoadedDocument {
                text,
                existed: true,
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(target: "io", path = %path.display(), "file_missing_new_document");
            Ok(LoadedDocument {
                text: String::new(),
                existed: false,
            })
        }
        Err(e) => {
            tracing::error!(target: "io", path = %path.display(), ?e, "file_open_error");
            Err(e)
        }
    }
}

/// Write `text` to `path`, returning whether the write succeeded.
pub fn save_document(path: &Path, text: &str) -> bool {
    match std::fs::write(path, text.as_bytes()) {
        Ok(()) => {
            tracing::info!(target: "io", path = %path.display(), bytes = text.len(), "file_written");
            true
        }
        Err(e) => {
            tracing::error!(target: "io", path = %path.display(), ?e, "file_write_error");
            false
        }
    }
}

/// Save callback writing the document to `path`.
pub fn file_save_fn(path: PathBuf) -> SaveFn {
    Box::new(move |text: &str| save_document(&path, text))
}
