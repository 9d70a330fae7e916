//! oxnano: a small nano-like terminal text editor.

mod runtime;

use anyhow::{Context, Result};
use clap::Parser;
use core_actions::io_ops::{file_save_fn, load_document};
use core_config::Config;
use core_model::{EditSession, Margins, SaveFn, TerminalSize};
use core_render::status::TITLE;
use core_terminal::{
    CrosstermBackend, CrosstermSurface, TerminalBackend, TerminalCapabilities, TerminalSurface,
};
use runtime::{EventLoop, ExitReason};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "oxnano.log";
const UNTITLED: &str = "untitled";

#[derive(Parser, Debug)]
#[command(name = "oxnano", version, about = "A small nano-like text editor")]
struct Args {
    /// File to edit. Created on first save if it does not exist. Without a path
    /// an empty untitled document is opened and saving is unavailable.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `oxnano.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    Quit,
    Fatal,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::Quit => "quit",
            ShutdownReason::Fatal => "fatal",
        }
    }
}

impl From<ExitReason> for ShutdownReason {
    fn from(reason: ExitReason) -> Self {
        match reason {
            ExitReason::Quit => ShutdownReason::Quit,
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

/// Document ready to be handed to a session.
struct OpenedDocument {
    label: String,
    text: String,
    save: Option<SaveFn>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global subscriber already installed; dropping the guard stops the writer.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn open_document(path: Option<&Path>) -> Result<OpenedDocument> {
    let Some(path) = path else {
        info!(target: "runtime.startup", "untitled_document");
        return Ok(OpenedDocument {
            label: UNTITLED.to_string(),
            text: String::new(),
            save: None,
        });
    };
    let loaded =
        load_document(path).with_context(|| format!("failed to open {}", path.display()))?;
    info!(
        target: "runtime.startup",
        path = %path.display(),
        existed = loaded.existed,
        bytes = loaded.text.len(),
        "document_opened"
    );
    Ok(OpenedDocument {
        label: path.display().to_string(),
        text: loaded.text,
        save: Some(file_save_fn(path.to_path_buf())),
    })
}

/// Build the session for `surface`'s current size and run the loop on it.
fn run_session<S: TerminalSurface + ?Sized>(
    config: &Config,
    document: OpenedDocument,
    surface: &mut S,
) -> Result<ExitReason> {
    let (rows, cols) = surface.size().context("failed to query terminal size")?;
    let (top, bottom) = config.margins_for(rows);
    let mut session = EditSession::new(
        document.label,
        &document.text,
        TerminalSize::new(rows, cols),
        Margins::new(top, bottom),
    )?
    .with_tab_width(config.tab_width());
    if let Some(save) = document.save {
        session = session.with_save_fn(save);
    }
    EventLoop::new(&mut session, surface, config.idle_delay()).run()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = core_config::load_from(args.config.clone())?;
    let document = open_document(args.path.as_deref())?;
    info!(
        target: "runtime.startup",
        label = document.label.as_str(),
        config_override = args.config.is_some(),
        saveable = document.save.is_some(),
        "bootstrap_complete"
    );

    let mut backend = CrosstermBackend::new();
    backend.set_title(TITLE)?;
    let outcome = {
        let _terminal_guard = backend.enter_guard()?;
        let mut surface = CrosstermSurface::stdout(TerminalCapabilities::detect());
        run_session(&config, document, &mut surface)
    };

    match outcome {
        Ok(reason) => {
            let reason = ShutdownReason::from(reason);
            log_shutdown_stage(reason, "terminal_restored");
            log_shutdown_stage(reason, "complete");
            Ok(())
        }
        Err(e) => {
            error!(target: "runtime", error = %e, "fatal_error");
            log_shutdown_stage(ShutdownReason::Fatal, "terminal_restored");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::{KeyCode, KeyEvent};
    use core_terminal::HeadlessSurface;

    #[test]
    fn cli_parses_path_and_config() {
        let args = Args::try_parse_from(["oxnano", "notes.txt", "--config", "alt.toml"]).unwrap();
        assert_eq!(args.path, Some(PathBuf::from("notes.txt")));
        assert_eq!(args.config, Some(PathBuf::from("alt.toml")));

        let args = Args::try_parse_from(["oxnano"]).unwrap();
        assert!(args.path.is_none());
    }

    #[test]
    fn untitled_document_cannot_save() {
        let doc = open_document(None).unwrap();
        assert_eq!(doc.label, UNTITLED);
        assert!(doc.text.is_empty());
        assert!(doc.save.is_none());
    }

    #[test]
    fn missing_file_opens_empty_and_saves_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");
        let doc = open_document(Some(&path)).unwrap();
        assert!(doc.text.is_empty());

        let mut surface = HeadlessSurface::new(10, 40);
        surface.push_key(KeyEvent::plain(KeyCode::Char('h')));
        surface.push_key(KeyEvent::plain(KeyCode::Char('i')));
        surface.push_key(KeyEvent::ctrl('o'));
        surface.push_key(KeyEvent::ctrl('c'));
        let reason = run_session(&Config::default(), doc, &mut surface).unwrap();
        assert_eq!(reason, ExitReason::Quit);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hi");
    }

    #[test]
    fn too_small_terminal_is_rejected_at_startup() {
        let doc = open_document(None).unwrap();
        let mut surface = HeadlessSurface::new(4, 40);
        assert!(run_session(&Config::default(), doc, &mut surface).is_err());
    }

    #[test]
    fn shutdown_reason_from_exit() {
        assert_eq!(ShutdownReason::from(ExitReason::Quit), ShutdownReason::Quit);
        assert_eq!(ShutdownReason::Fatal.to_string(), "fatal");
    }
}
