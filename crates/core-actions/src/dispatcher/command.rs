//! Session commands: save (`^O`), resize, quit (`^C`).

use super::DispatchResult;
use core_model::{EditSession, SessionError, TerminalSize};
use core_state::StatusKind;
use tracing::{debug, info, warn};

/// Hand the document to the installed save callback and report the verdict in
/// the status label. Without a callback this is a no-op.
pub(crate) fn handle_save(session: &mut EditSession) -> DispatchResult {
    match session.invoke_save() {
        None => {
            debug!(target: "actions.dispatch", "save_without_callback");
            DispatchResult::clean()
        }
        Some(true) => {
            info!(
                target: "actions.dispatch",
                label = session.label(),
                lines = session.buffer().line_count(),
                "save_ok"
            );
            session.set_status(StatusKind::Saved);
            DispatchResult::dirty()
        }
        Some(false) => {
            warn!(target: "actions.dispatch", label = session.label(), "save_failed");
            session.set_status(StatusKind::SaveError);
            DispatchResult::dirty()
        }
    }
}

pub(crate) fn handle_resize(
    rows: u16,
    cols: u16,
    session: &mut EditSession,
) -> Result<DispatchResult, SessionError> {
    session.resize(TerminalSize::new(rows, cols))?;
    Ok(DispatchResult::dirty())
}

pub(crate) fn handle_quit(session: &mut EditSession) -> DispatchResult {
    info!(
        target: "actions.dispatch",
        label = session.label(),
        status = session.status().kind().default_text(),
        "quit"
    );
    session.stop();
    DispatchResult::quit()
}
