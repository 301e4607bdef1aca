// src/exec/sink.rs

//! Default consumer of [`BuildEvent`]s: writes the build log to a writer
//! (stdout in the CLI) and traces state changes.

use std::io::Write;

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::events::{BuildEvent, BuildState};

/// Consume events until the channel closes, writing every log line to `out`
/// terminated by `\n`. Returns the writer.
pub async fn run_log_sink<W: Write>(
    mut events: mpsc::Receiver<BuildEvent>,
    mut out: W,
) -> std::io::Result<W> {
    while let Some(event) = events.recv().await {
        match event {
            BuildEvent::LineReceived(line) => {
                writeln!(out, "{line}")?;
                out.flush()?;
            }
            BuildEvent::StateChanged(state) if state.is_terminal() => {
                info!(state = %state, "build finished");
            }
            BuildEvent::StateChanged(BuildState::Running) => {
                info!("build running");
            }
            BuildEvent::StateChanged(state) => {
                debug!(state = %state, "build state");
            }
        }
    }
    Ok(out)
}
