// src/exec/process.rs

//! Supervision of one running build process.

use std::sync::Arc;

use tempfile::TempDir;
use tokio::process::Child;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use super::events::{BuildEvent, BuildOutcome, BuildState};
use super::output::{abort_forwarders, drain_forwarders, spawn_line_forwarder};

/// Log line emitted when a build finishes with exit code 0.
pub const SUCCESS_MARKER: &str = "Build succeeded.";
/// Log line emitted when the tool reports an error.
pub const FAILURE_MARKER: &str = "Build failed. Check the log.";
/// Log line emitted when the user stops the build.
pub const CANCELLED_MARKER: &str = "Build stopped by user.";

/// Channels and resources handed from the supervisor to the task that owns
/// the running process.
pub(crate) struct RunContext {
    pub events: mpsc::Sender<BuildEvent>,
    pub state: Arc<watch::Sender<BuildState>>,
    pub scratch: Option<TempDir>,
}

impl RunContext {
    async fn line(&self, text: impl Into<String>) {
        let _ = self.events.send(BuildEvent::LineReceived(text.into())).await;
    }
}

/// Publish a state change on both the watch channel and the event stream.
pub(crate) async fn publish_state(
    state: &watch::Sender<BuildState>,
    events: &mpsc::Sender<BuildEvent>,
    next: BuildState,
) {
    let prev = state.send_replace(next);
    debug!(from = %prev, to = %next, "build state changed");
    let _ = events.send(BuildEvent::StateChanged(next)).await;
}

/// Delete the scratch directory. Failures are logged and otherwise ignored.
pub(crate) fn release_scratch(scratch: Option<TempDir>) {
    let Some(dir) = scratch else {
        return;
    };
    let path = dir.path().to_path_buf();
    match dir.close() {
        Ok(()) => debug!(path = %path.display(), "removed scratch directory"),
        Err(e) => warn!(
            path = %path.display(),
            error = %e,
            "failed to remove scratch directory"
        ),
    }
}

/// Run `child` to completion (or until cancelled), forwarding its output.
///
/// Always ends by removing the scratch directory and publishing the
/// terminal state followed by `Idle`.
pub(crate) async fn supervise(
    mut child: Child,
    run: RunContext,
    mut cancel_rx: oneshot::Receiver<()>,
) -> BuildOutcome {
    let pid = child.id();

    let mut forwarders: Vec<_> = [
        child
            .stdout
            .take()
            .map(|out| spawn_line_forwarder(out, run.events.clone())),
        child
            .stderr
            .take()
            .map(|err| spawn_line_forwarder(err, run.events.clone())),
    ]
    .into_iter()
    .flatten()
    .collect();

    let exited = tokio::select! {
        status_res = child.wait() => Some(status_res),

        cancel = &mut cancel_rx => {
            match cancel {
                Ok(()) => info!(pid, "cancellation requested; killing build process"),
                Err(_) => debug!(pid, "supervisor dropped; killing build process"),
            }
            if let Err(e) = child.kill().await {
                warn!(pid, error = %e, "failed to kill build process");
            }
            abort_forwarders(&forwarders);
            None
        }
    };

    let outcome = match exited {
        None => BuildOutcome::Cancelled,
        Some(Err(e)) => {
            error!(pid, error = %e, "waiting for build process failed");
            abort_forwarders(&forwarders);
            BuildOutcome::Failed(-1)
        }
        Some(Ok(status)) => {
            let code = status.code().unwrap_or(-1);
            info!(pid, exit_code = code, success = status.success(), "build process exited");

            // The state is still `Running` while output drains, so a
            // cancel must still win here.
            tokio::select! {
                _ = drain_forwarders(&mut forwarders) => {
                    if status.success() {
                        BuildOutcome::Succeeded
                    } else {
                        BuildOutcome::Failed(code)
                    }
                }

                Ok(()) = &mut cancel_rx => {
                    info!(pid, "cancellation requested while draining output");
                    abort_forwarders(&forwarders);
                    BuildOutcome::Cancelled
                }
            }
        }
    };

    match outcome {
        BuildOutcome::Succeeded => {
            run.line("").await;
            run.line("Done. Exit code: 0").await;
            run.line(SUCCESS_MARKER).await;
        }
        BuildOutcome::Failed(code) => {
            run.line("").await;
            run.line(format!("Done. Exit code: {code}")).await;
            run.line(FAILURE_MARKER).await;
        }
        BuildOutcome::Cancelled => {
            run.line("").await;
            run.line(CANCELLED_MARKER).await;
        }
    }

    release_scratch(run.scratch);
    publish_state(&run.state, &run.events, outcome.state()).await;
    publish_state(&run.state, &run.events, BuildState::Idle).await;

    outcome
}
