// src/exec/supervisor.rs

//! Owner of the (single) running build process.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use anyhow::anyhow;
use tempfile::TempDir;
use tokio::process::Command;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::errors::{ForgeError, Result};

use super::events::{BuildEvent, BuildOutcome, BuildState};
use super::process::{publish_state, release_scratch, supervise, RunContext};

/// Everything needed to launch one build.
#[derive(Debug)]
pub struct BuildRequest {
    /// `argv[0]` is the program; the rest are passed verbatim.
    pub argv: Vec<String>,
    pub working_dir: PathBuf,
    /// Scratch directory owned by this attempt. Deleted when the build ends,
    /// whichever way it ends.
    pub scratch: Option<TempDir>,
}

/// Handle for the currently-running build.
///
/// - `cancel` asks the supervising task to kill the process.
/// - `handle` is the Tokio task that owns the child and yields its outcome.
struct ActiveBuild {
    cancel: Option<oneshot::Sender<()>>,
    handle: JoinHandle<BuildOutcome>,
}

/// Runs at most one external build process at a time.
///
/// Output and state changes are published as [`BuildEvent`]s on the channel
/// given to [`BuildSupervisor::new`]; the current state can also be polled
/// via [`BuildSupervisor::state`] or watched via
/// [`BuildSupervisor::subscribe_state`].
pub struct BuildSupervisor {
    events: mpsc::Sender<BuildEvent>,
    state: Arc<watch::Sender<BuildState>>,
    active: Option<ActiveBuild>,
}

impl BuildSupervisor {
    pub fn new(events: mpsc::Sender<BuildEvent>) -> Self {
        let (state, _) = watch::channel(BuildState::Idle);
        Self {
            events,
            state: Arc::new(state),
            active: None,
        }
    }

    /// Convenience: create a supervisor together with its event receiver.
    pub fn with_channel(capacity: usize) -> (Self, mpsc::Receiver<BuildEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    pub fn state(&self) -> BuildState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<BuildState> {
        self.state.subscribe()
    }

    /// Start a build.
    ///
    /// Rejected with [`ForgeError::AlreadyRunning`] while another build is
    /// starting or running; that build is left untouched. If the process
    /// cannot be spawned the state goes `Starting → Failed → Idle`, the
    /// scratch directory is removed and [`ForgeError::Spawn`] is returned.
    pub async fn start(&mut self, request: BuildRequest) -> Result<()> {
        if self.state().is_busy() {
            warn!(state = %self.state(), "build start rejected; a build is already active");
            return Err(ForgeError::AlreadyRunning);
        }

        // A previous build that already reached a terminal state is only
        // publishing its final `Idle`; let it finish first.
        if let Some(previous) = self.active.take() {
            if let Err(e) = previous.handle.await {
                warn!(error = %e, "previous build supervision task failed");
            }
        }

        let Some((program, args)) = request.argv.split_first() else {
            release_scratch(request.scratch);
            return Err(ForgeError::InvalidInput("empty command line".to_string()));
        };

        publish_state(&self.state, &self.events, BuildState::Starting).await;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(&request.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(source) => {
                error!(program = %program, error = %source, "failed to spawn build process");
                let _ = self
                    .events
                    .send(BuildEvent::LineReceived(format!(
                        "Failed to start '{program}': {source}"
                    )))
                    .await;
                release_scratch(request.scratch);
                publish_state(&self.state, &self.events, BuildState::Failed).await;
                publish_state(&self.state, &self.events, BuildState::Idle).await;
                return Err(ForgeError::Spawn {
                    program: program.clone(),
                    source,
                });
            }
        };

        info!(
            pid = child.id(),
            program = %program,
            working_dir = %request.working_dir.display(),
            "build process started"
        );

        publish_state(&self.state, &self.events, BuildState::Running).await;

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let run = RunContext {
            events: self.events.clone(),
            state: Arc::clone(&self.state),
            scratch: request.scratch,
        };
        let handle = tokio::spawn(supervise(child, run, cancel_rx));

        self.active = Some(ActiveBuild {
            cancel: Some(cancel_tx),
            handle,
        });
        Ok(())
    }

    /// Forcefully stop the running build.
    ///
    /// Returns `false` if there was nothing to cancel.
    pub fn cancel(&mut self) -> bool {
        if !self.state().is_busy() {
            debug!(state = %self.state(), "cancel requested but no build is running");
            return false;
        }

        let Some(cancel) = self.active.as_mut().and_then(|a| a.cancel.take()) else {
            debug!("cancel already requested for this build");
            return false;
        };

        if cancel.send(()).is_err() {
            debug!("build finished while cancelling");
            return false;
        }
        true
    }

    /// Wait for the current build to end and return its outcome.
    ///
    /// Cancel-safe: dropping the future leaves the build running.
    pub async fn wait(&mut self) -> Result<BuildOutcome> {
        let Some(active) = self.active.as_mut() else {
            return Err(ForgeError::InvalidInput(
                "no build has been started".to_string(),
            ));
        };

        let joined = (&mut active.handle).await;
        self.active = None;
        let outcome = joined.map_err(|e| anyhow!("build supervision task failed: {e}"))?;
        Ok(outcome)
    }
}
