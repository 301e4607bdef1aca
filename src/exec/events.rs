// src/exec/events.rs

use std::fmt;

use crate::errors::{ForgeError, Result};

/// Lifecycle of the supervised build process.
///
/// `Idle → Starting → Running → {Succeeded, Failed, Cancelled} → Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    Starting,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl BuildState {
    /// A process is being started or is running; new starts are refused.
    pub fn is_busy(self) -> bool {
        matches!(self, BuildState::Starting | BuildState::Running)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BuildState::Succeeded | BuildState::Failed | BuildState::Cancelled
        )
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BuildState::Idle => "idle",
            BuildState::Starting => "starting",
            BuildState::Running => "running",
            BuildState::Succeeded => "succeeded",
            BuildState::Failed => "failed",
            BuildState::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// How a build attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Succeeded,
    /// Non-zero exit; `-1` when the process died from a signal.
    Failed(i32),
    Cancelled,
}

impl BuildOutcome {
    pub fn state(self) -> BuildState {
        match self {
            BuildOutcome::Succeeded => BuildState::Succeeded,
            BuildOutcome::Failed(_) => BuildState::Failed,
            BuildOutcome::Cancelled => BuildState::Cancelled,
        }
    }

    /// `Ok` only for a successful build.
    pub fn into_result(self) -> Result<()> {
        match self {
            BuildOutcome::Succeeded => Ok(()),
            BuildOutcome::Failed(code) => Err(ForgeError::BuildFailed(code)),
            BuildOutcome::Cancelled => Err(ForgeError::Cancelled),
        }
    }
}

/// Events published by the supervisor to whoever renders the build log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// One line of combined stdout/stderr (without the line terminator),
    /// or a summary line written by the supervisor itself.
    LineReceived(String),
    StateChanged(BuildState),
}
