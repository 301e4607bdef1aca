// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs the PyInstaller command with `tokio::process::Command` and reports
//! back through [`BuildEvent`]s.
//!
//! - [`supervisor`] owns the single active build and its state machine.
//! - [`process`] is the task that waits on the child, handles cancellation
//!   and cleans up the scratch directory.
//! - [`output`] turns the child's stdout/stderr into log lines.
//! - [`sink`] is the default event consumer used by the CLI.

pub mod events;
pub mod output;
pub mod process;
pub mod sink;
pub mod supervisor;

pub use events::{BuildEvent, BuildOutcome, BuildState};
pub use process::{CANCELLED_MARKER, FAILURE_MARKER, SUCCESS_MARKER};
pub use sink::run_log_sink;
pub use supervisor::{BuildRequest, BuildSupervisor};
