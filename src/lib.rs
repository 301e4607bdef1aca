// src/lib.rs

pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod toolchain;
pub mod types;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::command::{build_command, CommandContext};
use crate::config::{load_profile, save_profile, Profile};
use crate::errors::Result;
use crate::exec::{run_log_sink, BuildRequest, BuildSupervisor};
use crate::fs::{FileSystem, RealFileSystem};
use crate::toolchain::{ensure_tool_available, locate_interpreter};

/// Prefix of the per-build scratch directory.
pub const SCRATCH_PREFIX: &str = "forgeexe_tmp_";

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - profile loading and CLI overrides
/// - interpreter discovery and the PyInstaller check
/// - command construction
/// - the build supervisor and its log sink
/// - Ctrl-C handling (cancels the build)
pub async fn run(args: CliArgs) -> Result<()> {
    let fs = RealFileSystem;
    let platform = args.platform();

    let profile = resolve_profile(&fs, &args)?;
    let cfg = profile.into_build_config(platform)?;
    if let Some(ref path) = args.save_profile {
        save_profile(&fs, path, &Profile::from_build_config(&cfg, platform))?;
        info!(path = %path, "profile saved");
    }

    let self_path = std::env::current_exe().ok();

    // Python runs on this machine, so the host decides how to find it.
    let interpreter = locate_interpreter(args.python.as_deref())?;
    if !args.dry_run {
        ensure_tool_available(&interpreter, args.install_policy()).await?;
    }

    // Owned by this build attempt; the supervisor removes it when the
    // build ends (or it is dropped on an early return).
    let scratch = new_scratch_dir()?;
    let launcher = interpreter.launcher();
    let ctx = CommandContext {
        launcher: &launcher,
        platform,
        self_path: self_path.as_deref(),
        fs: &fs,
        scratch_dir: scratch.path(),
    };
    let command = build_command(&cfg, &ctx)?;
    let working_dir = cfg.working_dir();

    if args.dry_run {
        print_dry_run(&working_dir, &command.display());
        debug!("dry-run complete (no execution)");
        return Ok(());
    }

    info!(program = command.program(), "starting build");
    println!("Working directory: {}", working_dir.display());
    println!("Command:\n{}", command.display());

    let (mut supervisor, events_rx) = BuildSupervisor::with_channel(256);
    let sink = tokio::spawn(run_log_sink(events_rx, std::io::stdout()));

    supervisor
        .start(BuildRequest {
            argv: command.argv,
            working_dir,
            scratch: Some(scratch),
        })
        .await?;

    let outcome = tokio::select! {
        outcome = supervisor.wait() => outcome?,
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => {
                    info!("Ctrl-C received; stopping build");
                    supervisor.cancel();
                }
                Err(e) => warn!(error = %e, "cannot listen for Ctrl-C; the build cannot be interrupted"),
            }
            supervisor.wait().await?
        }
    };

    // Closing the event channel lets the sink finish writing.
    drop(supervisor);
    match sink.await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => warn!(error = %e, "writing the build log failed"),
        Err(e) => debug!(error = %e, "log sink task ended abnormally"),
    }

    outcome.into_result()
}

/// Start from the `--profile` file (or defaults) and apply CLI overrides.
pub fn resolve_profile(fs: &dyn FileSystem, args: &CliArgs) -> Result<Profile> {
    let mut profile = match args.profile {
        Some(ref path) => {
            let profile = load_profile(fs, Path::new(path))?;
            info!(path = %path, "profile loaded");
            profile
        }
        None => Profile::default(),
    };
    args.apply_to(&mut profile);
    Ok(profile)
}

fn new_scratch_dir() -> Result<tempfile::TempDir> {
    let dir = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir()?;
    debug!(path = %dir.path().display(), "created scratch directory");
    Ok(dir)
}

fn print_dry_run(working_dir: &Path, command: &str) {
    println!("forgeexe dry-run");
    println!("  working directory: {}", working_dir.display());
    println!("  command: {command}");
}
