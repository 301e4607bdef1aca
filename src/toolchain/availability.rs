// src/toolchain/availability.rs

//! Making sure PyInstaller is importable in the chosen interpreter.

use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{info, warn};

use crate::errors::{ForgeError, Result};

use super::interpreter::Interpreter;

const PROBE_SCRIPT: &str =
    "import PyInstaller, sys; print(PyInstaller.__version__); sys.exit(0)";

/// What to do when PyInstaller is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallPolicy {
    /// Fail straight away.
    Never,
    /// Install without asking.
    Always,
    /// Ask on the terminal (default answer: yes).
    #[default]
    Ask,
}

/// Check that PyInstaller can be imported, installing it via pip if the
/// policy allows.
pub async fn ensure_tool_available(interpreter: &Interpreter, policy: InstallPolicy) -> Result<()> {
    if let Some(version) = probe_version(interpreter).await {
        info!(%version, "PyInstaller available");
        return Ok(());
    }

    warn!(%interpreter, "PyInstaller is not installed for this interpreter");

    let install = match policy {
        InstallPolicy::Never => false,
        InstallPolicy::Always => true,
        InstallPolicy::Ask => confirm_install().await?,
    };
    if !install {
        return Err(ForgeError::ToolUnavailable(
            "PyInstaller is not installed and installation was declined".to_string(),
        ));
    }

    install_tool(interpreter).await
}

/// Run the import probe; `Some(version)` if it succeeded.
pub async fn probe_version(interpreter: &Interpreter) -> Option<String> {
    let output = Command::new(&interpreter.program)
        .args(&interpreter.args)
        .args(["-c", PROBE_SCRIPT])
        .stdin(Stdio::null())
        .output()
        .await
        .ok()?;

    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// The pip invocation used to install PyInstaller.
pub fn install_args() -> [&'static str; 6] {
    ["-m", "pip", "install", "--upgrade", "pip", "pyinstaller"]
}

async fn install_tool(interpreter: &Interpreter) -> Result<()> {
    info!(%interpreter, "installing PyInstaller with pip");

    let status = Command::new(&interpreter.program)
        .args(&interpreter.args)
        .args(install_args())
        .stdin(Stdio::null())
        .status()
        .await
        .with_context(|| format!("running pip for '{interpreter}'"))?;

    if status.success() {
        info!("PyInstaller installed");
        Ok(())
    } else {
        Err(ForgeError::ToolUnavailable(format!(
            "pip install failed with exit code {}",
            status.code().unwrap_or(-1)
        )))
    }
}

async fn confirm_install() -> Result<bool> {
    eprint!("PyInstaller is missing for the selected Python. Install it now? [Y/n] ");

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await
        .context("reading answer from stdin")?;

    Ok(parse_answer(&answer))
}

/// Interpret a yes/no answer; empty means yes.
pub fn parse_answer(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "" | "y" | "yes")
}
