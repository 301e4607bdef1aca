// src/command/mod.rs

//! PyInstaller command-line construction.
//!
//! - [`build_command`] maps a [`BuildConfig`] onto the argument vector.
//! - [`version_file`] renders the Windows version resource that
//!   `--version-file` points at.
//! - [`quote`] formats the vector for the log.

pub mod quote;
pub mod version_file;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{validate_build_config, BuildConfig};
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::{BuildMode, TargetPlatform};

pub use quote::{display_command, quote_token};
pub use version_file::{format_version, normalize_version, render_version_info};

/// Python module name passed to `-m`.
pub const PACKAGER_MODULE: &str = "PyInstaller";

/// Result of [`build_command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    /// Full argument vector; `argv[0]` is the program to execute.
    pub argv: Vec<String>,
    /// Version resource written into the scratch directory, if any.
    pub version_file: Option<PathBuf>,
}

impl BuildCommand {
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    pub fn display(&self) -> String {
        display_command(&self.argv)
    }
}

/// Environment the command is built in.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    /// Interpreter invocation, e.g. `["python3"]` or `["py", "-3"]`.
    pub launcher: &'a [String],
    pub platform: TargetPlatform,
    /// Path of the running program, for the self-packaging guard.
    pub self_path: Option<&'a Path>,
    pub fs: &'a dyn FileSystem,
    /// Directory owned by the caller for this build attempt; the version
    /// file is written here.
    pub scratch_dir: &'a Path,
}

/// Build the PyInstaller argument vector for `cfg`.
///
/// The token order is fixed:
///
/// 1. launcher, `-m PyInstaller`
/// 2. `--noconfirm`, `--clean`, `--onefile`, `--windowed`
/// 3. `-n`, `--icon`, `--distpath` + `--workpath`
/// 4. `--add-data`, `--hidden-import`, `--collect-all`,
///    `--additional-hooks-dir` (one flag per item)
/// 5. `--upx-dir=upx`, `--version-file` (Windows only)
/// 6. extra arguments, then the entry script last.
///
/// Fails with `InvalidInput` (and writes nothing) if the entry script is
/// missing or is this program itself.
pub fn build_command(cfg: &BuildConfig, ctx: &CommandContext<'_>) -> Result<BuildCommand> {
    validate_build_config(cfg, ctx.fs, ctx.self_path)?;

    let mut argv: Vec<String> = ctx.launcher.to_vec();
    argv.push("-m".to_string());
    argv.push(PACKAGER_MODULE.to_string());

    if cfg.no_confirm {
        argv.push("--noconfirm".to_string());
    }
    if cfg.clean_cache {
        argv.push("--clean".to_string());
    }
    if cfg.mode == BuildMode::SingleFile {
        argv.push("--onefile".to_string());
    }
    if cfg.windowed {
        argv.push("--windowed".to_string());
    }

    let app_name = cfg
        .app_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    if let Some(name) = app_name {
        push_flag(&mut argv, "-n", name);
    }

    if let Some(icon) = cfg.icon_path.as_ref().filter(|p| !p.as_os_str().is_empty()) {
        push_flag(&mut argv, "--icon", &icon.display().to_string());
    }

    if let (Some(dist), Some(build)) = (cfg.dist_dir.as_ref(), cfg.build_dir()) {
        push_flag(&mut argv, "--distpath", &dist.display().to_string());
        push_flag(&mut argv, "--workpath", &build.display().to_string());
    }

    let separator = ctx.platform.data_separator();
    for mapping in &cfg.add_data {
        push_flag(&mut argv, "--add-data", &mapping.to_arg(separator));
    }

    for module in &cfg.hidden_imports {
        push_flag(&mut argv, "--hidden-import", module);
    }
    for module in &cfg.collect_all {
        push_flag(&mut argv, "--collect-all", module);
    }
    for dir in &cfg.hooks_dirs {
        push_flag(&mut argv, "--additional-hooks-dir", dir);
    }

    if cfg.use_upx {
        argv.push("--upx-dir=upx".to_string());
    }

    let mut version_file = None;
    if ctx.platform.embeds_version_resource() {
        if let Some(metadata) = cfg.metadata.as_ref().filter(|m| m.is_requested()) {
            let product = if metadata.product.trim().is_empty() {
                app_name.unwrap_or_default()
            } else {
                metadata.product.trim()
            };
            let path =
                version_file::write_version_file(ctx.fs, ctx.scratch_dir, product, metadata)?;
            debug!(path = %path.display(), "wrote version resource");
            push_flag(&mut argv, "--version-file", &path.display().to_string());
            version_file = Some(path);
        }
    }

    argv.extend(
        cfg.extra_args
            .iter()
            .flat_map(|arg| arg.split_whitespace())
            .map(str::to_string),
    );

    argv.push(cfg.entry_path.display().to_string());

    Ok(BuildCommand { argv, version_file })
}

fn push_flag(argv: &mut Vec<String>, flag: &str, value: &str) {
    argv.push(flag.to_string());
    argv.push(value.to_string());
}
