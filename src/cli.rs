// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::config::Profile;
use crate::toolchain::InstallPolicy;
use crate::types::{BuildMode, TargetPlatform};

/// Command-line arguments for `forgeexe`.
///
/// Every build option can come from a saved JSON profile (`--profile`);
/// flags given on the command line override the profile's values.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "forgeexe",
    version,
    about = "Build a standalone executable from a Python project with PyInstaller.",
    long_about = None
)]
pub struct CliArgs {
    /// Entry script to package (e.g. `main.py`).
    #[arg(value_name = "ENTRY")]
    pub entry: Option<String>,

    /// Load build options from a JSON profile.
    #[arg(long, value_name = "PATH")]
    pub profile: Option<String>,

    /// Write the resulting options to a JSON profile before building.
    #[arg(long, value_name = "PATH")]
    pub save_profile: Option<String>,

    /// Working directory for PyInstaller.
    ///
    /// Default: the entry script's folder.
    #[arg(long, value_name = "DIR")]
    pub project_dir: Option<String>,

    /// Output folder (`--distpath`); `--workpath` becomes `<parent>/build`.
    #[arg(long, value_name = "DIR")]
    pub dist_dir: Option<String>,

    /// Name of the produced executable.
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Icon for the produced executable.
    #[arg(long, value_name = "PATH")]
    pub icon: Option<String>,

    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<BuildMode>,

    /// Hide the console window (default: true).
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub windowed: Option<bool>,

    /// Replace the output folder without asking (default: true).
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub noconfirm: Option<bool>,

    /// Clean PyInstaller's cache before building.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub clean: Option<bool>,

    /// Compress with UPX from the `upx` folder.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub upx: Option<bool>,

    /// Product name for the Windows version resource.
    #[arg(long, value_name = "TEXT")]
    pub product: Option<String>,

    /// Company name for the Windows version resource.
    #[arg(long, value_name = "TEXT")]
    pub company: Option<String>,

    /// Version for the Windows version resource (`a.b.c.d`).
    #[arg(long, value_name = "VERSION")]
    pub file_version: Option<String>,

    /// File description for the Windows version resource.
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Module PyInstaller cannot detect (repeatable, comma-separated).
    #[arg(long = "hidden-import", value_name = "MODULE")]
    pub hidden_imports: Vec<String>,

    /// Package whose data, binaries and submodules are all collected.
    #[arg(long = "collect-all", value_name = "MODULE")]
    pub collect_all: Vec<String>,

    /// Extra folder with PyInstaller hooks.
    #[arg(long = "additional-hooks-dir", value_name = "DIR")]
    pub hooks_dirs: Vec<String>,

    /// File or folder to bundle, as `SOURCE<SEP>DEST` where SEP is `;` on
    /// Windows and `:` elsewhere. DEST defaults to `.`.
    #[arg(long = "add-data", value_name = "SOURCE:DEST")]
    pub add_data: Vec<String>,

    /// Raw arguments passed through to PyInstaller (whitespace-separated).
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub extra_args: Option<String>,

    /// Python interpreter to use instead of searching `PATH`.
    #[arg(long, value_name = "PATH")]
    pub python: Option<String>,

    /// Install PyInstaller without asking if it is missing.
    #[arg(long, conflicts_with = "no_install")]
    pub install_missing: bool,

    /// Never install PyInstaller; fail if it is missing.
    #[arg(long)]
    pub no_install: bool,

    /// Platform the executable is built for. Default: this machine.
    #[arg(long, value_enum, value_name = "PLATFORM")]
    pub target_platform: Option<TargetPlatform>,

    /// Print the command that would run, without running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FORGEEXE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl CliArgs {
    /// Overlay the flags that were given onto `profile`.
    pub fn apply_to(&self, profile: &mut Profile) {
        set_text(&mut profile.entry, &self.entry);
        set_text(&mut profile.project_dir, &self.project_dir);
        set_text(&mut profile.dist_dir, &self.dist_dir);
        set_text(&mut profile.name, &self.name);
        set_text(&mut profile.icon, &self.icon);
        set_text(&mut profile.product, &self.product);
        set_text(&mut profile.company, &self.company);
        set_text(&mut profile.version, &self.file_version);
        set_text(&mut profile.description, &self.description);
        set_text(&mut profile.extra_args, &self.extra_args);

        if let Some(mode) = self.mode {
            profile.mode = mode;
        }
        set_flag(&mut profile.gui, self.windowed);
        set_flag(&mut profile.noconfirm, self.noconfirm);
        set_flag(&mut profile.clean, self.clean);
        set_flag(&mut profile.upx, self.upx);

        set_list(&mut profile.hidden_imports, &self.hidden_imports);
        set_list(&mut profile.collect_all, &self.collect_all);
        set_list(&mut profile.hooks_dirs, &self.hooks_dirs);
        if !self.add_data.is_empty() {
            profile.add_data = self.add_data.clone();
        }
    }

    pub fn install_policy(&self) -> InstallPolicy {
        if self.install_missing {
            InstallPolicy::Always
        } else if self.no_install {
            InstallPolicy::Never
        } else {
            InstallPolicy::Ask
        }
    }

    pub fn platform(&self) -> TargetPlatform {
        self.target_platform.unwrap_or_else(TargetPlatform::host)
    }
}

fn set_text(slot: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        *slot = v.clone();
    }
}

fn set_flag(slot: &mut bool, value: Option<bool>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn set_list(slot: &mut String, values: &[String]) {
    if !values.is_empty() {
        *slot = values.join(",");
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
