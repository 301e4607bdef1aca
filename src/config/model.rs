// src/config/model.rs

use std::path::{Path, PathBuf};

use crate::types::BuildMode;

/// Everything needed to assemble one PyInstaller invocation.
///
/// Built fresh for each build request (from CLI flags and/or a profile) and
/// dropped once the command line has been produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// The script to package. Passed as the final positional argument.
    pub entry_path: PathBuf,

    /// Working directory of the PyInstaller process.
    ///
    /// If `None`, the entry file's parent directory is used.
    pub project_dir: Option<PathBuf>,

    /// `--distpath`. When set, `--workpath` is derived from it as well.
    pub dist_dir: Option<PathBuf>,

    /// `-n`.
    pub app_name: Option<String>,

    /// `--icon`.
    pub icon_path: Option<PathBuf>,

    pub mode: BuildMode,

    /// Suppress the console window (`--windowed`).
    pub windowed: bool,

    /// `--noconfirm`: overwrite the output directory without asking.
    pub no_confirm: bool,

    /// `--clean`: drop PyInstaller's cache before building.
    pub clean_cache: bool,

    /// Windows version resource fields.
    pub metadata: Option<VersionMetadata>,

    pub hidden_imports: Vec<String>,
    pub collect_all: Vec<String>,
    pub hooks_dirs: Vec<String>,

    /// `--add-data` mappings, in the order given.
    pub add_data: Vec<DataMapping>,

    /// `--upx-dir=upx`.
    pub use_upx: bool,

    /// Raw PyInstaller arguments appended just before the entry path.
    pub extra_args: Vec<String>,

    /// Persisted in profiles; has no effect on the command line.
    pub gen_spec: bool,
}

impl BuildConfig {
    /// A config with the given entry and every option off.
    pub fn new(entry_path: impl Into<PathBuf>) -> Self {
        Self {
            entry_path: entry_path.into(),
            project_dir: None,
            dist_dir: None,
            app_name: None,
            icon_path: None,
            mode: BuildMode::default(),
            windowed: false,
            no_confirm: false,
            clean_cache: false,
            metadata: None,
            hidden_imports: Vec::new(),
            collect_all: Vec::new(),
            hooks_dirs: Vec::new(),
            add_data: Vec::new(),
            use_upx: false,
            extra_args: Vec::new(),
            gen_spec: false,
        }
    }

    /// Directory the build process runs in.
    ///
    /// - Explicit `project_dir` if non-empty.
    /// - Otherwise the entry file's parent.
    /// - A bare filename like `app.py` (parent = "") falls back to `.`.
    pub fn working_dir(&self) -> PathBuf {
        if let Some(dir) = self.project_dir.as_ref().filter(|d| !is_empty_path(d)) {
            return dir.clone();
        }
        match self.entry_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// `--workpath` value: a `build` folder next to the dist folder.
    pub fn build_dir(&self) -> Option<PathBuf> {
        let dist = self.dist_dir.as_ref().filter(|d| !is_empty_path(d))?;
        let base = dist.parent().unwrap_or(dist.as_path());
        Some(base.join("build"))
    }
}

/// Fields of the Windows `VSVersionInfo` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionMetadata {
    pub product: String,
    pub company: String,
    /// Free-form version string, normalized to `a.b.c.d` when rendered.
    pub version: Option<String>,
    pub description: String,
}

impl VersionMetadata {
    pub const DEFAULT_VERSION: &'static str = "1.0.0.0";

    /// True if at least one field would end up in the resource.
    pub fn is_requested(&self) -> bool {
        !self.product.trim().is_empty()
            || !self.company.trim().is_empty()
            || !self.description.trim().is_empty()
            || self
                .version
                .as_deref()
                .is_some_and(|v| !v.trim().is_empty())
    }

    /// The version string to embed, falling back to `1.0.0.0`.
    pub fn effective_version(&self) -> &str {
        match self.version.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => Self::DEFAULT_VERSION,
        }
    }
}

/// One `--add-data` entry: a file or folder copied into the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMapping {
    pub source: String,
    /// Destination relative to the bundle root.
    pub dest: String,
}

impl DataMapping {
    pub fn new(source: impl Into<String>, dest: impl Into<String>) -> Self {
        let dest = dest.into();
        let dest = if dest.trim().is_empty() {
            ".".to_string()
        } else {
            dest
        };
        Self {
            source: source.into(),
            dest,
        }
    }

    /// Parse `source<SEP>dest`, splitting on the *last* separator so that
    /// Windows drive letters (`C:\...`) survive when `SEP` is `:`.
    /// Without a separator the destination is `.`.
    pub fn parse(raw: &str, separator: char) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.rsplit_once(separator) {
            Some((source, dest)) if !source.is_empty() => Some(Self::new(source, dest)),
            _ => Some(Self::new(raw, ".")),
        }
    }

    /// Render as PyInstaller expects it for the given separator.
    pub fn to_arg(&self, separator: char) -> String {
        format!("{}{}{}", self.source, separator, self.dest)
    }
}

/// Split comma-separated user input into trimmed, non-empty, unique tokens,
/// keeping first-seen order.
pub fn split_list(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !out.iter().any(|seen| seen == token) {
            out.push(token.to_string());
        }
    }
    out
}

fn is_empty_path(p: &Path) -> bool {
    p.as_os_str().is_empty()
}
