// src/config/profile.rs

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::model::{split_list, BuildConfig, DataMapping, VersionMetadata};
use crate::errors::{ForgeError, Result};
use crate::types::{BuildMode, TargetPlatform};

/// A saved build profile, stored as a flat JSON object:
///
/// ```json
/// {
///   "project_dir": "/home/me/proj",
///   "entry": "/home/me/proj/main.py",
///   "dist_dir": "/home/me/proj/dist",
///   "name": "MyApp",
///   "mode": "onefile",
///   "gui": true,
///   "hidden_imports": "requests, yaml",
///   "add_data": ["assets:assets"],
///   "version": "1.2.0.0"
/// }
/// ```
///
/// Every key is optional. List-like fields keep the comma-separated text
/// form users type in, and `add_data` items keep PyInstaller's
/// `source<SEP>dest` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub project_dir: String,
    pub entry: String,
    pub dist_dir: String,
    pub name: String,
    pub icon: String,
    pub mode: BuildMode,
    /// `--windowed`.
    pub gui: bool,
    pub noconfirm: bool,
    pub clean: bool,
    pub product: String,
    pub company: String,
    pub version: String,
    pub description: String,
    pub hidden_imports: String,
    pub collect_all: String,
    pub hooks_dirs: String,
    pub add_data: Vec<String>,
    pub upx: bool,
    pub gen_spec: bool,
    pub extra_args: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            project_dir: String::new(),
            entry: String::new(),
            dist_dir: String::new(),
            name: String::new(),
            icon: String::new(),
            mode: BuildMode::SingleFile,
            gui: true,
            noconfirm: true,
            clean: false,
            product: String::new(),
            company: String::new(),
            version: VersionMetadata::DEFAULT_VERSION.to_string(),
            description: String::new(),
            hidden_imports: String::new(),
            collect_all: String::new(),
            hooks_dirs: String::new(),
            add_data: Vec::new(),
            upx: false,
            gen_spec: false,
            extra_args: String::new(),
        }
    }
}

impl Profile {
    /// Turn the loosely-typed profile into a [`BuildConfig`].
    ///
    /// `platform` decides which separator `add_data` items are split on.
    pub fn into_build_config(self, platform: TargetPlatform) -> Result<BuildConfig> {
        let entry = self.entry.trim();
        if entry.is_empty() {
            return Err(ForgeError::InvalidInput(
                "no entry script given (set `entry` in the profile or pass ENTRY)".to_string(),
            ));
        }

        let separator = platform.data_separator();
        let add_data = self
            .add_data
            .iter()
            .filter_map(|item| DataMapping::parse(item, separator))
            .collect();

        let metadata = VersionMetadata {
            product: self.product.trim().to_string(),
            company: self.company.trim().to_string(),
            version: non_empty(&self.version),
            description: self.description.trim().to_string(),
        };

        Ok(BuildConfig {
            entry_path: PathBuf::from(entry),
            project_dir: non_empty(&self.project_dir).map(PathBuf::from),
            dist_dir: non_empty(&self.dist_dir).map(PathBuf::from),
            app_name: non_empty(&self.name),
            icon_path: non_empty(&self.icon).map(PathBuf::from),
            mode: self.mode,
            windowed: self.gui,
            no_confirm: self.noconfirm,
            clean_cache: self.clean,
            metadata: metadata.is_requested().then_some(metadata),
            hidden_imports: split_list(&self.hidden_imports),
            collect_all: split_list(&self.collect_all),
            hooks_dirs: split_list(&self.hooks_dirs),
            add_data,
            use_upx: self.upx,
            extra_args: self.extra_args.split_whitespace().map(str::to_string).collect(),
            gen_spec: self.gen_spec,
        })
    }

    /// Snapshot a [`BuildConfig`] into the on-disk representation.
    pub fn from_build_config(cfg: &BuildConfig, platform: TargetPlatform) -> Self {
        let separator = platform.data_separator();
        let metadata = cfg.metadata.clone().unwrap_or_default();

        Self {
            project_dir: path_text(cfg.project_dir.as_ref()),
            entry: cfg.entry_path.display().to_string(),
            dist_dir: path_text(cfg.dist_dir.as_ref()),
            name: cfg.app_name.clone().unwrap_or_default(),
            icon: path_text(cfg.icon_path.as_ref()),
            mode: cfg.mode,
            gui: cfg.windowed,
            noconfirm: cfg.no_confirm,
            clean: cfg.clean_cache,
            product: metadata.product.clone(),
            company: metadata.company.clone(),
            version: metadata.effective_version().to_string(),
            description: metadata.description,
            hidden_imports: cfg.hidden_imports.join(", "),
            collect_all: cfg.collect_all.join(", "),
            hooks_dirs: cfg.hooks_dirs.join(", "),
            add_data: cfg.add_data.iter().map(|m| m.to_arg(separator)).collect(),
            upx: cfg.use_upx,
            gen_spec: cfg.gen_spec,
            extra_args: cfg.extra_args.join(" "),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

fn path_text(p: Option<&PathBuf>) -> String {
    p.map(|p| p.display().to_string()).unwrap_or_default()
}
