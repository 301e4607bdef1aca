// src/config/validate.rs

use std::path::Path;

use crate::config::model::BuildConfig;
use crate::errors::{ForgeError, Result};
use crate::fs::FileSystem;

/// Checks that must pass before any command line is produced.
///
/// - the entry script exists and is a regular file
/// - the entry script is not this program itself
pub fn validate_build_config(
    cfg: &BuildConfig,
    fs: &dyn FileSystem,
    self_path: Option<&Path>,
) -> Result<()> {
    ensure_entry_exists(cfg, fs)?;
    ensure_not_self(cfg, fs, self_path)?;
    Ok(())
}

fn ensure_entry_exists(cfg: &BuildConfig, fs: &dyn FileSystem) -> Result<()> {
    if cfg.entry_path.as_os_str().is_empty() {
        return Err(ForgeError::InvalidInput(
            "entry script path is empty".to_string(),
        ));
    }
    if !fs.exists(&cfg.entry_path) {
        return Err(ForgeError::InvalidInput(format!(
            "entry script '{}' does not exist",
            cfg.entry_path.display()
        )));
    }
    if !fs.is_file(&cfg.entry_path) {
        return Err(ForgeError::InvalidInput(format!(
            "entry script '{}' is not a file",
            cfg.entry_path.display()
        )));
    }
    Ok(())
}

fn ensure_not_self(
    cfg: &BuildConfig,
    fs: &dyn FileSystem,
    self_path: Option<&Path>,
) -> Result<()> {
    let Some(self_path) = self_path else {
        return Ok(());
    };

    if fs.same_file(&cfg.entry_path, self_path) {
        return Err(ForgeError::InvalidInput(format!(
            "entry script '{}' is this builder itself; choose another project",
            cfg.entry_path.display()
        )));
    }
    Ok(())
}
