// src/config/loader.rs

use std::path::Path;

use crate::config::profile::Profile;
use crate::errors::{ForgeError, Result};
use crate::fs::FileSystem;

/// Load a JSON build profile.
///
/// Missing keys take their documented defaults (see [`Profile`]); values
/// that cannot be interpreted, such as an unknown `mode`, are rejected.
pub fn load_profile(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<Profile> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;

    parse_profile(&contents)
        .map_err(|e| ForgeError::Profile(format!("{}: {e}", path.display())))
}

/// Parse a profile from JSON text.
pub fn parse_profile(contents: &str) -> std::result::Result<Profile, serde_json::Error> {
    serde_json::from_str(contents)
}

/// Write a profile as pretty-printed JSON (non-ASCII kept as-is).
pub fn save_profile(fs: &dyn FileSystem, path: impl AsRef<Path>, profile: &Profile) -> Result<()> {
    let path = path.as_ref();
    let mut json = serde_json::to_string_pretty(profile)?;
    json.push('\n');
    fs.write(path, json.as_bytes())?;
    Ok(())
}
