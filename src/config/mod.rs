// src/config/mod.rs

//! Build configuration for forgeexe.
//!
//! Responsibilities:
//! - Define the typed build model (`model.rs`).
//! - Map saved JSON profiles onto it (`profile.rs`).
//! - Load/save profiles (`loader.rs`).
//! - Validate inputs before a command is built (`validate.rs`).

pub mod loader;
pub mod model;
pub mod profile;
pub mod validate;

pub use loader::{load_profile, parse_profile, save_profile};
pub use model::{split_list, BuildConfig, DataMapping, VersionMetadata};
pub use profile::Profile;
pub use validate::validate_build_config;
