#![allow(dead_code)]

use std::path::PathBuf;

use forgeexe::config::{BuildConfig, DataMapping, VersionMetadata};
use forgeexe::types::BuildMode;

/// Builder for `BuildConfig` to simplify test setup.
pub struct BuildConfigBuilder {
    config: BuildConfig,
}

impl BuildConfigBuilder {
    pub fn new(entry: &str) -> Self {
        Self {
            config: BuildConfig::new(entry),
        }
    }

    pub fn project_dir(mut self, dir: &str) -> Self {
        self.config.project_dir = Some(PathBuf::from(dir));
        self
    }

    pub fn dist_dir(mut self, dir: &str) -> Self {
        self.config.dist_dir = Some(PathBuf::from(dir));
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.config.app_name = Some(name.to_string());
        self
    }

    pub fn icon(mut self, path: &str) -> Self {
        self.config.icon_path = Some(PathBuf::from(path));
        self
    }

    pub fn mode(mut self, mode: BuildMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn windowed(mut self, val: bool) -> Self {
        self.config.windowed = val;
        self
    }

    pub fn no_confirm(mut self, val: bool) -> Self {
        self.config.no_confirm = val;
        self
    }

    pub fn clean(mut self, val: bool) -> Self {
        self.config.clean_cache = val;
        self
    }

    pub fn metadata(mut self, product: &str, company: &str, version: &str, description: &str) -> Self {
        self.config.metadata = Some(VersionMetadata {
            product: product.to_string(),
            company: company.to_string(),
            version: Some(version.to_string()).filter(|v| !v.is_empty()),
            description: description.to_string(),
        });
        self
    }

    pub fn hidden_import(mut self, module: &str) -> Self {
        self.config.hidden_imports.push(module.to_string());
        self
    }

    pub fn collect_all(mut self, module: &str) -> Self {
        self.config.collect_all.push(module.to_string());
        self
    }

    pub fn hooks_dir(mut self, dir: &str) -> Self {
        self.config.hooks_dirs.push(dir.to_string());
        self
    }

    pub fn add_data(mut self, source: &str, dest: &str) -> Self {
        self.config.add_data.push(DataMapping::new(source, dest));
        self
    }

    pub fn upx(mut self, val: bool) -> Self {
        self.config.use_upx = val;
        self
    }

    pub fn extra_arg(mut self, arg: &str) -> Self {
        self.config.extra_args.push(arg.to_string());
        self
    }

    pub fn build(self) -> BuildConfig {
        self.config
    }
}
