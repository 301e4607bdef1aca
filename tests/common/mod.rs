#![allow(dead_code)]

use std::path::Path;

use forgeexe::command::{build_command, BuildCommand, CommandContext};
use forgeexe::config::BuildConfig;
use forgeexe::errors::Result;
use forgeexe::fs::mock::MockFileSystem;
use forgeexe::types::TargetPlatform;

pub use forgeexe_test_utils::builders;
pub use forgeexe_test_utils::init_tracing;

pub const ENTRY: &str = "/proj/app.py";
pub const SCRATCH: &str = "/tmp/forgeexe_tmp_test";
pub const SELF_EXE: &str = "/opt/forgeexe/forgeexe";

/// A mock tree holding the entry script and the builder's own binary.
pub fn project_fs() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file(ENTRY, "print('hello')\n");
    fs.add_file(SELF_EXE, b"\x7fELF".to_vec());
    fs
}

pub fn launcher() -> Vec<String> {
    vec!["python3".to_string()]
}

/// Build `cfg` against `fs` for `platform`, with the default launcher.
pub fn build_with(
    cfg: &BuildConfig,
    fs: &MockFileSystem,
    platform: TargetPlatform,
) -> Result<BuildCommand> {
    let launcher = launcher();
    let ctx = CommandContext {
        launcher: &launcher,
        platform,
        self_path: Some(Path::new(SELF_EXE)),
        fs,
        scratch_dir: Path::new(SCRATCH),
    };
    build_command(cfg, &ctx)
}
