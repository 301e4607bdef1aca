// tests/command_builder.rs
mod common;
use crate::common::builders::BuildConfigBuilder;
use crate::common::{build_with, init_tracing, project_fs, ENTRY, SCRATCH, SELF_EXE};

use std::error::Error;
use std::path::{Path, PathBuf};

use forgeexe::command::{build_command, display_command, quote_token, CommandContext};
use forgeexe::config::BuildConfig;
use forgeexe::errors::ForgeError;
use forgeexe::types::{BuildMode, TargetPlatform};

type TestResult = Result<(), Box<dyn Error>>;

fn strs(argv: &[String]) -> Vec<&str> {
    argv.iter().map(String::as_str).collect()
}

#[test]
fn minimal_config_is_launcher_module_and_entry() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let cfg = BuildConfigBuilder::new(ENTRY)
        .mode(BuildMode::SingleDirectory)
        .build();

    let cmd = build_with(&cfg, &fs, TargetPlatform::Other)?;

    assert_eq!(strs(&cmd.argv), vec!["python3", "-m", "PyInstaller", ENTRY]);
    assert_eq!(cmd.program(), "python3");
    assert!(cmd.version_file.is_none());
    Ok(())
}

#[test]
fn onefile_windowed_named_app_ends_with_expected_tokens() -> TestResult {
    init_tracing();
    let fs = project_fs();
    fs.add_file("app.py", "print('hi')\n");
    let cfg = BuildConfigBuilder::new("app.py")
        .mode(BuildMode::SingleFile)
        .windowed(true)
        .name("App")
        .build();

    let cmd = build_with(&cfg, &fs, TargetPlatform::Other)?;

    assert_eq!(
        strs(&cmd.argv),
        vec!["python3", "-m", "PyInstaller", "--onefile", "--windowed", "-n", "App", "app.py"]
    );
    Ok(())
}

#[test]
fn every_section_appears_in_fixed_order() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let cfg = BuildConfigBuilder::new(ENTRY)
        .no_confirm(true)
        .clean(true)
        .mode(BuildMode::SingleFile)
        .windowed(true)
        .name("Demo")
        .icon("/proj/icon.ico")
        .dist_dir("/out/dist")
        .add_data("assets", "data")
        .add_data("README.md", ".")
        .hidden_import("yaml")
        .collect_all("numpy")
        .hooks_dir("hooks")
        .upx(true)
        .extra_arg("--log-level WARN")
        .build();

    let cmd = build_with(&cfg, &fs, TargetPlatform::Other)?;

    assert_eq!(
        strs(&cmd.argv),
        vec![
            "python3",
            "-m",
            "PyInstaller",
            "--noconfirm",
            "--clean",
            "--onefile",
            "--windowed",
            "-n",
            "Demo",
            "--icon",
            "/proj/icon.ico",
            "--distpath",
            "/out/dist",
            "--workpath",
            "/out/build",
            "--add-data",
            "assets:data",
            "--add-data",
            "README.md:.",
            "--hidden-import",
            "yaml",
            "--collect-all",
            "numpy",
            "--additional-hooks-dir",
            "hooks",
            "--upx-dir=upx",
            "--log-level",
            "WARN",
            ENTRY,
        ]
    );
    Ok(())
}

#[test]
fn add_data_uses_semicolon_for_windows_targets() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let cfg = BuildConfigBuilder::new(ENTRY).add_data("assets", "data").build();

    let cmd = build_with(&cfg, &fs, TargetPlatform::Windows)?;

    let pos = cmd
        .argv
        .iter()
        .position(|t| t == "--add-data")
        .ok_or("missing --add-data")?;
    assert_eq!(cmd.argv[pos + 1], "assets;data");
    Ok(())
}

#[test]
fn add_data_uses_colon_elsewhere() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let cfg = BuildConfigBuilder::new(ENTRY)
        .add_data("assets", "data")
        .add_data("cfg/settings.toml", "")
        .build();

    let cmd = build_with(&cfg, &fs, TargetPlatform::Other)?;

    let values: Vec<&str> = cmd
        .argv
        .windows(2)
        .filter(|w| w[0] == "--add-data")
        .map(|w| w[1].as_str())
        .collect();
    assert_eq!(values, vec!["assets:data", "cfg/settings.toml:."]);
    Ok(())
}

#[test]
fn windows_metadata_writes_version_file_before_extra_args() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let cfg = BuildConfigBuilder::new(ENTRY)
        .name("Demo")
        .metadata("", "ACME", "2.1", "Demo tool")
        .extra_arg("--debug=imports")
        .build();

    let cmd = build_with(&cfg, &fs, TargetPlatform::Windows)?;

    let expected_path = Path::new(SCRATCH).join("version_info.txt");
    assert_eq!(cmd.version_file.as_deref(), Some(expected_path.as_path()));

    let tail: Vec<&str> = strs(&cmd.argv).into_iter().rev().take(4).collect();
    assert_eq!(
        tail,
        vec![
            ENTRY,
            "--debug=imports",
            expected_path.to_str().ok_or("non-utf8 path")?,
            "--version-file",
        ]
    );

    let written = fs.contents(&expected_path).ok_or("version file not written")?;
    let text = String::from_utf8(written)?;
    assert!(text.contains("filevers=(2,1,0,0)"));
    // Empty product falls back to the app name.
    assert!(text.contains("StringStruct('ProductName', 'Demo')"));
    assert!(text.contains("StringStruct('OriginalFilename', 'Demo.exe')"));
    assert!(text.contains("StringStruct('CompanyName', 'ACME')"));
    assert!(text.contains("StringStruct('FileVersion', '2.1')"));
    Ok(())
}

#[test]
fn version_only_metadata_still_requests_resource() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let cfg = BuildConfigBuilder::new(ENTRY)
        .metadata("", "", "1.0.0.0", "")
        .build();

    let cmd = build_with(&cfg, &fs, TargetPlatform::Windows)?;

    assert!(cmd.argv.iter().any(|t| t == "--version-file"));
    let written = fs
        .contents(cmd.version_file.as_deref().ok_or("no version file")?)
        .ok_or("version file not written")?;
    let text = String::from_utf8(written)?;
    assert!(text.contains("StringStruct('OriginalFilename', 'app.exe')"));
    Ok(())
}

#[test]
fn metadata_is_ignored_for_non_windows_targets() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let cfg = BuildConfigBuilder::new(ENTRY)
        .metadata("Demo", "ACME", "1.2.3.4", "Demo tool")
        .build();

    let cmd = build_with(&cfg, &fs, TargetPlatform::Other)?;

    assert!(cmd.version_file.is_none());
    assert!(!cmd.argv.iter().any(|t| t == "--version-file"));
    assert!(fs.contents(Path::new(SCRATCH).join("version_info.txt")).is_none());
    Ok(())
}

#[test]
fn empty_metadata_writes_no_version_file() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let mut cfg = BuildConfigBuilder::new(ENTRY).build();
    cfg.metadata = Some(Default::default());

    let cmd = build_with(&cfg, &fs, TargetPlatform::Windows)?;

    assert!(cmd.version_file.is_none());
    Ok(())
}

#[test]
fn extra_args_are_split_on_whitespace_in_order() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let cfg = BuildConfigBuilder::new(ENTRY)
        .extra_arg("  --strip   --exclude-module tkinter ")
        .extra_arg("--noupx")
        .build();

    let cmd = build_with(&cfg, &fs, TargetPlatform::Other)?;

    let n = cmd.argv.len();
    assert_eq!(
        strs(&cmd.argv[n - 5..]),
        vec!["--strip", "--exclude-module", "tkinter", "--noupx", ENTRY]
    );
    Ok(())
}

#[test]
fn workpath_is_sibling_build_folder_of_relative_dist() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let cfg = BuildConfigBuilder::new(ENTRY).dist_dir("dist").build();

    let cmd = build_with(&cfg, &fs, TargetPlatform::Other)?;

    let pos = cmd
        .argv
        .iter()
        .position(|t| t == "--workpath")
        .ok_or("missing --workpath")?;
    assert_eq!(PathBuf::from(&cmd.argv[pos + 1]), PathBuf::from("build"));
    Ok(())
}

#[test]
fn empty_dist_dir_emits_no_path_flags() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let cfg = BuildConfigBuilder::new(ENTRY).dist_dir("").name("  ").build();

    let cmd = build_with(&cfg, &fs, TargetPlatform::Other)?;

    assert!(!cmd.argv.iter().any(|t| t == "--distpath" || t == "--workpath"));
    assert!(!cmd.argv.iter().any(|t| t == "-n"));
    Ok(())
}

#[test]
fn missing_entry_is_invalid_input() {
    init_tracing();
    let fs = project_fs();
    let cfg = BuildConfigBuilder::new("/proj/missing.py").build();

    match build_with(&cfg, &fs, TargetPlatform::Other) {
        Err(ForgeError::InvalidInput(msg)) => assert!(msg.contains("does not exist")),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn directory_entry_is_invalid_input() {
    init_tracing();
    let fs = project_fs();
    let cfg = BuildConfigBuilder::new("/proj").build();

    match build_with(&cfg, &fs, TargetPlatform::Other) {
        Err(ForgeError::InvalidInput(msg)) => assert!(msg.contains("is not a file"), "{msg}"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn packaging_the_builder_itself_is_rejected() {
    init_tracing();
    let fs = project_fs();
    // Same file, reached through a non-canonical path.
    let cfg = BuildConfigBuilder::new("/opt/forgeexe/../forgeexe/./forgeexe")
        .metadata("Me", "", "1.0", "")
        .build();

    let result = build_with(&cfg, &fs, TargetPlatform::Windows);

    match result {
        Err(ForgeError::InvalidInput(msg)) => assert!(msg.contains("builder itself")),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
    // Nothing may be written when validation fails.
    assert!(fs.contents(Path::new(SCRATCH).join("version_info.txt")).is_none());
}

#[test]
fn guard_is_skipped_when_own_path_is_unknown() -> TestResult {
    init_tracing();
    let fs = project_fs();
    let cfg = BuildConfig::new(SELF_EXE);
    let launcher = vec!["py".to_string(), "-3".to_string()];
    let ctx = CommandContext {
        launcher: &launcher,
        platform: TargetPlatform::Windows,
        self_path: None,
        fs: &fs,
        scratch_dir: Path::new(SCRATCH),
    };

    let cmd = build_command(&cfg, &ctx)?;

    assert_eq!(&strs(&cmd.argv)[..4], &["py", "-3", "-m", "PyInstaller"]);
    Ok(())
}

#[test]
fn display_quotes_only_tokens_with_special_characters() {
    assert_eq!(quote_token(""), "");
    assert_eq!(quote_token("--onefile"), "--onefile");
    assert_eq!(quote_token("My App"), "\"My App\"");
    assert_eq!(quote_token("assets;data"), "\"assets;data\"");
    assert_eq!(quote_token("--upx-dir=upx"), "\"--upx-dir=upx\"");
    assert_eq!(quote_token("C:\\proj\\main.py"), "C:\\proj\\main.py");

    let argv = vec!["python3".to_string(), "-n".to_string(), "My App".to_string()];
    assert_eq!(display_command(&argv), "python3 -n \"My App\"");
}
