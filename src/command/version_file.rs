// src/command/version_file.rs

//! Windows version resource (`--version-file`) generation.
//!
//! PyInstaller reads a Python-literal `VSVersionInfo(...)` description and
//! embeds it as the executable's version resource. We render that text from
//! a handful of user fields.

use std::path::{Path, PathBuf};

use crate::config::VersionMetadata;
use crate::errors::Result;
use crate::fs::FileSystem;

/// File name used inside the scratch directory.
pub const VERSION_FILE_NAME: &str = "version_info.txt";

/// Normalize a free-form version string to exactly four numeric components.
///
/// `,` is accepted as a separator as well as `.`. Components that are not a
/// plain run of ASCII digits (or do not fit in `u32`) become `0`; missing
/// components are padded with `0` and extra ones are dropped.
///
/// ```
/// use forgeexe::command::version_file::normalize_version;
/// assert_eq!(normalize_version("2.1"), [2, 1, 0, 0]);
/// assert_eq!(normalize_version("1,0,0,0"), [1, 0, 0, 0]);
/// assert_eq!(normalize_version("abc"), [0, 0, 0, 0]);
/// ```
pub fn normalize_version(version: &str) -> [u32; 4] {
    let mut out = [0u32; 4];
    let normalized = version.replace(',', ".");
    for (slot, part) in out.iter_mut().zip(normalized.split('.')) {
        if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
            *slot = part.parse().unwrap_or(0);
        }
    }
    out
}

/// Render a version tuple as `a.b.c.d`.
pub fn format_version(parts: [u32; 4]) -> String {
    let [a, b, c, d] = parts;
    format!("{a}.{b}.{c}.{d}")
}

/// Render the `VSVersionInfo` text for the given fields.
pub fn render_version_info(
    product_name: &str,
    file_description: &str,
    company: &str,
    version: &str,
) -> String {
    let version = if version.trim().is_empty() {
        VersionMetadata::DEFAULT_VERSION
    } else {
        version
    };
    let [vmaj, vmin, vpatch, vbuild] = normalize_version(version);
    let tuple = format!("({vmaj},{vmin},{vpatch},{vbuild})");

    let description = if file_description.is_empty() {
        product_name
    } else {
        file_description
    };
    let original_filename = if product_name.is_empty() {
        "app.exe".to_string()
    } else {
        format!("{product_name}.exe")
    };

    let strings = [
        ("CompanyName", company),
        ("FileDescription", description),
        ("FileVersion", version),
        ("InternalName", product_name),
        ("LegalCopyright", ""),
        ("OriginalFilename", original_filename.as_str()),
        ("ProductName", product_name),
        ("ProductVersion", version),
    ];
    let string_structs = strings
        .iter()
        .map(|(key, value)| format!("StringStruct('{key}', '{}')", escape_literal(value)))
        .collect::<Vec<_>>()
        .join(",\n        ");

    format!(
        "# UTF-8
VSVersionInfo(
  ffi=FixedFileInfo(
    filevers={tuple},
    prodvers={tuple},
    mask=0x3f,
    flags=0x0,
    OS=0x4,
    fileType=0x1,
    subtype=0x0,
    date=(0, 0)
    ),
  kids=[
    StringFileInfo(
      [
      StringTable(
        '040904B0',
        [{string_structs}])
      ]),
    VarFileInfo([VarStruct('Translation', [1033, 1200])])
  ]
)
"
    )
}

/// Render the resource for `metadata` and write it into `dir`.
///
/// Returns the path of the written file.
pub fn write_version_file(
    fs: &dyn FileSystem,
    dir: &Path,
    product_name: &str,
    metadata: &VersionMetadata,
) -> Result<PathBuf> {
    let content = render_version_info(
        product_name,
        &metadata.description,
        &metadata.company,
        metadata.effective_version(),
    );
    let path = dir.join(VERSION_FILE_NAME);
    fs.write(&path, content.as_bytes())?;
    Ok(path)
}

/// Escape a value for a single-quoted Python string literal.
fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
