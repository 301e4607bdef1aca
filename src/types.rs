use std::fmt;
use std::str::FromStr;

/// Output layout produced by PyInstaller.
///
/// - `SingleFile`: one self-extracting executable (`--onefile`).
/// - `SingleDirectory`: an executable plus its support files in a folder
///   (PyInstaller's default, so no flag is emitted).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuildMode {
    #[default]
    #[value(name = "onefile")]
    SingleFile,
    #[value(name = "onedir")]
    SingleDirectory,
}

impl BuildMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::SingleFile => "onefile",
            BuildMode::SingleDirectory => "onedir",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse: saved profiles may carry a human label such as
/// `"onefile (single exe)"`, so we only look for the keyword.
impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if lowered.contains("onefile") {
            Ok(BuildMode::SingleFile)
        } else if lowered.contains("onedir") {
            Ok(BuildMode::SingleDirectory)
        } else {
            Err(format!(
                "invalid mode: {s:?} (expected \"onefile\" or \"onedir\")"
            ))
        }
    }
}

impl TryFrom<String> for BuildMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BuildMode> for String {
    fn from(mode: BuildMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Platform the produced executable is meant for.
///
/// PyInstaller cannot cross-compile, so this is normally the host; it is
/// kept explicit so the platform-dependent parts of the command line can be
/// exercised anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TargetPlatform {
    Windows,
    Other,
}

impl TargetPlatform {
    pub fn host() -> Self {
        if cfg!(windows) {
            TargetPlatform::Windows
        } else {
            TargetPlatform::Other
        }
    }

    /// Separator between source and destination in `--add-data` values.
    /// Dictated by PyInstaller's own argument grammar.
    pub fn data_separator(self) -> char {
        match self {
            TargetPlatform::Windows => ';',
            TargetPlatform::Other => ':',
        }
    }

    /// Whether executables for this platform carry a version resource.
    pub fn embeds_version_resource(self) -> bool {
        matches!(self, TargetPlatform::Windows)
    }
}
