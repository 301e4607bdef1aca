// src/toolchain/interpreter.rs

//! Locating a Python interpreter to run PyInstaller with.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::errors::{ForgeError, Result};
use crate::types::TargetPlatform;

/// How to invoke Python, e.g. `py -3` or `/usr/bin/python3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Interpreter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// The launcher prefix placed before `-m PyInstaller`.
    pub fn launcher(&self) -> Vec<String> {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.launcher().join(" "))
    }
}

/// Candidate invocations in order of preference.
///
/// - Windows: the `py -3` launcher, then `python`, then `python3`.
/// - Elsewhere: `python3`, then `python`.
pub fn candidates(platform: TargetPlatform) -> &'static [(&'static str, &'static [&'static str])] {
    match platform {
        TargetPlatform::Windows => WINDOWS_CANDIDATES,
        TargetPlatform::Other => POSIX_CANDIDATES,
    }
}

const WINDOWS_CANDIDATES: &[(&str, &[&str])] = &[("py", &["-3"]), ("python", &[]), ("python3", &[])];
const POSIX_CANDIDATES: &[(&str, &[&str])] = &[("python3", &[]), ("python", &[])];

/// The interpreter to build with: `explicit` as given, otherwise the first
/// host candidate found on `PATH`.
///
/// The search always follows the host's conventions. Python has to run
/// here, whatever platform the executable is meant for.
pub fn locate_interpreter(explicit: Option<&str>) -> Result<Interpreter> {
    find_interpreter(explicit, |name| which::which(name).ok())
}

/// [`locate_interpreter`] with a custom `PATH` lookup.
pub fn find_interpreter<F>(explicit: Option<&str>, lookup: F) -> Result<Interpreter>
where
    F: FnMut(&str) -> Option<PathBuf>,
{
    match explicit.map(str::trim).filter(|p| !p.is_empty()) {
        Some(program) => {
            debug!(program, "using interpreter given on the command line");
            Ok(Interpreter::new(program))
        }
        None => locate_with(TargetPlatform::host(), lookup),
    }
}

/// Search the candidates of `platform` in order using `lookup`.
pub fn locate_with<F>(platform: TargetPlatform, mut lookup: F) -> Result<Interpreter>
where
    F: FnMut(&str) -> Option<PathBuf>,
{
    for (name, args) in candidates(platform) {
        match lookup(name) {
            Some(path) => {
                let interpreter = Interpreter {
                    program: path,
                    args: args.iter().map(|a| a.to_string()).collect(),
                };
                info!(%interpreter, "using Python interpreter");
                return Ok(interpreter);
            }
            None => debug!(candidate = name, "not found on PATH"),
        }
    }

    let tried: Vec<_> = candidates(platform).iter().map(|(name, _)| *name).collect();
    Err(ForgeError::InterpreterNotFound(format!(
        "none of {} found on PATH; install Python 3 and try again",
        tried.join(", ")
    )))
}
