// src/toolchain/mod.rs

//! Preconditions checked before a build starts: a Python interpreter must be
//! found, and PyInstaller must be importable in it.

pub mod availability;
pub mod interpreter;

pub use availability::{ensure_tool_available, InstallPolicy};
pub use interpreter::{find_interpreter, locate_interpreter, Interpreter};
