// src/logging.rs

//! `tracing` subscriber setup.
//!
//! The filter comes from, in order:
//! 1. `--log-level`
//! 2. `FORGEEXE_LOG`, either a bare level (`debug`) or full directives
//!    (`forgeexe::exec=trace,info`)
//! 3. `info`
//!
//! Diagnostics go to STDERR so STDOUT carries nothing but the build log.

use anyhow::{anyhow, Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "FORGEEXE_LOG";

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(level) => EnvFilter::default().add_directive(LevelFilter::from(level).into()),
        None => filter_from_env(std::env::var(LOG_ENV_VAR).ok().as_deref())?,
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

/// Build the filter for a `FORGEEXE_LOG` value (`None` when unset).
pub fn filter_from_env(value: Option<&str>) -> Result<EnvFilter> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(EnvFilter::default().add_directive(LevelFilter::INFO.into()));
    };

    if let Some(level) = parse_level_str(raw) {
        return Ok(EnvFilter::default().add_directive(LevelFilter::from_level(level).into()));
    }

    EnvFilter::try_new(raw).with_context(|| format!("invalid {LOG_ENV_VAR} value {raw:?}"))
}

/// Parse a bare level name; `warning` is accepted for `warn`.
pub fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}
