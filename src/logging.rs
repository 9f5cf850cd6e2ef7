// src/logging.rs

//! stderr log output for the CI driver.
//!
//! stdout belongs to bosh: its output is streamed there line by line, so
//! our own messages go to stderr. The level is taken from `--log-level`,
//! otherwise from `BOSH_CI_LOG`, otherwise `info`.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_LEVEL_VAR: &str = "BOSH_CI_LOG";

/// Install the global subscriber. Call once from `main`.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = effective_level(cli_level, |key| std::env::var(key).ok());

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// An unparseable `BOSH_CI_LOG` falls back to `info` rather than failing the run.
fn effective_level<F>(cli_level: Option<LogLevel>, lookup: F) -> Level
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(lvl) = cli_level {
        return Level::from(lvl);
    }
    lookup(LOG_LEVEL_VAR)
        .as_deref()
        .and_then(level_named)
        .unwrap_or(Level::INFO)
}

impl From<LogLevel> for Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

fn level_named(name: &str) -> Option<Level> {
    match name.trim().to_ascii_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
