//! File logging for the binaries.
//!
//! - `MEMORY_MATCH_LOG_PATH`: append log records to this file (unset: no logging)
//! - `MEMORY_MATCH_LOG`: filter, `env_logger` syntax (default: `info`)
//!
//! Records never go to the terminal; the game owns the alternate screen.

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

pub const LOG_PATH_VAR: &str = "MEMORY_MATCH_LOG_PATH";
pub const LOG_FILTER_VAR: &str = "MEMORY_MATCH_LOG";

/// Log file named by the environment, if any.
pub fn log_path_from_env() -> Option<PathBuf> {
    std::env::var_os(LOG_PATH_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Install the global logger. Returns whether logging is on.
pub fn init_from_env() -> Result<bool> {
    let Some(path) = log_path_from_env() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    Builder::from_env(Env::default().filter_or(LOG_FILTER_VAR, "info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("installing logger")?;
    Ok(true)
}
