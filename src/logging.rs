//! File logging. The terminal belongs to the editor, so log lines never go to stdout/stderr.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "GUTTERPAD_LOG";

/// Filter directives: the environment wins over the config file.
pub fn filter_directives(config: &Config, env: Option<String>) -> String {
    env.filter(|s| !s.trim().is_empty()).unwrap_or_else(|| config.log_filter.clone())
}

/// Install the global subscriber when a log file is configured. Returns whether one was
/// installed.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Opening log file {}", path.display()))?;

    let directives = filter_directives(config, std::env::var(LOG_ENV).ok());
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter '{directives}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Installing log subscriber: {e}"))?;
    Ok(true)
}
