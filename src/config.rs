//! User configuration loaded from `gutterpad.toml`.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Editor settings. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum number of undo steps kept.
    pub history_limit: usize,
    /// How often the resize poller checks the terminal size.
    pub resize_poll_ms: u64,
    /// Spaces inserted by Tab.
    pub tab_width: usize,
    pub status_ttl_secs: u64,
    /// Log destination. Logging is off when unset.
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: 1000,
            resize_poll_ms: 250,
            tab_width: 4,
            status_ttl_secs: 3,
            log_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).context("Parsing configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()))?;
        Self::from_toml_str(&s).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Places a config file is looked for, in order.
    pub fn candidate_paths(home: Option<&Path>) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("gutterpad.toml"), PathBuf::from(".gutterpad.toml")];
        if let Some(home) = home {
            paths.push(home.join(".config").join("gutterpad").join("config.toml"));
        }
        paths
    }

    /// Load the first config file that exists, or the defaults if there is none.
    pub fn discover() -> Result<Self> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        Self::discover_in(&Self::candidate_paths(home.as_deref()))
    }

    pub fn discover_in(paths: &[PathBuf]) -> Result<Self> {
        match paths.iter().find(|p| p.is_file()) {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.history_limit >= 1, "history_limit must be at least 1");
        ensure!(self.resize_poll_ms >= 10, "resize_poll_ms must be at least 10");
        Ok(())
    }

    pub fn resize_poll_interval(&self) -> Duration {
        Duration::from_millis(self.resize_poll_ms)
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_secs(self.status_ttl_secs)
    }
}
