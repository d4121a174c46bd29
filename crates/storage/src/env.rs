// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the storage crate.

use std::path::PathBuf;
use thiserror::Error;

/// Fan-out buffer used when `KEVIN_BROADCAST_CAPACITY` is unset or invalid.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cannot determine state directory: neither KEVIN_STATE_DIR, XDG_STATE_HOME nor HOME is set")]
    NoStateDir,
    #[error("invalid path component {0:?}")]
    InvalidComponent(String),
}

/// Resolve state directory: KEVIN_STATE_DIR > XDG_STATE_HOME/kevin > ~/.local/state/kevin
pub fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var("KEVIN_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("kevin"));
    }
    let home = std::env::var("HOME").map_err(|_| ConfigError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/kevin"))
}

/// Capacity of the live update channel. Zero is not a valid capacity.
pub fn broadcast_capacity() -> usize {
    std::env::var("KEVIN_BROADCAST_CAPACITY")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_BROADCAST_CAPACITY)
}

/// Resolved storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub state_dir: PathBuf,
    pub builds_dir: PathBuf,
    pub broadcast_capacity: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::with_state_dir(state_dir()?);
        config.broadcast_capacity = broadcast_capacity();
        Ok(config)
    }

    pub fn with_state_dir(state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            builds_dir: state_dir.join("builds"),
            state_dir,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }

    /// `<builds_dir>/<project>/<build>.log`
    pub fn build_log_path(&self, project: &str, build: &str) -> Result<PathBuf, ConfigError> {
        let project = path_component(project)?;
        let build = path_component(build)?;
        Ok(self.builds_dir.join(project).join(format!("{build}.log")))
    }
}

fn path_component(name: &str) -> Result<&str, ConfigError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || !kevin_core::validate::is_printable(name);
    if invalid {
        Err(ConfigError::InvalidComponent(name.to_string()))
    } else {
        Ok(name)
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
