// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rebuild a build from its log.

use crate::state::BuildView;
use crate::update_log::{read_log, LogEntry, LogError};
use kevin_core::Update;
use std::path::Path;

/// Result of replaying a build log.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    pub view: BuildView,
    /// Generated updates re-derived from the log, in emission order.
    pub generated: Vec<Update>,
    /// Number of log entries applied.
    pub entries: usize,
}

/// Read the log at `path` and replay it into a fresh view.
pub fn replay(path: &Path) -> Result<Replay, LogError> {
    let entries = read_log(path)?;
    let replay = replay_entries(&entries);
    tracing::info!(
        path = %path.display(),
        entries = replay.entries,
        generated = replay.generated.len(),
        "replayed build log"
    );
    Ok(replay)
}

/// Apply `entries` in order to a fresh view.
pub fn replay_entries(entries: &[LogEntry]) -> Replay {
    let mut view = BuildView::new();
    let generated = entries.iter().flat_map(|entry| view.apply(&entry.update)).collect();
    Replay { view, generated, entries: entries.len() }
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
