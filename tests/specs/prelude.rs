// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for the workspace specs.

pub use kevin_core::test_support::*;
pub use kevin_core::{BuildStatus, FakeClock, Update};
pub use kevin_storage::{read_log, read_log_with_clock, replay, Config, Publisher, UpdateLog};
pub use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// Historical build log: `class` tag key, `JobCreated` with `vm_name`,
/// explicit nulls, and producer-side `step_number`s.
pub const LEGACY_LOG: &str = include_str!("../fixtures/legacy_build.log");

/// A state directory with one build log written from `contents`.
pub struct StateDir {
    pub dir: TempDir,
    pub config: Config,
}

impl StateDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_state_dir(dir.path());
        Self { dir, config }
    }

    pub fn log_path(&self) -> PathBuf {
        self.config.build_log_path(PROJECT, BUILD).unwrap()
    }

    pub fn write_log(&self, contents: &str) -> PathBuf {
        let path = self.log_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }
}
