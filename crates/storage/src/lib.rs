// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer for kevin builds.
//!
//! Recorded updates are appended to a per-build JSON-lines log. Generated
//! updates never reach the log: they are derived again by [`BuildView`]
//! whenever the log is replayed.

pub mod env;
mod publish;
mod replay;
mod state;
mod update_log;

pub use env::{Config, ConfigError};
pub use publish::Publisher;
pub use replay::{replay, replay_entries, Replay};
pub use state::BuildView;
pub use update_log::{read_log, read_log_with_clock, LogEntry, LogError, UpdateLog, UpdateSink};
