// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle states shared by builds, jobs, and steps.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a build, job, or step.
///
/// `waiting` and `running` are the only non-terminal states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    #[default]
    Waiting,
    Running,
    Success,
    Failure,
    Error,
    Skipped,
}

impl BuildStatus {
    pub const ALL: [BuildStatus; 6] = [
        BuildStatus::Waiting,
        BuildStatus::Running,
        BuildStatus::Success,
        BuildStatus::Failure,
        BuildStatus::Error,
        BuildStatus::Skipped,
    ];

    /// Parse a wire state, rejecting anything outside the enumeration.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ValidationError::IllegalState(s.to_string()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildStatus::Waiting => "waiting",
            BuildStatus::Running => "running",
            BuildStatus::Success => "success",
            BuildStatus::Failure => "failure",
            BuildStatus::Error => "error",
            BuildStatus::Skipped => "skipped",
        }
    }

    /// No further transitions are expected.
    pub fn is_terminal(self) -> bool {
        !matches!(self, BuildStatus::Waiting | BuildStatus::Running)
    }

    pub fn is_successful(self) -> bool {
        self == BuildStatus::Success
    }

    pub fn is_errored(self) -> bool {
        self == BuildStatus::Error
    }

    /// Severity used when folding job states into a build state.
    pub(crate) fn severity(self) -> u8 {
        match self {
            BuildStatus::Waiting | BuildStatus::Running => 0,
            BuildStatus::Skipped => 1,
            BuildStatus::Success => 2,
            BuildStatus::Failure => 3,
            BuildStatus::Error => 4,
        }
    }

    /// The more severe of two terminal states (error > failure > success > skipped).
    pub fn worst(self, other: BuildStatus) -> BuildStatus {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
