// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build-level updates: sources, job creation, and state changes.

use super::Fields;
use crate::error::{UpdateError, ValidationError};
use crate::state::BuildStatus;
use crate::validate;
use serde::Serialize;

/// Identifies the build a state change belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BuildKey {
    pub project_name: String,
    pub build_id: String,
}

impl BuildKey {
    pub fn new(project_name: impl Into<String>, build_id: impl Into<String>) -> Self {
        Self { project_name: project_name.into(), build_id: build_id.into() }
    }

    pub(crate) fn take(f: &mut Fields) -> Result<Self, UpdateError> {
        Ok(Self { project_name: f.string("project_name")?, build_id: f.string("build_id")? })
    }
}

/// State, description, and timestamp carried by every state change.
///
/// Only `new` builds one, so `text` is always printable and `time` finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatePayload {
    pub(crate) state: BuildStatus,
    pub(crate) text: String,
    /// Seconds since the Unix epoch.
    pub(crate) time: f64,
}

fn check_time(time: f64) -> Result<f64, ValidationError> {
    if time.is_finite() {
        Ok(time)
    } else {
        Err(ValidationError::NonFiniteTime(time))
    }
}

impl StatePayload {
    pub fn new(
        state: BuildStatus,
        text: impl Into<String>,
        time: f64,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        validate::printable("text", &text)?;
        Ok(Self { state, text, time: check_time(time)? })
    }

    /// Fields are read raw here and validated by `new` once the schema
    /// check has passed.
    pub(crate) fn take(f: &mut Fields) -> Result<(String, String, f64), UpdateError> {
        let state = f.string("state")?;
        let text = f.string("text")?;
        let time = f.time()?;
        Ok((state, text, time))
    }

    pub(crate) fn from_raw((state, text, time): (String, String, f64)) -> Result<Self, UpdateError> {
        Ok(Self::new(BuildStatus::parse(&state)?, text, time)?)
    }

    pub fn state(&self) -> BuildStatus {
        self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_succeeded(&self) -> bool {
        self.state.is_successful()
    }

    /// The thing is no longer running.
    pub fn is_completed(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn is_errored(&self) -> bool {
        self.state.is_errored()
    }
}

/// A new source for the build: a place the request to build this commit
/// originated from. A build is not buildable until it has at least one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildSource {
    pub clone_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl BuildSource {
    pub fn new(clone_url: impl Into<String>) -> Self {
        Self {
            clone_url: clone_url.into(),
            repo_id: None,
            repo_url: None,
            author: None,
            branch: None,
            comment: None,
        }
    }

    crate::setters! {
        option {
            repo_id: String,
            repo_url: String,
            author: String,
            branch: String,
            comment: String,
        }
    }

    pub(crate) fn from_fields(mut f: Fields) -> Result<Self, UpdateError> {
        let source = Self {
            clone_url: f.string("clone_url")?,
            repo_id: f.opt_string("repo_id")?,
            repo_url: f.opt_string("repo_url")?,
            author: f.opt_string("author")?,
            branch: f.opt_string("branch")?,
            comment: f.opt_string("comment")?,
        };
        f.finish()?;
        Ok(source)
    }
}

/// A job was created in the build and assigned a machine.
///
/// Older logs name the machine `vm_name`; the registry maps it onto
/// `machine_name` before construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildJobCreated {
    pub job_name: String,
    pub machine_name: String,
}

impl BuildJobCreated {
    pub fn new(job_name: impl Into<String>, machine_name: impl Into<String>) -> Self {
        Self { job_name: job_name.into(), machine_name: machine_name.into() }
    }

    pub(crate) fn from_fields(mut f: Fields) -> Result<Self, UpdateError> {
        let created = Self { job_name: f.string("job_name")?, machine_name: f.string("machine_name")? };
        f.finish()?;
        Ok(created)
    }
}

/// Overall state change of a build. Shared by the recorded `State` and the
/// generated `BuildState`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateChange {
    #[serde(flatten)]
    pub build: BuildKey,
    #[serde(flatten)]
    pub status: StatePayload,
}

impl StateChange {
    pub fn new(build: BuildKey, status: StatePayload) -> Self {
        Self { build, status }
    }

    pub(crate) fn from_fields(mut f: Fields) -> Result<Self, UpdateError> {
        let build = BuildKey::take(&mut f)?;
        let raw = StatePayload::take(&mut f)?;
        f.finish()?;
        Ok(Self { build, status: StatePayload::from_raw(raw)? })
    }
}
