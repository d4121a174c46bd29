// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job-level updates

use super::build::{BuildKey, StatePayload};
use super::Fields;
use crate::error::{UpdateError, ValidationError};
use crate::state::BuildStatus;
use serde::Serialize;

/// State change of one job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobState {
    #[serde(flatten)]
    pub build: BuildKey,
    pub job_name: String,
    #[serde(flatten)]
    pub status: StatePayload,
    pub updates_merged: bool,
}

impl JobState {
    pub fn new(build: BuildKey, job_name: impl Into<String>, status: StatePayload) -> Self {
        Self { build, job_name: job_name.into(), status, updates_merged: false }
    }

    /// A copy flagged as carrying the job's merged updates.
    pub fn with_updates_merged(&self) -> Self {
        Self { updates_merged: true, ..self.clone() }
    }

    pub(crate) fn from_fields(mut f: Fields) -> Result<Self, UpdateError> {
        let build = BuildKey::take(&mut f)?;
        let job_name = f.string("job_name")?;
        let raw = StatePayload::take(&mut f)?;
        let updates_merged = f.flag("updates_merged")?;
        f.finish()?;
        Ok(Self { build, job_name, status: StatePayload::from_raw(raw)?, updates_merged })
    }
}

/// Safety net for a job that failed while already handling a failure.
///
/// Always in the `error` state. Older logs carry the state and an
/// `updates_merged` flag; both are accepted and the state must be `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobEmergencyAbort {
    #[serde(flatten)]
    pub(crate) build: BuildKey,
    pub(crate) job_name: String,
    #[serde(flatten)]
    pub(crate) status: StatePayload,
}

impl JobEmergencyAbort {
    pub fn new(
        build: BuildKey,
        job_name: impl Into<String>,
        text: impl Into<String>,
        time: f64,
    ) -> Result<Self, ValidationError> {
        let status = StatePayload::new(BuildStatus::Error, text, time)?;
        Ok(Self { build, job_name: job_name.into(), status })
    }

    pub fn build(&self) -> &BuildKey {
        &self.build
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn state(&self) -> BuildStatus {
        BuildStatus::Error
    }

    pub fn text(&self) -> &str {
        self.status.text()
    }

    pub fn time(&self) -> f64 {
        self.status.time()
    }

    /// The abort viewed as a regular state payload.
    pub fn status(&self) -> &StatePayload {
        &self.status
    }

    pub(crate) fn from_fields(mut f: Fields) -> Result<Self, UpdateError> {
        let build = BuildKey::take(&mut f)?;
        let job_name = f.string("job_name")?;
        let state = f.opt_string("state")?;
        let text = f.string("text")?;
        let time = f.time()?;
        f.flag("updates_merged")?;
        f.finish()?;
        if let Some(state) = state {
            if BuildStatus::parse(&state)? != BuildStatus::Error {
                return Err(ValidationError::IllegalState(state).into());
            }
        }
        Ok(Self::new(build, job_name, text, time)?)
    }
}

/// Payload of the generated `JobStarted` / `JobFinished` markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobMarker {
    pub job_name: String,
}

impl JobMarker {
    pub fn new(job_name: impl Into<String>) -> Self {
        Self { job_name: job_name.into() }
    }

    pub(crate) fn from_fields(mut f: Fields) -> Result<Self, UpdateError> {
        let marker = Self { job_name: f.string("job_name")? };
        f.finish()?;
        Ok(marker)
    }
}
