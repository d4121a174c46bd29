// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step state changes

use super::build::{BuildKey, StatePayload};
use super::Fields;
use crate::error::{UpdateError, ValidationError};
use crate::job::JobTarget;
use crate::validate;
use serde::Serialize;

/// State change of one step inside a job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepState {
    #[serde(flatten)]
    pub(crate) build: BuildKey,
    pub(crate) job_name: String,
    pub(crate) step_name: String,
    #[serde(flatten)]
    pub(crate) status: StatePayload,
    /// Position of the step within the job. Only meaningful to the live
    /// producer; never written to the log.
    #[serde(skip_serializing)]
    pub(crate) step_number: Option<u64>,
}

impl StepState {
    pub fn new(
        build: BuildKey,
        job_name: impl Into<String>,
        step_name: impl Into<String>,
        status: StatePayload,
    ) -> Result<Self, ValidationError> {
        let step_name = step_name.into();
        validate::identifier("step_name", &step_name)?;
        Ok(Self { build, job_name: job_name.into(), step_name, status, step_number: None })
    }

    pub fn with_step_number(mut self, step_number: u64) -> Self {
        self.step_number = Some(step_number);
        self
    }

    pub fn build(&self) -> &BuildKey {
        &self.build
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn step_name(&self) -> &str {
        &self.step_name
    }

    pub fn status(&self) -> &StatePayload {
        &self.status
    }

    pub fn step_number(&self) -> Option<u64> {
        self.step_number
    }

    /// The step as it reads back from the log, where the number is dropped.
    pub fn without_step_number(&self) -> Self {
        Self { step_number: None, ..self.clone() }
    }

    pub fn apply_to<J: JobTarget + ?Sized>(&self, job: &mut J) {
        job.step_update(self);
    }

    pub(crate) fn from_fields(mut f: Fields) -> Result<Self, UpdateError> {
        let build = BuildKey::take(&mut f)?;
        let job_name = f.string("job_name")?;
        let step_name = f.string("step_name")?;
        let raw = StatePayload::take(&mut f)?;
        let step_number = f.opt_u64("step_number")?;
        f.finish()?;
        let step = Self::new(build, job_name, step_name, StatePayload::from_raw(raw)?)?;
        Ok(Self { step_number, ..step })
    }
}
