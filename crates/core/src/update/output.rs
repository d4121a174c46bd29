// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output produced by a job: announced artifacts and console chunks.

use super::Fields;
use crate::error::{UpdateError, ValidationError};
use crate::job::JobTarget;
use crate::validate;
use serde::Serialize;

/// A job has produced an output item (file or directory).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OutputItem {
    pub(crate) job_name: String,
    pub(crate) name: String,
    pub(crate) isdir: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) step_name: Option<String>,
    /// Size in bytes.
    pub(crate) size: u64,
}

impl OutputItem {
    pub fn new(
        job_name: impl Into<String>,
        name: impl Into<String>,
        isdir: bool,
        size: u64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        validate::output_item_name(&name)?;
        Ok(Self { job_name: job_name.into(), name, isdir, step_name: None, size })
    }

    pub fn with_step(mut self, step_name: impl Into<String>) -> Self {
        self.step_name = Some(step_name.into());
        self
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn isdir(&self) -> bool {
        self.isdir
    }

    pub fn step_name(&self) -> Option<&str> {
        self.step_name.as_deref()
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Check that `path` names this item or something inside it.
    pub fn validate_path(&self, path: &str) -> Result<(), ValidationError> {
        validate::sub_path(&self.name, path)
    }

    /// Register the item on the job and charge its size against the job's
    /// remaining output budget. The budget is not clamped at zero.
    pub fn apply_to<J: JobTarget + ?Sized>(&self, job: &mut J) {
        job.add_output_item(self.clone());
        let size = i64::try_from(self.size).unwrap_or(i64::MAX);
        let remaining = job.remaining_output_size_mut();
        *remaining = remaining.saturating_sub(size);
        if *remaining < 0 {
            tracing::warn!(
                job = %self.job_name,
                item = %self.name,
                remaining = *remaining,
                "output size exceeds the job's announced budget"
            );
        }
    }

    pub(crate) fn from_fields(mut f: Fields) -> Result<Self, UpdateError> {
        let job_name = f.string("job_name")?;
        let name = f.string("name")?;
        let isdir = f.required_flag("isdir")?;
        let step_name = f.opt_string("step_name")?;
        let size = f.opt_u64("size")?.unwrap_or(0);
        f.finish()?;
        let item = Self::new(job_name, name, isdir, size)?;
        Ok(Self { step_name, ..item })
    }
}

/// A process produced output on its terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StdOut {
    pub job_name: String,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_name: Option<String>,
}

impl StdOut {
    pub fn new(job_name: impl Into<String>, data: impl Into<String>) -> Self {
        Self { job_name: job_name.into(), data: data.into(), step_name: None }
    }

    pub fn with_step(mut self, step_name: impl Into<String>) -> Self {
        self.step_name = Some(step_name.into());
        self
    }

    pub(crate) fn from_fields(mut f: Fields) -> Result<Self, UpdateError> {
        let out = Self {
            job_name: f.string("job_name")?,
            data: f.string("data")?,
            step_name: f.opt_string("step_name")?,
        };
        f.finish()?;
        Ok(out)
    }
}
