// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process control messages. All of them are generated.

use super::Fields;
use crate::error::UpdateError;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// The scheduler that runs a build's queued actions.
pub trait TaskQueue: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
}

/// The project a build belongs to.
pub trait Project: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
}

/// The actions of a build can now be enqueued.
///
/// Holds live handles, so it can be neither serialized nor reconstructed.
/// Two instances are equal when they point at the same queue and project.
#[derive(Debug, Clone)]
pub struct QueueActions {
    pub build_id: String,
    pub queue: Arc<dyn TaskQueue>,
    pub project: Arc<dyn Project>,
}

impl QueueActions {
    pub fn new(
        build_id: impl Into<String>,
        queue: Arc<dyn TaskQueue>,
        project: Arc<dyn Project>,
    ) -> Self {
        Self { build_id: build_id.into(), queue, project }
    }
}

impl PartialEq for QueueActions {
    fn eq(&self, other: &Self) -> bool {
        self.build_id == other.build_id
            && Arc::ptr_eq(&self.queue, &other.queue)
            && Arc::ptr_eq(&self.project, &other.project)
    }
}

/// Sent to a client when its request could not be handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestError {
    pub text: String,
}

impl RequestError {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub(crate) fn from_fields(mut f: Fields) -> Result<Self, UpdateError> {
        let err = Self { text: f.string("text")? };
        f.finish()?;
        Ok(err)
    }
}
