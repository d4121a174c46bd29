// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Update types for the kevin CI service.
//!
//! Wire format: one flat JSON object per update, `{"type": "<Tag>", ...fields}`.
//! Every variant is listed exactly once in [`UpdateKind`], which drives the
//! tag, the generated/recorded split, and the registry.

mod build;
mod control;
mod fields;
mod job;
mod methods;
mod output;
mod registry;
mod step;

pub use build::{BuildJobCreated, BuildKey, BuildSource, StateChange, StatePayload};
pub use control::{Project, QueueActions, RequestError, TaskQueue};
pub use fields::Fields;
pub use job::{JobEmergencyAbort, JobMarker, JobState};
pub use output::{OutputItem, StdOut};
pub use registry::{Constructor, Registry};
pub use step::StepState;

use crate::clock::{Clock, SystemClock};
use crate::error::{ReconstructionError, UpdateError};
use crate::job::JobTarget;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// One message of a build's history.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    BuildSource(BuildSource),
    BuildJobCreated(BuildJobCreated),
    State(StateChange),
    BuildState(StateChange),
    BuildStarted,
    BuildFinished,
    JobState(JobState),
    JobEmergencyAbort(JobEmergencyAbort),
    JobStarted(JobMarker),
    JobFinished(JobMarker),
    StepState(StepState),
    OutputItem(OutputItem),
    StdOut(StdOut),
    QueueActions(QueueActions),
    RegisterActions,
    RequestError(RequestError),
}

/// Tag-only mirror of [`Update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    BuildSource,
    BuildJobCreated,
    State,
    BuildState,
    BuildStarted,
    BuildFinished,
    JobState,
    JobEmergencyAbort,
    JobStarted,
    JobFinished,
    StepState,
    OutputItem,
    StdOut,
    QueueActions,
    RegisterActions,
    RequestError,
}

impl UpdateKind {
    pub const ALL: [UpdateKind; 16] = [
        UpdateKind::BuildSource,
        UpdateKind::BuildJobCreated,
        UpdateKind::State,
        UpdateKind::BuildState,
        UpdateKind::BuildStarted,
        UpdateKind::BuildFinished,
        UpdateKind::JobState,
        UpdateKind::JobEmergencyAbort,
        UpdateKind::JobStarted,
        UpdateKind::JobFinished,
        UpdateKind::StepState,
        UpdateKind::OutputItem,
        UpdateKind::StdOut,
        UpdateKind::QueueActions,
        UpdateKind::RegisterActions,
        UpdateKind::RequestError,
    ];

    /// Wire tag of the variant.
    pub fn tag(self) -> &'static str {
        match self {
            UpdateKind::BuildSource => "BuildSource",
            UpdateKind::BuildJobCreated => "BuildJobCreated",
            UpdateKind::State => "State",
            UpdateKind::BuildState => "BuildState",
            UpdateKind::BuildStarted => "BuildStarted",
            UpdateKind::BuildFinished => "BuildFinished",
            UpdateKind::JobState => "JobState",
            UpdateKind::JobEmergencyAbort => "JobEmergencyAbort",
            UpdateKind::JobStarted => "JobStarted",
            UpdateKind::JobFinished => "JobFinished",
            UpdateKind::StepState => "StepState",
            UpdateKind::OutputItem => "OutputItem",
            UpdateKind::StdOut => "StdOut",
            UpdateKind::QueueActions => "QueueActions",
            UpdateKind::RegisterActions => "RegisterActions",
            UpdateKind::RequestError => "RequestError",
        }
    }

    /// Generated updates are derived from recorded ones and never persisted.
    pub fn is_generated(self) -> bool {
        match self {
            UpdateKind::BuildState
            | UpdateKind::BuildStarted
            | UpdateKind::BuildFinished
            | UpdateKind::JobStarted
            | UpdateKind::JobFinished
            | UpdateKind::QueueActions
            | UpdateKind::RegisterActions
            | UpdateKind::RequestError => true,

            UpdateKind::BuildSource
            | UpdateKind::BuildJobCreated
            | UpdateKind::State
            | UpdateKind::JobState
            | UpdateKind::JobEmergencyAbort
            | UpdateKind::StepState
            | UpdateKind::OutputItem
            | UpdateKind::StdOut => false,
        }
    }

    /// Constructor invoked by the registry with the message's fields.
    pub fn constructor(self) -> Constructor {
        match self {
            UpdateKind::BuildSource => registry::build_source,
            UpdateKind::BuildJobCreated => registry::build_job_created,
            UpdateKind::State => registry::state,
            UpdateKind::BuildState => registry::build_state,
            UpdateKind::BuildStarted => registry::build_started,
            UpdateKind::BuildFinished => registry::build_finished,
            UpdateKind::JobState => registry::job_state,
            UpdateKind::JobEmergencyAbort => registry::job_emergency_abort,
            UpdateKind::JobStarted => registry::job_started,
            UpdateKind::JobFinished => registry::job_finished,
            UpdateKind::StepState => registry::step_state,
            UpdateKind::OutputItem => registry::output_item,
            UpdateKind::StdOut => registry::std_out,
            UpdateKind::QueueActions => registry::queue_actions,
            UpdateKind::RegisterActions => registry::register_actions,
            UpdateKind::RequestError => registry::request_error,
        }
    }
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn fields_of<T: Serialize>(value: &T) -> Result<Map<String, Value>, UpdateError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(UpdateError::Malformed(format!("expected a field map, got {other}"))),
        Err(e) => Err(UpdateError::Malformed(e.to_string())),
    }
}

impl Update {
    pub fn kind(&self) -> UpdateKind {
        match self {
            Update::BuildSource(_) => UpdateKind::BuildSource,
            Update::BuildJobCreated(_) => UpdateKind::BuildJobCreated,
            Update::State(_) => UpdateKind::State,
            Update::BuildState(_) => UpdateKind::BuildState,
            Update::BuildStarted => UpdateKind::BuildStarted,
            Update::BuildFinished => UpdateKind::BuildFinished,
            Update::JobState(_) => UpdateKind::JobState,
            Update::JobEmergencyAbort(_) => UpdateKind::JobEmergencyAbort,
            Update::JobStarted(_) => UpdateKind::JobStarted,
            Update::JobFinished(_) => UpdateKind::JobFinished,
            Update::StepState(_) => UpdateKind::StepState,
            Update::OutputItem(_) => UpdateKind::OutputItem,
            Update::StdOut(_) => UpdateKind::StdOut,
            Update::QueueActions(_) => UpdateKind::QueueActions,
            Update::RegisterActions => UpdateKind::RegisterActions,
            Update::RequestError(_) => UpdateKind::RequestError,
        }
    }

    pub fn tag(&self) -> &'static str {
        self.kind().tag()
    }

    pub fn is_generated(&self) -> bool {
        self.kind().is_generated()
    }

    /// Canonical field map: the `type` tag first, then every persisted field.
    pub fn dump(&self) -> Result<Map<String, Value>, UpdateError> {
        let fields = match self {
            Update::BuildSource(u) => fields_of(u)?,
            Update::BuildJobCreated(u) => fields_of(u)?,
            Update::State(u) | Update::BuildState(u) => fields_of(u)?,
            Update::JobState(u) => fields_of(u)?,
            Update::JobEmergencyAbort(u) => fields_of(u)?,
            Update::JobStarted(u) | Update::JobFinished(u) => fields_of(u)?,
            Update::StepState(u) => fields_of(u)?,
            Update::OutputItem(u) => fields_of(u)?,
            Update::StdOut(u) => fields_of(u)?,
            Update::RequestError(u) => fields_of(u)?,
            Update::BuildStarted | Update::BuildFinished | Update::RegisterActions => Map::new(),
            Update::QueueActions(_) => {
                return Err(UpdateError::NotSerializable(UpdateKind::QueueActions.tag()))
            }
        };
        let mut map = Map::with_capacity(fields.len() + 1);
        map.insert("type".to_string(), Value::String(self.tag().to_string()));
        map.extend(fields);
        Ok(map)
    }

    /// Wire JSON of the update, as broadcast and written to the log.
    pub fn serialize(&self) -> Result<String, UpdateError> {
        serde_json::to_string(&Value::Object(self.dump()?))
            .map_err(|e| UpdateError::Malformed(e.to_string()))
    }

    /// Build an update from its wire JSON using the process-wide registry.
    pub fn construct(json: &str) -> Result<Update, ReconstructionError> {
        Self::construct_with_clock(json, &SystemClock)
    }

    /// Like [`Update::construct`], taking the default `time` from `clock`.
    pub fn construct_with_clock(
        json: &str,
        clock: &impl Clock,
    ) -> Result<Update, ReconstructionError> {
        let value: Value = serde_json::from_str(json).map_err(|e| ReconstructionError {
            tag: String::new(),
            json: json.to_string(),
            source: UpdateError::Malformed(e.to_string()),
        })?;
        Registry::global().construct(value, clock.epoch_secs())
    }

    /// Apply the update's effect to a live job. Only step states and output
    /// items change a job; everything else is a no-op.
    pub fn apply_to<J: JobTarget + ?Sized>(&self, job: &mut J) {
        match self {
            Update::StepState(u) => u.apply_to(job),
            Update::OutputItem(u) => u.apply_to(job),
            Update::BuildSource(_)
            | Update::BuildJobCreated(_)
            | Update::State(_)
            | Update::BuildState(_)
            | Update::BuildStarted
            | Update::BuildFinished
            | Update::JobState(_)
            | Update::JobEmergencyAbort(_)
            | Update::JobStarted(_)
            | Update::JobFinished(_)
            | Update::StdOut(_)
            | Update::QueueActions(_)
            | Update::RegisterActions
            | Update::RequestError(_) => {}
        }
    }
}

#[cfg(test)]
#[path = "serialize_tests.rs"]
mod serialize_tests;


#[cfg(test)]
#[path = "apply_tests.rs"]
mod apply_tests;
