// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kevin-core: the update vocabulary of the kevin CI service.
//!
//! Every state change of a build is an immutable [`Update`]. Recorded
//! updates are appended to the build log and replayed on restart; generated
//! updates are re-derived from the recorded ones and only ever broadcast.

pub mod macros;

pub mod clock;
pub mod error;
pub mod job;
pub mod state;
pub mod update;
pub mod validate;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use error::{ReconstructionError, RegistryError, SchemaError, UpdateError, ValidationError};
pub use job::{JobRecord, JobTarget, StepRecord};
pub use state::BuildStatus;
pub use update::{
    BuildJobCreated, BuildKey, BuildSource, Constructor, Fields, JobEmergencyAbort, JobMarker,
    JobState, OutputItem, Project, QueueActions, Registry, RequestError, StateChange,
    StatePayload, StdOut, StepState, TaskQueue, Update, UpdateKind,
};
