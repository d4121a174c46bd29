// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

#![allow(clippy::unwrap_used)]

use crate::state::BuildStatus;
use crate::update::{
    BuildJobCreated, BuildKey, BuildSource, JobState, OutputItem, StatePayload, StdOut, StepState,
    Update,
};

pub const PROJECT: &str = "kevin";
pub const BUILD: &str = "0123abcd";

pub fn build_key() -> BuildKey {
    BuildKey::new(PROJECT, BUILD)
}

pub fn status(state: BuildStatus, time: f64) -> StatePayload {
    StatePayload::new(state, format!("{state} at {time}"), time).unwrap()
}

// ── Update factory functions ────────────────────────────────────────────────

pub fn source_update(clone_url: &str) -> Update {
    Update::BuildSource(BuildSource::new(clone_url).branch("main"))
}

pub fn job_created_update(job: &str) -> Update {
    Update::BuildJobCreated(BuildJobCreated::new(job, format!("{job}-vm")))
}

pub fn job_state_update(job: &str, state: BuildStatus, time: f64) -> Update {
    Update::JobState(JobState::new(build_key(), job, status(state, time)))
}

pub fn step_state_update(job: &str, step: &str, state: BuildStatus, time: f64) -> Update {
    Update::StepState(StepState::new(build_key(), job, step, status(state, time)).unwrap())
}

pub fn output_item_update(job: &str, name: &str, size: u64) -> Update {
    Update::OutputItem(OutputItem::new(job, name, false, size).unwrap())
}

pub fn stdout_update(job: &str, data: &str) -> Update {
    Update::StdOut(StdOut::new(job, data))
}

// ── Proptest strategies ─────────────────────────────────────────────────────

/// Proptest strategies producing valid, recorded updates.
pub mod strategies {
    use super::build_key;
    use crate::state::BuildStatus;
    use crate::update::{
        BuildJobCreated, BuildKey, BuildSource, JobEmergencyAbort, JobMarker, JobState, OutputItem,
        RequestError, StateChange, StatePayload, StdOut, StepState, Update,
    };
    use proptest::prelude::*;

    pub fn arb_build_status() -> impl Strategy<Value = BuildStatus> {
        prop::sample::select(BuildStatus::ALL.to_vec())
    }

    pub fn arb_identifier() -> impl Strategy<Value = String> {
        "[a-zA-Z_][a-zA-Z0-9_]{0,12}"
    }

    pub fn arb_printable() -> impl Strategy<Value = String> {
        "[ -~]{0,24}"
    }

    pub fn arb_output_name() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9._-]{0,12}"
    }

    /// Millisecond resolution, which `float_roundtrip` keeps exact.
    pub fn arb_time() -> impl Strategy<Value = f64> {
        (0u32..2_000_000_000, 0u32..1000)
            .prop_map(|(secs, millis)| f64::from(secs) + f64::from(millis) / 1000.0)
    }

    pub fn arb_status() -> impl Strategy<Value = StatePayload> {
        (arb_build_status(), arb_printable(), arb_time())
            .prop_map(|(state, text, time)| StatePayload::new(state, text, time).unwrap())
    }

    fn arb_build_key() -> impl Strategy<Value = BuildKey> {
        prop_oneof![Just(build_key()), (arb_identifier(), "[0-9a-f]{8,40}").prop_map(|(p, b)| BuildKey::new(p, b))]
    }

    pub fn arb_recorded_update() -> impl Strategy<Value = Update> {
        prop_oneof![
            (
                "https://[a-z]{3,8}\\.example/[a-z]{1,8}\\.git",
                proptest::option::of(arb_identifier()),
                proptest::option::of(arb_printable()),
            )
                .prop_map(|(url, branch, comment)| {
                    let mut source = BuildSource::new(url);
                    source.branch = branch;
                    source.comment = comment;
                    Update::BuildSource(source)
                }),
            (arb_identifier(), arb_identifier())
                .prop_map(|(job, machine)| Update::BuildJobCreated(BuildJobCreated::new(job, machine))),
            (arb_build_key(), arb_status())
                .prop_map(|(key, status)| Update::State(StateChange::new(key, status))),
            (arb_build_key(), arb_identifier(), arb_status(), any::<bool>()).prop_map(
                |(key, job, status, merged)| {
                    let state = JobState::new(key, job, status);
                    Update::JobState(if merged { state.with_updates_merged() } else { state })
                }
            ),
            (arb_build_key(), arb_identifier(), arb_printable(), arb_time()).prop_map(
                |(key, job, text, time)| {
                    Update::JobEmergencyAbort(JobEmergencyAbort::new(key, job, text, time).unwrap())
                }
            ),
            (arb_build_key(), arb_identifier(), arb_identifier(), arb_status()).prop_map(
                |(key, job, step, status)| {
                    Update::StepState(StepState::new(key, job, step, status).unwrap())
                }
            ),
            (arb_identifier(), arb_output_name(), any::<bool>(), proptest::option::of(arb_identifier()), any::<u32>())
                .prop_map(|(job, name, isdir, step_name, size)| {
                    let item = OutputItem::new(job, name, isdir, u64::from(size)).unwrap();
                    Update::OutputItem(match step_name {
                        Some(step) => item.with_step(step),
                        None => item,
                    })
                }),
            (arb_identifier(), any::<String>(), proptest::option::of(arb_identifier())).prop_map(
                |(job, data, step_name)| {
                    let out = StdOut::new(job, data);
                    Update::StdOut(match step_name {
                        Some(step) => out.with_step(step),
                        None => out,
                    })
                }
            ),
        ]
    }

    /// Generated updates that can go over the wire. `QueueActions` holds
    /// live handles and is left out.
    pub fn arb_generated_update() -> impl Strategy<Value = Update> {
        prop_oneof![
            (arb_build_key(), arb_status())
                .prop_map(|(key, status)| Update::BuildState(StateChange::new(key, status))),
            Just(Update::BuildStarted),
            Just(Update::BuildFinished),
            arb_identifier().prop_map(|job| Update::JobStarted(JobMarker::new(job))),
            arb_identifier().prop_map(|job| Update::JobFinished(JobMarker::new(job))),
            Just(Update::RegisterActions),
            arb_printable().prop_map(|text| Update::RequestError(RequestError::new(text))),
        ]
    }

    /// Every update that `serialize` accepts.
    pub fn arb_serializable_update() -> impl Strategy<Value = Update> {
        prop_oneof![arb_recorded_update(), arb_generated_update()]
    }
}
