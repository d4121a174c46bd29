// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for `Update::apply_to()`.

use super::*;
use crate::job::JobRecord;
use crate::state::BuildStatus;
use crate::test_support::*;

/// Records every call made through the job surface.
#[derive(Default)]
struct RecordingJob {
    step_updates: Vec<StepState>,
    items: Vec<OutputItem>,
    remaining: i64,
}

impl JobTarget for RecordingJob {
    fn step_update(&mut self, update: &StepState) {
        self.step_updates.push(update.clone());
    }

    fn add_output_item(&mut self, item: OutputItem) {
        self.items.push(item);
    }

    fn remaining_output_size_mut(&mut self) -> &mut i64 {
        &mut self.remaining
    }
}

#[test]
fn output_item_charges_the_budget() {
    let mut job = RecordingJob { remaining: 500, ..Default::default() };
    let update = output_item_update("linux", "a", 100);
    update.apply_to(&mut job);
    assert_eq!(job.remaining, 400);
    let Update::OutputItem(item) = update else { unreachable!() };
    assert_eq!(job.items, vec![item]);
    assert!(job.step_updates.is_empty());
}

#[test]
fn output_item_may_drive_the_budget_negative() {
    let mut job = RecordingJob { remaining: 10, ..Default::default() };
    output_item_update("linux", "big", 25).apply_to(&mut job);
    assert_eq!(job.remaining, -15);
}

#[test]
fn step_state_calls_step_update_exactly_once() {
    let mut job = RecordingJob::default();
    let update = step_state_update("linux", "compile", BuildStatus::Running, 2.0);
    update.apply_to(&mut job);
    let Update::StepState(step) = update else { unreachable!() };
    assert_eq!(job.step_updates, vec![step]);
    assert!(job.items.is_empty());
    assert_eq!(job.remaining, 0);
}

#[test]
fn other_updates_leave_the_job_alone() {
    let updates = [
        source_update("https://git.example/r.git"),
        job_created_update("linux"),
        Update::State(StateChange::new(build_key(), status(BuildStatus::Running, 1.0))),
        Update::BuildState(StateChange::new(build_key(), status(BuildStatus::Running, 1.0))),
        Update::BuildStarted,
        Update::BuildFinished,
        job_state_update("linux", BuildStatus::Success, 3.0),
        Update::JobEmergencyAbort(JobEmergencyAbort::new(build_key(), "linux", "abort", 3.0).unwrap()),
        Update::JobStarted(JobMarker::new("linux")),
        Update::JobFinished(JobMarker::new("linux")),
        stdout_update("linux", "hello\n"),
        Update::RegisterActions,
        Update::RequestError(RequestError::new("nope")),
    ];
    let mut job = RecordingJob { remaining: 7, ..Default::default() };
    for update in &updates {
        update.apply_to(&mut job);
    }
    assert!(job.step_updates.is_empty());
    assert!(job.items.is_empty());
    assert_eq!(job.remaining, 7);
}

#[test]
fn job_record_collects_steps_and_items() {
    let mut job = JobRecord::new("linux").with_output_budget(1_000);
    step_state_update("linux", "compile", BuildStatus::Running, 1.0).apply_to(&mut job);
    step_state_update("linux", "test", BuildStatus::Running, 2.0).apply_to(&mut job);
    step_state_update("linux", "compile", BuildStatus::Success, 3.0).apply_to(&mut job);
    output_item_update("linux", "binary", 300).apply_to(&mut job);

    let names: Vec<&str> = job.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["compile", "test"]);
    assert_eq!(job.step("compile").map(|s| s.state), Some(BuildStatus::Success));
    assert_eq!(job.output_items.len(), 1);
    assert_eq!(job.remaining_output_size, 700);
}

#[test]
fn apply_works_through_a_trait_object() {
    let mut job = JobRecord::new("linux").with_output_budget(50);
    let target: &mut dyn JobTarget = &mut job;
    output_item_update("linux", "log", 20).apply_to(target);
    assert_eq!(job.remaining_output_size, 30);
}
