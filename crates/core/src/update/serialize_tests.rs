// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for `Update::dump()` and `Update::serialize()`.

use super::*;
use crate::state::BuildStatus;
use crate::test_support::*;
use serde_json::json;
use std::sync::Arc;

#[test]
fn dump_puts_type_tag_first() {
    let update = job_state_update("linux", BuildStatus::Running, 10.0);
    let dumped = update.dump().unwrap();
    let keys: Vec<&str> = dumped.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["type", "project_name", "build_id", "job_name", "state", "text", "time", "updates_merged"]
    );
    assert_eq!(dumped["type"], "JobState");
}

#[test]
fn step_state_never_emits_step_number() {
    let Update::StepState(step) = step_state_update("linux", "compile", BuildStatus::Success, 3.0)
    else {
        unreachable!()
    };
    let update = Update::StepState(step.with_step_number(7));
    let dumped = update.dump().unwrap();
    assert!(!dumped.contains_key("step_number"));
    assert!(!update.serialize().unwrap().contains("step_number"));
}

#[test]
fn build_source_omits_absent_optionals() {
    let update = Update::BuildSource(BuildSource::new("https://git.example/r.git").author("ada"));
    assert_eq!(
        Value::Object(update.dump().unwrap()),
        json!({"type": "BuildSource", "clone_url": "https://git.example/r.git", "author": "ada"})
    );
}

#[test]
fn markers_dump_only_the_tag() {
    for update in [Update::BuildStarted, Update::BuildFinished, Update::RegisterActions] {
        let dumped = update.dump().unwrap();
        assert_eq!(dumped.len(), 1, "{update:?}");
        assert_eq!(dumped["type"], update.tag());
    }
}

#[test]
fn job_emergency_abort_serializes_as_an_error_state() {
    let abort = JobEmergencyAbort::new(build_key(), "linux", "double fault", 5.0).unwrap();
    assert_eq!(abort.state(), BuildStatus::Error);
    assert_eq!(
        Value::Object(Update::JobEmergencyAbort(abort).dump().unwrap()),
        json!({
            "type": "JobEmergencyAbort",
            "project_name": PROJECT,
            "build_id": BUILD,
            "job_name": "linux",
            "state": "error",
            "text": "double fault",
            "time": 5.0,
        })
    );
}

#[derive(Debug)]
struct Queue;

impl TaskQueue for Queue {
    fn name(&self) -> &str {
        "queue"
    }
}

#[derive(Debug)]
struct Proj;

impl Project for Proj {
    fn name(&self) -> &str {
        "proj"
    }
}

#[test]
fn queue_actions_cannot_be_serialized() {
    let update = Update::QueueActions(QueueActions::new("b1", Arc::new(Queue), Arc::new(Proj)));
    assert!(update.is_generated());
    assert_eq!(update.dump(), Err(UpdateError::NotSerializable("QueueActions")));
    assert_eq!(update.serialize(), Err(UpdateError::NotSerializable("QueueActions")));
}

#[test]
fn queue_actions_equality_is_by_handle() {
    let queue: Arc<dyn TaskQueue> = Arc::new(Queue);
    let project: Arc<dyn Project> = Arc::new(Proj);
    let a = QueueActions::new("b1", queue.clone(), project.clone());
    let b = QueueActions::new("b1", queue, project);
    let c = QueueActions::new("b1", Arc::new(Queue), Arc::new(Proj));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn serialize_is_compact_single_line_json() {
    let update = stdout_update("linux", "line one\nline two\n");
    let line = update.serialize().unwrap();
    assert!(!line.contains('\n'));
    assert_eq!(
        line,
        r#"{"type":"StdOut","job_name":"linux","data":"line one\nline two\n"}"#
    );
}

#[test]
fn generated_updates_still_serialize_for_broadcast() {
    let update = Update::BuildState(StateChange::new(build_key(), status(BuildStatus::Success, 9.0)));
    assert!(update.is_generated());
    let line = update.serialize().unwrap();
    assert!(line.starts_with(r#"{"type":"BuildState""#), "{line}");
}

#[yare::parameterized(
    build_source   = { UpdateKind::BuildSource,       false },
    job_created    = { UpdateKind::BuildJobCreated,   false },
    state          = { UpdateKind::State,             false },
    build_state    = { UpdateKind::BuildState,        true },
    build_started  = { UpdateKind::BuildStarted,      true },
    build_finished = { UpdateKind::BuildFinished,     true },
    job_state      = { UpdateKind::JobState,          false },
    emergency      = { UpdateKind::JobEmergencyAbort, false },
    job_started    = { UpdateKind::JobStarted,        true },
    job_finished   = { UpdateKind::JobFinished,       true },
    step_state     = { UpdateKind::StepState,         false },
    output_item    = { UpdateKind::OutputItem,        false },
    std_out        = { UpdateKind::StdOut,            false },
    queue_actions  = { UpdateKind::QueueActions,      true },
    register       = { UpdateKind::RegisterActions,   true },
    request_error  = { UpdateKind::RequestError,      true },
)]
fn generated_classification(kind: UpdateKind, generated: bool) {
    assert_eq!(kind.is_generated(), generated);
    assert_eq!(kind.to_string(), kind.tag());
}
