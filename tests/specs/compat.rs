// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire compatibility specs
//!
//! Historical logs must still load, and re-serializing what they contain
//! must produce the current canonical form.

use crate::prelude::*;
use kevin_core::{BuildJobCreated, BuildSource};
use similar_asserts::assert_eq;

#[test]
fn legacy_log_loads_completely() {
    let state = StateDir::new();
    let path = state.write_log(LEGACY_LOG);

    let entries = read_log(&path).unwrap();

    assert_eq!(entries.len(), 12);
    assert_eq!(entries.last().map(|e| e.seq), Some(12));
    assert!(entries.iter().all(|e| !e.update.is_generated()));
}

#[test]
fn legacy_job_created_becomes_build_job_created() {
    let state = StateDir::new();
    let entries = read_log(&state.write_log(LEGACY_LOG)).unwrap();

    assert_eq!(
        entries[1].update,
        Update::BuildJobCreated(BuildJobCreated::new("debian", "debian-vm"))
    );
    assert_eq!(
        entries[1].update.serialize().unwrap(),
        r#"{"type":"BuildJobCreated","job_name":"debian","machine_name":"debian-vm"}"#
    );
}

#[test]
fn legacy_nulls_are_dropped_on_rewrite() {
    let state = StateDir::new();
    let entries = read_log(&state.write_log(LEGACY_LOG)).unwrap();

    let expected = BuildSource::new("https://git.example/kevin.git")
        .repo_url("https://git.example/kevin")
        .author("sft")
        .branch("master");
    assert_eq!(entries[0].update, Update::BuildSource(expected));
    assert_eq!(
        entries[0].update.serialize().unwrap(),
        r#"{"type":"BuildSource","clone_url":"https://git.example/kevin.git","repo_url":"https://git.example/kevin","author":"sft","branch":"master"}"#
    );
}

#[test]
fn legacy_step_numbers_are_read_but_not_rewritten() {
    let state = StateDir::new();
    let entries = read_log(&state.write_log(LEGACY_LOG)).unwrap();

    let Update::StepState(step) = &entries[5].update else {
        panic!("expected StepState, got {:?}", entries[5].update)
    };
    assert_eq!(step.step_number(), Some(0));
    let rewritten = Update::construct(&entries[5].update.serialize().unwrap()).unwrap();
    assert_eq!(rewritten, Update::StepState(step.without_step_number()));
}

#[test]
fn rewriting_a_legacy_log_is_stable() {
    let state = StateDir::new();
    let entries = read_log(&state.write_log(LEGACY_LOG)).unwrap();

    let out = state.dir.path().join("rewritten.log");
    let mut log = UpdateLog::open(&out).unwrap();
    for entry in &entries {
        log.append(&entry.update).unwrap();
    }
    log.flush().unwrap();
    let first = std::fs::read_to_string(&out).unwrap();

    let again = state.dir.path().join("again.log");
    let mut log = UpdateLog::open(&again).unwrap();
    for entry in read_log(&out).unwrap() {
        log.append(&entry.update).unwrap();
    }
    log.flush().unwrap();

    assert_eq!(first, std::fs::read_to_string(&again).unwrap());
    assert!(first.lines().all(|line| line.starts_with(r#"{"type":""#)));
}

#[test]
fn legacy_emergency_abort_keeps_its_error_state() {
    let state = StateDir::new();
    let entries = read_log(&state.write_log(LEGACY_LOG)).unwrap();

    let Some(Update::JobEmergencyAbort(abort)) = entries.last().map(|e| &e.update) else {
        panic!("expected JobEmergencyAbort, got {:?}", entries.last())
    };
    assert_eq!(abort.job_name(), "arch");
    assert_eq!(abort.state(), BuildStatus::Error);
    assert_eq!(
        entries[11].update.serialize().unwrap(),
        r#"{"type":"JobEmergencyAbort","project_name":"kevin","build_id":"0123abcd","job_name":"arch","state":"error","text":"vm went away","time":1400000020.0}"#
    );
}
