// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replay specs
//!
//! Generated updates are never on disk; replaying a log re-derives them.

use crate::prelude::*;
use kevin_core::JobMarker;
use similar_asserts::assert_eq;

#[test]
fn legacy_log_replays_to_a_finished_build() {
    let state = StateDir::new();
    let replay = replay(&state.write_log(LEGACY_LOG)).unwrap();

    assert_eq!(replay.entries, 12);
    assert!(replay.view.is_finished());

    let debian = replay.view.job("debian").unwrap();
    assert_eq!(debian.machine_name.as_deref(), Some("debian-vm"));
    assert_eq!(debian.state, BuildStatus::Success);
    assert!(debian.updates_merged);
    assert_eq!(debian.steps.len(), 1);
    assert_eq!(debian.output_items.len(), 1);

    let arch = replay.view.job("arch").unwrap();
    assert_eq!(arch.state, BuildStatus::Error);
    assert_eq!(arch.text, "vm went away");

    let Some(Update::BuildState(change)) = replay.generated.iter().rev().nth(1) else {
        panic!("no build state in {:?}", replay.generated)
    };
    assert_eq!(change.status.state(), BuildStatus::Error);
    assert_eq!(change.status.time(), 1_400_000_020.0);
    assert_eq!(change.build.build_id, BUILD);
}

#[test]
fn live_publish_and_replay_agree() {
    let state = StateDir::new();
    let path = state.log_path();
    let mut publisher = Publisher::from_config(UpdateLog::open(&path).unwrap(), &state.config);
    let mut rx = publisher.subscribe();

    let history = [
        source_update("https://git.example/kevin.git"),
        job_created_update("debian"),
        job_state_update("debian", BuildStatus::Running, 1.0),
        step_state_update("debian", "make", BuildStatus::Success, 2.0),
        job_state_update("debian", BuildStatus::Success, 3.0),
    ];
    let mut live = Vec::new();
    for update in &history {
        live.extend(publisher.publish(update).unwrap());
    }
    publisher.into_sink().flush().unwrap();

    let mut broadcast = Vec::new();
    while let Ok(line) = rx.try_recv() {
        broadcast.push(Update::construct(&line).unwrap());
    }
    assert_eq!(broadcast.len(), history.len() + live.len());

    let replayed = replay(&path).unwrap();
    assert_eq!(replayed.generated, live);
    assert_eq!(
        live,
        vec![
            Update::BuildStarted,
            Update::JobStarted(JobMarker::new("debian")),
            Update::JobFinished(JobMarker::new("debian")),
            replayed.generated[3].clone(),
            Update::BuildFinished,
        ]
    );
}

#[test]
fn log_on_disk_holds_only_recorded_updates() {
    let state = StateDir::new();
    let path = state.log_path();
    let mut publisher = Publisher::from_config(UpdateLog::open(&path).unwrap(), &state.config);
    publisher.publish(&job_created_update("debian")).unwrap();
    publisher.publish(&job_state_update("debian", BuildStatus::Skipped, 1.0)).unwrap();
    publisher.into_sink().flush().unwrap();

    let tags: Vec<&str> = read_log(&path).unwrap().iter().map(|e| e.update.tag()).collect();
    assert_eq!(tags, vec!["BuildJobCreated", "JobState"]);
}

#[test]
fn missing_times_come_from_the_clock() {
    let state = StateDir::new();
    let path = state.write_log(
        r#"{"type":"JobState","project_name":"kevin","build_id":"0123abcd","job_name":"j","state":"success","text":""}"#,
    );
    let clock = FakeClock::new();
    let entries = read_log_with_clock(&path, &clock).unwrap();
    let Update::JobState(job) = &entries[0].update else { panic!("expected JobState") };
    assert_eq!(job.status.time(), 1_000_000.0);
}
