// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized build state from log replay

use indexmap::{IndexMap, IndexSet};
use kevin_core::{
    BuildKey, BuildSource, BuildStatus, JobMarker, JobRecord, StateChange, StatePayload, Update,
};
use serde::Serialize;

/// A build as seen by replaying its recorded updates in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildView {
    /// Taken from the first update that carries a build key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildKey>,
    pub sources: Vec<BuildSource>,
    /// Latest `State` reported for the build itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatePayload>,
    /// Jobs in the order they first appeared.
    pub jobs: IndexMap<String, JobRecord>,
    #[serde(skip)]
    started_jobs: IndexSet<String>,
    #[serde(skip)]
    finished_jobs: IndexSet<String>,
    #[serde(skip)]
    started: bool,
    #[serde(skip)]
    finished: bool,
}

impl BuildView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job(&self, name: &str) -> Option<&JobRecord> {
        self.jobs.get(name)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Apply a recorded update and return the generated updates it implies.
    ///
    /// The result depends only on the sequence of updates applied so far,
    /// so replaying the same log prefix always yields the same output.
    /// Generated inputs are ignored.
    pub fn apply(&mut self, update: &Update) -> Vec<Update> {
        if update.is_generated() {
            tracing::debug!(update = %update.log_summary(), "ignoring generated update");
            return Vec::new();
        }
        if self.build.is_none() {
            self.build = update.build_key().cloned();
        }

        let mut generated = Vec::new();
        match update {
            Update::BuildSource(source) => self.sources.push(source.clone()),
            Update::BuildJobCreated(created) => {
                self.job_mut(&created.job_name).machine_name = Some(created.machine_name.clone());
            }
            Update::State(change) => self.status = Some(change.status.clone()),
            Update::JobState(state) => {
                self.job_mut(&state.job_name).apply_state(state);
                self.transitions(&state.job_name, &state.build, &state.status, &mut generated);
            }
            Update::JobEmergencyAbort(abort) => {
                self.job_mut(abort.job_name()).set_status(abort.status());
                self.transitions(abort.job_name(), abort.build(), abort.status(), &mut generated);
            }
            Update::StepState(step) => step.apply_to(self.job_mut(step.job_name())),
            Update::OutputItem(item) => item.apply_to(self.job_mut(item.job_name())),
            Update::StdOut(out) => {
                self.job_mut(&out.job_name);
            }

            // Generated; filtered above
            Update::BuildState(_)
            | Update::BuildStarted
            | Update::BuildFinished
            | Update::JobStarted(_)
            | Update::JobFinished(_)
            | Update::QueueActions(_)
            | Update::RegisterActions
            | Update::RequestError(_) => {}
        }
        generated
    }

    fn job_mut(&mut self, name: &str) -> &mut JobRecord {
        self.jobs.entry(name.to_string()).or_insert_with(|| JobRecord::new(name))
    }

    /// A job counts as started once it leaves `waiting`, and as finished
    /// once it reaches a terminal state. Each is reported at most once.
    /// Build completion is checked on every terminal job state, repeated
    /// ones included.
    fn transitions(
        &mut self,
        job_name: &str,
        build: &BuildKey,
        status: &StatePayload,
        out: &mut Vec<Update>,
    ) {
        if status.state() != BuildStatus::Waiting && self.started_jobs.insert(job_name.to_string()) {
            if !self.started {
                self.started = true;
                out.push(Update::BuildStarted);
            }
            out.push(Update::JobStarted(JobMarker::new(job_name)));
        }
        if status.is_completed() {
            if self.finished_jobs.insert(job_name.to_string()) {
                out.push(Update::JobFinished(JobMarker::new(job_name)));
            }
            self.check_finished(build, status.time(), out);
        }
    }

    fn check_finished(&mut self, build: &BuildKey, time: f64, out: &mut Vec<Update>) {
        if self.finished || !self.jobs.values().all(JobRecord::is_terminal) {
            return;
        }
        let Some(state) = self.jobs.values().map(|job| job.state).reduce(BuildStatus::worst) else {
            return;
        };
        let succeeded = self.jobs.values().filter(|job| job.state.is_successful()).count();
        let text = format!("{succeeded}/{} jobs succeeded", self.jobs.len());
        let status = match StatePayload::new(state, text, time) {
            Ok(status) => status,
            Err(err) => {
                tracing::warn!(error = %err, "cannot derive the final build state");
                return;
            }
        };
        let build = self.build.clone().unwrap_or_else(|| build.clone());
        tracing::info!(
            project = %build.project_name,
            build = %build.build_id,
            state = %state,
            "build finished"
        );
        self.finished = true;
        out.push(Update::BuildState(StateChange::new(build, status)));
        out.push(Update::BuildFinished);
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
