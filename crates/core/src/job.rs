// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job surface updates are applied to.

use crate::state::BuildStatus;
use crate::update::{JobState, OutputItem, StatePayload, StepState};
use indexmap::IndexSet;
use serde::Serialize;

/// Mutation surface of a live job.
///
/// Implemented by whatever owns the job; updates call into it through
/// [`Update::apply_to`](crate::Update::apply_to). Callers apply a build's
/// updates one at a time, in log order.
pub trait JobTarget {
    /// A step of the job changed state.
    fn step_update(&mut self, update: &StepState);

    fn add_output_item(&mut self, item: OutputItem);

    /// Bytes of output the job is still expected to produce.
    fn remaining_output_size_mut(&mut self) -> &mut i64;
}

/// Exported state of one step. The producer's step number is not kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub name: String,
    pub state: BuildStatus,
    pub text: String,
    pub time: f64,
}

/// Materialized job, rebuilt from a build's recorded updates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_name: Option<String>,
    pub state: BuildStatus,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    pub updates_merged: bool,
    /// Steps in the order they first reported.
    pub steps: Vec<StepRecord>,
    pub output_items: IndexSet<OutputItem>,
    pub remaining_output_size: i64,
}

impl JobRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            machine_name: None,
            state: BuildStatus::Waiting,
            text: String::new(),
            time: None,
            updates_merged: false,
            steps: Vec::new(),
            output_items: IndexSet::new(),
            remaining_output_size: 0,
        }
    }

    pub fn with_output_budget(mut self, bytes: i64) -> Self {
        self.remaining_output_size = bytes;
        self
    }

    pub fn set_status(&mut self, status: &StatePayload) {
        self.state = status.state;
        self.text.clone_from(&status.text);
        self.time = Some(status.time);
    }

    pub fn apply_state(&mut self, update: &JobState) {
        self.set_status(&update.status);
        self.updates_merged |= update.updates_merged;
    }

    pub fn step(&self, name: &str) -> Option<&StepRecord> {
        self.steps.iter().find(|s| s.name == name)
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

impl JobTarget for JobRecord {
    fn step_update(&mut self, update: &StepState) {
        let record = StepRecord {
            name: update.step_name.clone(),
            state: update.status.state,
            text: update.status.text.clone(),
            time: update.status.time,
        };
        match self.steps.iter_mut().find(|s| s.name == update.step_name) {
            Some(existing) => *existing = record,
            None => self.steps.push(record),
        }
    }

    fn add_output_item(&mut self, item: OutputItem) {
        self.output_items.insert(item);
    }

    fn remaining_output_size_mut(&mut self) -> &mut i64 {
        &mut self.remaining_output_size
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
