// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Update methods: log summary, job and build key extraction

use super::{BuildKey, Update};

impl Update {
    /// One-line description for log messages: `"{tag} key=value ..."`.
    pub fn log_summary(&self) -> String {
        let t = self.tag();
        match self {
            Update::BuildSource(s) => format!("{t} clone_url={}", s.clone_url),
            Update::BuildJobCreated(c) => {
                format!("{t} job={} machine={}", c.job_name, c.machine_name)
            }
            Update::State(s) | Update::BuildState(s) => format!(
                "{t} project={} build={} state={}",
                s.build.project_name, s.build.build_id, s.status.state
            ),
            Update::JobState(s) => format!("{t} job={} state={}", s.job_name, s.status.state),
            Update::JobEmergencyAbort(a) => format!("{t} job={}", a.job_name()),
            Update::JobStarted(m) | Update::JobFinished(m) => format!("{t} job={}", m.job_name),
            Update::StepState(s) => {
                format!("{t} job={} step={} state={}", s.job_name, s.step_name, s.status.state)
            }
            Update::OutputItem(o) => {
                format!("{t} job={} name={} size={}", o.job_name, o.name, o.size)
            }
            Update::StdOut(o) => format!("{t} job={} bytes={}", o.job_name, o.data.len()),
            Update::QueueActions(q) => format!("{t} build={}", q.build_id),
            Update::RequestError(e) => format!("{t} text={:?}", e.text),
            Update::BuildStarted | Update::BuildFinished | Update::RegisterActions => t.to_string(),
        }
    }

    /// Name of the job this update targets, if it is job-scoped.
    pub fn job_name(&self) -> Option<&str> {
        match self {
            Update::BuildJobCreated(c) => Some(&c.job_name),
            Update::JobState(s) => Some(&s.job_name),
            Update::JobEmergencyAbort(a) => Some(&a.job_name),
            Update::JobStarted(m) | Update::JobFinished(m) => Some(&m.job_name),
            Update::StepState(s) => Some(&s.job_name),
            Update::OutputItem(o) => Some(&o.job_name),
            Update::StdOut(o) => Some(&o.job_name),
            _ => None,
        }
    }

    /// Project and build id, for the updates that carry them on the wire.
    pub fn build_key(&self) -> Option<&BuildKey> {
        match self {
            Update::State(s) | Update::BuildState(s) => Some(&s.build),
            Update::JobState(s) => Some(&s.build),
            Update::JobEmergencyAbort(a) => Some(&a.build),
            Update::StepState(s) => Some(&s.build),
            _ => None,
        }
    }
}
