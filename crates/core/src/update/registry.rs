// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire tag → constructor table, with compat aliases for old logs.

use super::{
    BuildJobCreated, BuildSource, Fields, JobEmergencyAbort, JobMarker, JobState, OutputItem,
    RequestError, StateChange, StdOut, StepState, Update, UpdateKind,
};
use crate::error::{ReconstructionError, RegistryError, SchemaError, UpdateError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Builds one variant from the fields of a wire message.
pub type Constructor = fn(Fields) -> Result<Update, UpdateError>;

/// Historical tag → current tag.
const TAG_ALIASES: &[(&str, &str)] = &[("JobCreated", "BuildJobCreated")];

/// Per-variant renamed fields: (tag, legacy field, current field).
const FIELD_ALIASES: &[(&str, &str, &str)] = &[("BuildJobCreated", "vm_name", "machine_name")];

/// Key that carried the tag before it was renamed to `type`.
const LEGACY_TAG_KEY: &str = "class";

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::builtin);

/// Populated once with every [`UpdateKind`], read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    constructors: HashMap<&'static str, Constructor>,
}

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding every built-in variant.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for kind in UpdateKind::ALL {
            if let Err(e) = registry.register(kind.tag(), kind.constructor()) {
                unreachable!("{e}");
            }
        }
        registry
    }

    /// The process-wide registry, built on first use.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    pub fn register(&mut self, tag: &'static str, constructor: Constructor) -> Result<(), RegistryError> {
        if self.constructors.contains_key(tag) {
            return Err(RegistryError::Duplicate(tag));
        }
        self.constructors.insert(tag, constructor);
        Ok(())
    }

    /// Map a historical tag to its current name; other tags pass through.
    pub fn resolve_alias(tag: &str) -> &str {
        TAG_ALIASES.iter().find(|(old, _)| *old == tag).map_or(tag, |(_, new)| *new)
    }

    /// Look up a constructor by its current tag.
    pub fn lookup(&self, tag: &str) -> Option<Constructor> {
        self.constructors.get(tag).copied()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Pop the tag, resolve aliases, and hand the remaining fields to the
    /// variant's constructor. `now` fills in an omitted `time`.
    pub fn construct(&self, value: Value, now: f64) -> Result<Update, ReconstructionError> {
        let json = value.to_string();
        let fail = |tag: &str, source: UpdateError| ReconstructionError {
            tag: tag.to_string(),
            json: json.clone(),
            source,
        };

        let Value::Object(mut map) = value else {
            return Err(fail("", UpdateError::Malformed("expected a JSON object".to_string())));
        };
        let tag = match map.remove("type").or_else(|| map.remove(LEGACY_TAG_KEY)) {
            Some(Value::String(tag)) => tag,
            Some(other) => {
                return Err(fail("", UpdateError::Malformed(format!("type tag is not a string: {other}"))))
            }
            None => return Err(fail("", SchemaError::MissingTag.into())),
        };

        let current = Self::resolve_alias(&tag);
        let Some(constructor) = self.lookup(current) else {
            return Err(fail(&tag, UpdateError::UnknownVariant(tag.clone())));
        };

        for (alias_tag, legacy, field) in FIELD_ALIASES {
            if *alias_tag != current {
                continue;
            }
            if let Some(old) = map.remove(*legacy) {
                let canonical_missing = map.get(*field).is_none_or(Value::is_null);
                if canonical_missing {
                    map.insert((*field).to_string(), old);
                }
            }
        }

        constructor(Fields::new(map, now)).map_err(|source| fail(&tag, source))
    }
}

pub(super) fn build_source(f: Fields) -> Result<Update, UpdateError> {
    BuildSource::from_fields(f).map(Update::BuildSource)
}

pub(super) fn build_job_created(f: Fields) -> Result<Update, UpdateError> {
    BuildJobCreated::from_fields(f).map(Update::BuildJobCreated)
}

pub(super) fn state(f: Fields) -> Result<Update, UpdateError> {
    StateChange::from_fields(f).map(Update::State)
}

pub(super) fn build_state(f: Fields) -> Result<Update, UpdateError> {
    StateChange::from_fields(f).map(Update::BuildState)
}

pub(super) fn build_started(f: Fields) -> Result<Update, UpdateError> {
    f.finish().map(|()| Update::BuildStarted)
}

pub(super) fn build_finished(f: Fields) -> Result<Update, UpdateError> {
    f.finish().map(|()| Update::BuildFinished)
}

pub(super) fn job_state(f: Fields) -> Result<Update, UpdateError> {
    JobState::from_fields(f).map(Update::JobState)
}

pub(super) fn job_emergency_abort(f: Fields) -> Result<Update, UpdateError> {
    JobEmergencyAbort::from_fields(f).map(Update::JobEmergencyAbort)
}

pub(super) fn job_started(f: Fields) -> Result<Update, UpdateError> {
    JobMarker::from_fields(f).map(Update::JobStarted)
}

pub(super) fn job_finished(f: Fields) -> Result<Update, UpdateError> {
    JobMarker::from_fields(f).map(Update::JobFinished)
}

pub(super) fn step_state(f: Fields) -> Result<Update, UpdateError> {
    StepState::from_fields(f).map(Update::StepState)
}

pub(super) fn output_item(f: Fields) -> Result<Update, UpdateError> {
    OutputItem::from_fields(f).map(Update::OutputItem)
}

pub(super) fn std_out(f: Fields) -> Result<Update, UpdateError> {
    StdOut::from_fields(f).map(Update::StdOut)
}

pub(super) fn queue_actions(_: Fields) -> Result<Update, UpdateError> {
    Err(UpdateError::NotConstructible(UpdateKind::QueueActions.tag()))
}

pub(super) fn register_actions(f: Fields) -> Result<Update, UpdateError> {
    f.finish().map(|()| Update::RegisterActions)
}

pub(super) fn request_error(f: Fields) -> Result<Update, UpdateError> {
    RequestError::from_fields(f).map(Update::RequestError)
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
