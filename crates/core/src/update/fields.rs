// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named-argument view over a wire message, consumed by the constructors.

use crate::error::{SchemaError, UpdateError, ValidationError};
use serde_json::{Map, Value};

/// The remaining fields of a wire message after the type tag was removed.
///
/// Each accessor removes the field it reads, so `finish()` can reject
/// anything the constructor did not ask for. JSON `null` counts as absent.
#[derive(Debug, Clone)]
pub struct Fields {
    map: Map<String, Value>,
    now: f64,
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn wrong_type(field: &str, expected: &'static str, found: &Value) -> UpdateError {
    ValidationError::WrongType {
        field: field.to_string(),
        expected,
        found: format!("{} ({found})", json_type(found)),
    }
    .into()
}

impl Fields {
    /// `now` is the wall-clock time used when a message omits `time`.
    pub fn new(map: Map<String, Value>, now: f64) -> Self {
        Self { map, now }
    }

    fn take(&mut self, name: &str) -> Option<Value> {
        match self.map.remove(name) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.get(name).is_some_and(|v| !v.is_null())
    }

    pub fn opt_string(&mut self, name: &'static str) -> Result<Option<String>, UpdateError> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(wrong_type(name, "a string", &other)),
        }
    }

    pub fn string(&mut self, name: &'static str) -> Result<String, UpdateError> {
        self.opt_string(name)?.ok_or_else(|| SchemaError::Missing(name).into())
    }

    pub fn flag(&mut self, name: &'static str) -> Result<bool, UpdateError> {
        match self.take(name) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(b),
            Some(other) => Err(wrong_type(name, "a boolean", &other)),
        }
    }

    /// Required boolean, absent is a schema error rather than `false`.
    pub fn required_flag(&mut self, name: &'static str) -> Result<bool, UpdateError> {
        if !self.contains(name) {
            return Err(SchemaError::Missing(name).into());
        }
        self.flag(name)
    }

    pub fn opt_u64(&mut self, name: &'static str) -> Result<Option<u64>, UpdateError> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Number(n)) if n.is_u64() => Ok(n.as_u64()),
            Some(other) => Err(wrong_type(name, "a non-negative integer", &other)),
        }
    }

    /// The `time` field, defaulting to the construction time.
    pub fn time(&mut self) -> Result<f64, UpdateError> {
        match self.take("time") {
            None => Ok(self.now),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(t) => Ok(t),
                None => Err(wrong_type("time", "a number", &Value::Number(n))),
            },
            Some(other) => Err(wrong_type("time", "a number", &other)),
        }
    }

    /// Reject any field no accessor consumed.
    pub fn finish(self) -> Result<(), UpdateError> {
        match self.map.into_iter().next() {
            Some((name, _)) => Err(SchemaError::Unexpected(name).into()),
            None => Ok(()),
        }
    }
}
