// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for update construction and reconstruction.

use thiserror::Error;

/// A field failed its invariant while an update was being constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("illegal state: {0:?}")]
    IllegalState(String),
    #[error("{field} not printable: {value:?}")]
    NotPrintable { field: &'static str, value: String },
    #[error("{field} invalid: {value:?}")]
    InvalidIdentifier { field: &'static str, value: String },
    #[error("{field} must be {expected}, got {found}")]
    WrongType { field: String, expected: &'static str, found: String },
    #[error("time is not a finite number: {0}")]
    NonFiniteTime(f64),
    #[error("output item name must not be empty")]
    EmptyOutputName,
    #[error("output item name must start with a letter: {0:?}")]
    OutputNameStart(String),
    #[error("output item name contains illegal characters: {0:?}")]
    OutputNameChars(String),
    #[error("not a subdir of {root}: {path}")]
    NotSubdir { root: String, path: String },
    #[error("non-printable character(s): {0:?}")]
    NonPrintablePath(String),
    #[error("invalid component name(s): {0}")]
    InvalidComponent(String),
}

/// The field set handed to a constructor does not match the variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("missing type tag")]
    MissingTag,
    #[error("missing required field {0:?}")]
    Missing(&'static str),
    #[error("unexpected field {0:?}")]
    Unexpected(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("unknown update type {0:?}")]
    UnknownVariant(String),
    #[error("malformed update: {0}")]
    Malformed(String),
    #[error("{0} carries live references and cannot be serialized")]
    NotSerializable(&'static str),
    #[error("{0} carries live references and cannot be reconstructed")]
    NotConstructible(&'static str),
}

/// Raised by `construct` when a wire message cannot become an update.
///
/// Keeps the tag as it appeared on the wire (before alias resolution) and
/// the original JSON for diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed reconstructing {tag}: {source}")]
pub struct ReconstructionError {
    pub tag: String,
    pub json: String,
    #[source]
    pub source: UpdateError,
}

impl ReconstructionError {
    pub fn is_unknown_variant(&self) -> bool {
        matches!(self.source, UpdateError::UnknownVariant(_))
    }

    pub fn validation(&self) -> Option<&ValidationError> {
        match &self.source {
            UpdateError::Validation(e) => Some(e),
            _ => None,
        }
    }

    pub fn schema(&self) -> Option<&SchemaError> {
        match &self.source {
            UpdateError::Schema(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("update type {0:?} registered twice")]
    Duplicate(&'static str),
}
