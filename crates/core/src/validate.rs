// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Field-level validation shared by the update constructors.

use crate::error::ValidationError;
use unicode_general_category::{get_general_category, GeneralCategory};

/// True if every character is printable: not a control, format, surrogate,
/// private-use, unassigned, or separator code point. The ASCII space is the
/// only separator allowed.
pub fn is_printable(s: &str) -> bool {
    s.chars().all(|c| c == ' ' || is_printable_char(c))
}

fn is_printable_char(c: char) -> bool {
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}

pub fn printable(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_printable(value) {
        Ok(())
    } else {
        Err(ValidationError::NotPrintable { field, value: value.to_string() })
    }
}

/// Letters, digits, and underscores, not starting with a digit.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

pub fn identifier(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_identifier(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidIdentifier { field, value: value.to_string() })
    }
}

/// Validate the name of an output item (a file or directory a job produced).
pub fn output_item_name(name: &str) -> Result<(), ValidationError> {
    let Some(first) = name.chars().next() else {
        return Err(ValidationError::EmptyOutputName);
    };
    if !first.is_alphabetic() {
        return Err(ValidationError::OutputNameStart(name.to_string()));
    }
    if !is_printable(name) || name.contains(['/', '\\', '\'', '"']) {
        return Err(ValidationError::OutputNameChars(name.to_string()));
    }
    Ok(())
}

/// Check that `path` lies inside the output item named `root`.
///
/// The first `/`-separated component must be `root`; no later component may
/// be `.` or `..` or contain non-printable characters.
pub fn sub_path(root: &str, path: &str) -> Result<(), ValidationError> {
    let mut components = path.split('/');
    if components.next() != Some(root) {
        return Err(ValidationError::NotSubdir { root: root.to_string(), path: path.to_string() });
    }
    for component in components {
        if !is_printable(component) {
            return Err(ValidationError::NonPrintablePath(path.to_string()));
        }
        if component == "." || component == ".." {
            return Err(ValidationError::InvalidComponent(path.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
