// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn builtin_registers_every_kind_once() {
    let registry = Registry::builtin();
    assert_eq!(registry.len(), UpdateKind::ALL.len());
    for kind in UpdateKind::ALL {
        assert!(registry.lookup(kind.tag()).is_some(), "{kind} not registered");
    }
}

#[test]
fn global_is_builtin() {
    assert_eq!(Registry::global().len(), UpdateKind::ALL.len());
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = Registry::empty();
    assert!(registry.is_empty());
    registry.register("StdOut", UpdateKind::StdOut.constructor()).unwrap();
    assert_eq!(
        registry.register("StdOut", UpdateKind::StdOut.constructor()),
        Err(RegistryError::Duplicate("StdOut"))
    );
    assert_eq!(registry.len(), 1);
}

#[yare::parameterized(
    historical = { "JobCreated", "BuildJobCreated" },
    current    = { "BuildJobCreated", "BuildJobCreated" },
    unrelated  = { "StdOut", "StdOut" },
    unknown    = { "NoSuchThing", "NoSuchThing" },
)]
fn resolve_alias(tag: &str, expected: &str) {
    assert_eq!(Registry::resolve_alias(tag), expected);
}

#[test]
fn aliases_are_not_registered_tags() {
    assert!(Registry::builtin().lookup("JobCreated").is_none());
}

#[test]
fn partial_registry_only_knows_its_tags() {
    let mut registry = Registry::empty();
    registry.register("StdOut", UpdateKind::StdOut.constructor()).unwrap();

    let ok = registry.construct(json!({"type": "StdOut", "job_name": "j", "data": "x"}), 0.0);
    assert_eq!(ok.unwrap(), Update::StdOut(StdOut::new("j", "x")));

    let err = registry.construct(json!({"type": "BuildStarted"}), 0.0).unwrap_err();
    assert!(err.is_unknown_variant());
    assert_eq!(err.tag, "BuildStarted");
}

#[test]
fn non_string_tag_is_malformed() {
    let err = Registry::builtin().construct(json!({"type": 7}), 0.0).unwrap_err();
    assert!(matches!(err.source, UpdateError::Malformed(_)));
}

#[test]
fn type_key_takes_precedence_over_class() {
    let err = Registry::builtin()
        .construct(json!({"type": "BuildStarted", "class": "BuildFinished"}), 0.0)
        .unwrap_err();
    assert_eq!(err.schema(), Some(&SchemaError::Unexpected("class".to_string())));
}

#[test]
fn omitted_time_uses_now() {
    let update = Registry::builtin()
        .construct(
            json!({"type": "JobEmergencyAbort", "project_name": "p", "build_id": "b", "job_name": "j", "text": "t"}),
            77.5,
        )
        .unwrap();
    let Update::JobEmergencyAbort(abort) = update else { panic!("expected JobEmergencyAbort") };
    assert_eq!(abort.time(), 77.5);
}
