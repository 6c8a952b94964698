use crate::UploadGuardError;
use crate::config::Policy;
use crate::git::{DiffEntry, FileMode};
use crate::testutil::{FakeChange, ctx};

use super::*;

const EXPECTED_ORDER: [&str; 13] = [
    "commit-message-bug",
    "commit-message-test",
    "commit-message-cqdepend",
    "commit-message-changeid",
    "commit-message-style",
    "ebuild-eapi",
    "ebuild-keywords",
    "ebuild-virtual-pv",
    "ebuild-uprev",
    "long-lines",
    "license-header",
    "project-prefix",
    "kernel-config",
];

#[test]
fn registry_lists_checks_in_fixed_order() {
    let names: Vec<&str> = registry().iter().map(|check| check.name).collect();
    assert_eq!(names, EXPECTED_ORDER);
}

#[test]
fn run_check_rejects_unknown_names() {
    let source = FakeChange::default();
    let policy = Policy::default();
    let context = ctx(&source, &policy);

    let err = run_check("no-such-check", &context).unwrap_err();
    assert!(matches!(err, UploadGuardError::UnknownCheck(name) if name == "no-such-check"));
}

#[test]
fn run_check_dispatches_by_name() {
    let source = FakeChange::with_message("summary line\n\nBUG=None\n");
    let policy = Policy::default();
    let context = ctx(&source, &policy);

    assert!(run_check("commit-message-bug", &context).unwrap().is_none());
    assert!(run_check("commit-message-test", &context).unwrap().is_some());
}

#[test]
fn run_all_pairs_every_check_with_its_outcome() {
    let source = FakeChange::with_message("summary line\n");
    let policy = Policy::default();
    let context = ctx(&source, &policy);

    let results = run_all(&context).unwrap();
    let names: Vec<&str> = results.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, EXPECTED_ORDER);

    // An empty message body fails the field checks but passes style.
    assert!(results[0].1.is_some());
    assert!(results[4].1.is_none());
}

#[test]
fn run_all_propagates_tool_faults() {
    // An affected ebuild with no readable content is a fault, not a lint
    // failure.
    let source = FakeChange::with_entries(vec![DiffEntry::modified(
        "cat/pkg/pkg-0.ebuild",
        FileMode::REGULAR,
    )]);
    let policy = Policy::default();
    let context = ctx(&source, &policy);

    assert!(run_all(&context).is_err());
}

#[test]
fn check_failure_builders() {
    let plain = CheckFailure::new("nope");
    assert_eq!(plain.msg, "nope");
    assert!(plain.items.is_empty());

    let detailed = CheckFailure::with_items("nope", vec!["a".to_string(), "b".to_string()]);
    assert_eq!(detailed.items.len(), 2);
}
