use crate::config::Policy;
use crate::git::{DiffEntry, FileMode};
use crate::testutil::{FakeChange, ctx};

use super::*;

fn modified(path: &str) -> DiffEntry {
    DiffEntry::modified(path, FileMode::REGULAR)
}

// ============================================================================
// long-lines
// ============================================================================

#[test]
fn long_lines_reports_offending_lines() {
    let lines: Vec<(usize, String)> = vec![
        (1, "x".repeat(80)),                          // OK
        (2, "\u{80}".repeat(80)),                     // OK
        (3, "x".repeat(81)),                          // Too long
        (4, "\u{80}".repeat(81)),                     // Too long
        (5, format!("See http://{}", "x".repeat(80))), // OK (URL)
        (6, format!("See https://{}", "x".repeat(80))), // OK (URL)
        (7, format!("#  define {}", "x".repeat(80))), // OK (compiler directive)
        (8, format!("#define{}", "x".repeat(74))),    // Too long
    ];
    let source = FakeChange::with_entries(vec![modified("x.py")]).diff("x.py", lines);
    let policy = Policy::default();
    let context = ctx(&source, &policy);

    let failure = check_long_lines(&context).unwrap().unwrap();
    assert_eq!(
        failure.msg,
        "Found lines longer than 80 characters (first 5 shown):"
    );
    assert_eq!(
        failure.items,
        vec![
            "x.py, line 3, 81 chars".to_string(),
            "x.py, line 4, 81 chars".to_string(),
            "x.py, line 8, 81 chars".to_string(),
        ]
    );
}

#[test]
fn long_lines_caps_reported_items() {
    let lines: Vec<(usize, String)> = (1..=8).map(|n| (n, "y".repeat(90))).collect();
    let source = FakeChange::with_entries(vec![modified("x.py")]).diff("x.py", lines);
    let policy = Policy::default();
    let context = ctx(&source, &policy);

    let failure = check_long_lines(&context).unwrap().unwrap();
    assert_eq!(failure.items.len(), 5);
}

#[test]
fn long_lines_ignores_non_source_files() {
    let source = FakeChange::with_entries(vec![modified("data/blob.bin")])
        .diff("data/blob.bin", vec![(1, "z".repeat(200))]);
    let policy = Policy::default();
    let context = ctx(&source, &policy);
    assert!(check_long_lines(&context).unwrap().is_none());
}

#[test]
fn long_lines_ignores_excluded_paths() {
    let source = FakeChange::with_entries(vec![modified("cat/pkg/Manifest")])
        .diff("cat/pkg/Manifest", vec![(1, "z".repeat(200))]);
    let policy = Policy::default();
    let context = ctx(&source, &policy);
    assert!(check_long_lines(&context).unwrap().is_none());
}

#[test]
fn long_lines_skips_symlinks() {
    let entry = DiffEntry::added("scripts/run", FileMode::SYMLINK);
    let source =
        FakeChange::with_entries(vec![entry]).diff("scripts/run", vec![(1, "z".repeat(200))]);
    let policy = Policy::default();
    let context = ctx(&source, &policy);
    assert!(check_long_lines(&context).unwrap().is_none());
}

// ============================================================================
// license-header
// ============================================================================

fn license_outcome(content: &str) -> CheckOutcome {
    let source = FakeChange::with_entries(vec![modified("file")]).content("file", content);
    let policy = Policy::default();
    let context = ctx(&source, &policy);
    check_license_header(&context).unwrap()
}

#[test]
fn license_accepts_old_header_styles() {
    let headers = [
        "#!/bin/sh\n\
         # Copyright (c) 2012 The Chromium OS Authors. All rights reserved.\n\
         # Use of this source code is governed by a BSD-style license that can be\n\
         # found in the LICENSE file.\n",
        "// Copyright 2010-13 The Chromium OS Authors. All rights reserved.\n\
         // Use of this source code is governed by a BSD-style license that can be\n\
         // found in the LICENSE file.\n",
    ];
    for header in headers {
        assert!(license_outcome(header).is_none(), "should accept {header:?}");
    }
}

#[test]
fn license_rejects_c_marker_in_newer_headers() {
    let headers = [
        "// Copyright (c) 2015 The Chromium OS Authors. All rights reserved.\n\
         // Use of this source code is governed by a BSD-style license that can be\n\
         // found in the LICENSE file.\n",
        "// Copyright (c) 2020 The Chromium OS Authors. All rights reserved.\n\
         // Use of this source code is governed by a BSD-style license that can be\n\
         // found in the LICENSE file.\n",
    ];
    for header in headers {
        assert!(license_outcome(header).is_some(), "should reject {header:?}");
    }
}

#[test]
fn license_rejects_missing_header() {
    assert!(license_outcome("int main() { return 0; }\n").is_some());
}

#[test]
fn license_skips_empty_files() {
    assert!(license_outcome("").is_none());
}

// ============================================================================
// project-prefix
// ============================================================================

#[test]
fn project_prefix_rejects_unprefixed_title() {
    let source = FakeChange::with_entries(vec![
        modified("foo/foo.cc"),
        modified("foo/subdir/baz.cc"),
    ])
    .message("bar: Some commit");
    let policy = Policy::default();
    let context = ctx(&source, &policy);

    let failure = check_project_prefix(&context).unwrap().unwrap();
    assert_eq!(
        failure.msg,
        "The commit title for changes affecting only foo should start with \"foo: \""
    );
}

#[test]
fn project_prefix_accepts_matching_title() {
    let source = FakeChange::with_entries(vec![
        modified("foo/foo.cc"),
        modified("foo/subdir/baz.cc"),
    ])
    .message("foo: Change some files.");
    let policy = Policy::default();
    let context = ctx(&source, &policy);
    assert!(check_project_prefix(&context).unwrap().is_none());
}

#[test]
fn project_prefix_honors_alias_file() {
    let source = FakeChange::with_entries(vec![
        modified("foo/foo.cc"),
        modified("foo/subdir/bar.cc"),
    ])
    .content("foo/.project_alias", "project")
    .message("project: Use an alias.");
    let policy = Policy::default();
    let context = ctx(&source, &policy);
    assert!(check_project_prefix(&context).unwrap().is_none());
}

#[test]
fn project_prefix_finds_alias_above_subdirs() {
    let source = FakeChange::with_entries(vec![
        modified("foo/subdir/foo.cc"),
        modified("foo/subdir/bar.cc"),
        modified("foo/subdir/blah/baz.cc"),
    ])
    .content("foo/.project_alias", "project")
    .message("project: Alias with subdirs.");
    let policy = Policy::default();
    let context = ctx(&source, &policy);
    assert!(check_project_prefix(&context).unwrap().is_none());
}

#[test]
fn project_prefix_skips_changes_spanning_top_dirs() {
    let source = FakeChange::with_entries(vec![modified("foo/a.cc"), modified("bar/b.cc")])
        .message("whatever");
    let policy = Policy::default();
    let context = ctx(&source, &policy);
    assert!(check_project_prefix(&context).unwrap().is_none());
}

// ============================================================================
// kernel-config
// ============================================================================

fn kernel_config_outcome(paths: &[&str]) -> CheckOutcome {
    let entries = paths.iter().map(|path| modified(path)).collect();
    let source = FakeChange::with_entries(entries);
    let policy = Policy::default();
    let context = ctx(&source, &policy);
    check_kernel_config(&context).unwrap()
}

#[test]
fn kernel_config_rejects_mixed_changes() {
    let outcome = kernel_config_outcome(&[
        "kernel/files/chromeos/config/base.config",
        "kernel/files/arch/arm/mach-exynos/mach-exynos5-dt.c",
    ]);
    assert!(outcome.is_some());
}

#[test]
fn kernel_config_accepts_code_only_changes() {
    let outcome = kernel_config_outcome(&[
        "kernel/files/Makefile",
        "kernel/files/arch/arm/mach-exynos/mach-exynos5-dt.c",
    ]);
    assert!(outcome.is_none());
}

#[test]
fn kernel_config_accepts_config_only_changes() {
    let outcome = kernel_config_outcome(&["kernel/files/chromeos/config/base.config"]);
    assert!(outcome.is_none());
}
