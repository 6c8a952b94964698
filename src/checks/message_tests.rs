use crate::checks::CheckFn;
use crate::config::Policy;
use crate::testutil::{FakeChange, ctx};

use super::*;

fn run(check: CheckFn, msg: &str) -> CheckOutcome {
    let source = FakeChange::with_message(msg);
    let policy = Policy::default();
    let context = ctx(&source, &policy);
    check(&context).unwrap()
}

fn assert_accepted(check: CheckFn, msg: &str) {
    assert!(run(check, msg).is_none(), "should accept {msg:?}");
}

fn assert_rejected(check: CheckFn, msg: &str) {
    assert!(run(check, msg).is_some(), "should reject {msg:?}");
}

// ============================================================================
// commit-message-bug
// ============================================================================

#[test]
fn bug_accepts_valid_tracker_references() {
    assert_accepted(check_bug_field, "\nBUG=chromium:1234\n");
    assert_accepted(check_bug_field, "\nBUG=chrome-os-partner:1234\n");
}

#[test]
fn bug_accepts_comma_separated_references() {
    assert_accepted(check_bug_field, "\nBUG=chromium:1234, chromium:5678\n");
    assert_accepted(
        check_bug_field,
        "\nBUG=chromium:1234,chrome-os-partner:42\n",
    );
}

#[test]
fn bug_accepts_none_literal_case_sensitively() {
    assert_accepted(check_bug_field, "\nBUG=None\n");
    assert_accepted(check_bug_field, "\nBUG=none\n");
    assert_rejected(check_bug_field, "\nBUG=NONE\n");
}

#[test]
fn bug_rejects_blank_values() {
    assert_rejected(check_bug_field, "\nBUG=\n");
    assert_rejected(check_bug_field, "\nBUG=    \n");
}

#[test]
fn bug_rejects_tag_on_summary_line() {
    assert_rejected(check_bug_field, "BUG=None\n\n\n");
}

#[test]
fn bug_rejects_indented_tag() {
    assert_rejected(check_bug_field, "\n BUG=None\n");
    assert_rejected(check_bug_field, "\n\tBUG=None\n");
}

#[test]
fn bug_rejects_legacy_tracker_with_dedicated_message() {
    let failure = run(check_bug_field, "\nBUG=chromium-os:1234\n").unwrap();
    assert!(failure.msg.contains("deprecated"), "msg: {}", failure.msg);
}

#[test]
fn bug_rejects_unknown_tracker() {
    assert_rejected(check_bug_field, "\nBUG=booga:1234\n");
}

#[test]
fn bug_rejects_bad_reference_in_list() {
    assert_rejected(check_bug_field, "\nBUG=chromium:1234, booga:5\n");
    assert_rejected(check_bug_field, "\nBUG=chromium:12x4\n");
}

#[test]
fn bug_rejects_missing_field() {
    assert_rejected(check_bug_field, "foo\n");
}

#[test]
fn bug_rejects_lowercase_tag() {
    assert_rejected(check_bug_field, "\nbug=none\n");
}

// ============================================================================
// commit-message-test
// ============================================================================

#[test]
fn test_accepts_free_text() {
    assert_accepted(check_test_field, "\nTEST=i did it\n");
}

#[test]
fn test_accepts_none_literal() {
    assert_accepted(check_test_field, "\nTEST=None\n");
    assert_accepted(check_test_field, "\nTEST=none\n");
}

#[test]
fn test_rejects_blank_values() {
    assert_rejected(check_test_field, "\nTEST=\n");
    assert_rejected(check_test_field, "\nTEST=     \n");
}

#[test]
fn test_rejects_tag_on_summary_line() {
    assert_rejected(check_test_field, "TEST=None\n\n\n");
}

#[test]
fn test_rejects_indented_tag() {
    assert_rejected(check_test_field, "\n TEST=None\n");
    assert_rejected(check_test_field, "\n\tTEST=None\n");
}

#[test]
fn test_rejects_missing_field() {
    assert_rejected(check_test_field, "foo\n");
}

#[test]
fn test_rejects_lowercase_tag() {
    assert_rejected(check_test_field, "\ntest=none\n");
}

// ============================================================================
// commit-message-cqdepend
// ============================================================================

#[test]
fn cq_depend_accepts_single_target() {
    assert_accepted(check_cq_depend, "\nCQ-DEPEND=CL:1234\n");
}

#[test]
fn cq_depend_accepts_multiple_targets() {
    assert_accepted(check_cq_depend, "\nCQ-DEPEND=CL:1234, CL:2345\n");
}

#[test]
fn cq_depend_accepts_missing_tag() {
    assert_accepted(check_cq_depend, "foo\n");
}

#[test]
fn cq_depend_rejects_malformed_separator() {
    assert_rejected(check_cq_depend, "\nCQ-DEPEND=CL=1234\n");
}

#[test]
fn cq_depend_rejects_none() {
    assert_rejected(check_cq_depend, "\nCQ-DEPEND=None\n");
}

#[test]
fn cq_depend_rejects_blank_value() {
    assert_rejected(check_cq_depend, "\nCQ-DEPEND=\n");
}

#[test]
fn cq_depend_rejects_tag_on_summary_line() {
    assert_rejected(check_cq_depend, "CQ-DEPEND=CL:1234\n");
}

// ============================================================================
// commit-message-changeid
// ============================================================================

#[test]
fn change_id_accepts_final_line() {
    assert_accepted(check_change_id, "foo\n\nChange-Id: I1234\n");
}

#[test]
fn change_id_rejects_blank_values() {
    assert_rejected(check_change_id, "\nChange-Id:\n");
    assert_rejected(check_change_id, "\nChange-Id:       \n");
}

#[test]
fn change_id_rejects_tag_on_summary_line() {
    assert_rejected(check_change_id, "Change-Id: I1234\n\n\n");
}

#[test]
fn change_id_rejects_indented_tag() {
    assert_rejected(check_change_id, "\n Change-Id: I1234\n");
    assert_rejected(check_change_id, "\n\tChange-Id: I1234\n");
}

#[test]
fn change_id_rejects_missing_line() {
    assert_rejected(check_change_id, "foo\n");
}

#[test]
fn change_id_rejects_wrong_case() {
    assert_rejected(check_change_id, "\nchange-id: I1234\n");
    assert_rejected(check_change_id, "\nChange-id: I1234\n");
    assert_rejected(check_change_id, "\nChange-ID: I1234\n");
}

#[test]
fn change_id_rejects_uppercase_hex_value() {
    assert_rejected(check_change_id, "\nChange-Id: IDEADBEEF\n");
}

#[test]
fn change_id_rejects_lines_after_it() {
    assert_rejected(check_change_id, "\nChange-Id: I1234\nbar\n");
}

#[test]
fn change_id_permits_signed_off_by_trailer() {
    assert_accepted(check_change_id, "foo\n\nChange-Id: I1234\nSigned-off-by: Hi\n");
}

#[test]
fn change_id_rejects_unlisted_trailer() {
    assert_rejected(check_change_id, "foo\n\nChange-Id: I1234\nReviewed-by: Hi\n");
}

#[test]
fn change_id_cherry_pick_marker_widens_trailers() {
    assert_accepted(
        check_change_id,
        "foo\n\nChange-Id: I1234\nReviewed-by: Hi\n(cherry picked from commit 1234abc)\n",
    );
}

// ============================================================================
// commit-message-style
// ============================================================================

#[test]
fn style_accepts_valid_messages() {
    assert_accepted(check_style, "one sentence.\n");
    assert_accepted(check_style, "some.module: do it!\n");
    assert_accepted(check_style, "one line\n\nmore stuff here.");
}

#[test]
fn style_rejects_nonblank_second_line() {
    assert_rejected(check_style, "one sentence.\nbad fish!\n");
}

#[test]
fn style_rejects_multiple_sentences_in_summary() {
    assert_rejected(check_style, "one sentence. two sentence!\n");
}

#[test]
fn style_rejects_overlong_summary() {
    assert_rejected(check_style, &"o".repeat(200));
}

#[test]
fn style_summary_budget_is_configurable() {
    let source = FakeChange::with_message(&"o".repeat(80));
    let policy = Policy {
        message: crate::config::MessagePolicy {
            max_summary_len: 72,
            ..Default::default()
        },
        ..Default::default()
    };
    let context = ctx(&source, &policy);
    assert!(check_style(&context).unwrap().is_some());
}
