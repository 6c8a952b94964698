use regex::Regex;

use crate::Result;
use crate::config::MessagePolicy;

use super::{CheckContext, CheckFailure, CheckOutcome};

/// Marker the review tool appends when a change is cherry-picked; its
/// presence widens the set of trailers allowed after the Change-Id.
const CHERRY_PICK_MARKER: &str = "(cherry picked from commit";

/// Values of body lines (never the summary) carrying `tag` as their first
/// token. A tag that is indented, mid-line, or differently cased does not
/// count.
fn tagged_values<'a>(desc: &'a str, tag: &str) -> Vec<&'a str> {
    desc.lines()
        .skip(1)
        .filter_map(|line| line.strip_prefix(tag))
        .collect()
}

fn bug_examples(policy: &MessagePolicy) -> Vec<String> {
    policy
        .bug_trackers
        .iter()
        .map(|tracker| format!("BUG={tracker}:9999"))
        .collect()
}

fn missing_bug(policy: &MessagePolicy) -> CheckFailure {
    let mut items = bug_examples(policy);
    items.push("BUG=None".to_string());
    CheckFailure::with_items(
        "Changelist description needs BUG field (after the first line)",
        items,
    )
}

fn invalid_bug(reference: &str, policy: &MessagePolicy) -> CheckFailure {
    CheckFailure::with_items(
        format!("Changelist has an invalid BUG reference: '{reference}'"),
        bug_examples(policy),
    )
}

/// Require a `BUG=` line: `None`/`none`, or comma-separated `tracker:id`
/// references drawn from the tracker allow-list.
///
/// # Errors
/// Propagates commit message read failures.
pub fn check_bug_field(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let desc = ctx.commit_message()?;
    let policy = &ctx.policy.message;

    let values = tagged_values(&desc, "BUG=");
    let Some(value) = values.first() else {
        return Ok(Some(missing_bug(policy)));
    };
    let value = value.trim();
    if value.is_empty() {
        return Ok(Some(missing_bug(policy)));
    }
    if value == "None" || value == "none" {
        return Ok(None);
    }

    for reference in value.split(',') {
        let reference = reference.trim();
        let Some((tracker, id)) = reference.split_once(':') else {
            return Ok(Some(invalid_bug(reference, policy)));
        };
        if policy.legacy_bug_trackers.iter().any(|t| t == tracker) {
            return Ok(Some(CheckFailure::new(format!(
                "The {tracker} bug tracker is deprecated; use one of: {}",
                policy.bug_trackers.join(", ")
            ))));
        }
        let known = policy.bug_trackers.iter().any(|t| t == tracker);
        if !known || id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Ok(Some(invalid_bug(reference, policy)));
        }
    }
    Ok(None)
}

/// Require a non-blank `TEST=` line (free text; `None`/`none` are fine).
///
/// # Errors
/// Propagates commit message read failures.
pub fn check_test_field(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let desc = ctx.commit_message()?;
    let has_value = tagged_values(&desc, "TEST=")
        .iter()
        .any(|value| !value.trim().is_empty());
    if has_value {
        Ok(None)
    } else {
        Ok(Some(CheckFailure::new(
            "Changelist description needs TEST field (after the first line)",
        )))
    }
}

fn invalid_cq_depend(detail: String) -> CheckFailure {
    CheckFailure::with_items(
        "Changelist has an invalid CQ-DEPEND target.",
        vec!["Example: CQ-DEPEND=CL:1234, CL:2345".to_string(), detail],
    )
}

/// Validate `CQ-DEPEND=` lines when present: one or more comma-separated
/// `CL:<number>` references. A message without the tag passes.
///
/// # Errors
/// Propagates commit message read failures.
pub fn check_cq_depend(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let desc = ctx.commit_message()?;
    let target_re = Regex::new(r"^CL:\d+$").expect("Invalid regex");

    for (index, line) in desc.lines().enumerate() {
        let Some(value) = line.strip_prefix("CQ-DEPEND=") else {
            continue;
        };
        if index == 0 {
            return Ok(Some(invalid_cq_depend(
                "CQ-DEPEND= must come after the first line".to_string(),
            )));
        }
        let value = value.trim();
        if value.is_empty() {
            return Ok(Some(invalid_cq_depend("empty CQ-DEPEND value".to_string())));
        }
        for target in value.split(',') {
            let target = target.trim();
            if !target_re.is_match(target) {
                return Ok(Some(invalid_cq_depend(format!(
                    "not a CL:<number> reference: '{target}'"
                ))));
            }
        }
    }
    Ok(None)
}

/// Require a well-formed `Change-Id: I<hex>` line as the last content of the
/// message, optionally followed by allowed trailer tags. A cherry-pick
/// marker as the final line widens the allowed set.
///
/// # Errors
/// Propagates commit message read failures.
pub fn check_change_id(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let desc = ctx.commit_message()?;
    let policy = &ctx.policy.message;
    let line_re = Regex::new(r"^Change-Id: I[0-9a-f]+$").expect("Invalid regex");

    let lines: Vec<&str> = desc.lines().collect();
    let Some(position) = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| line_re.is_match(line))
        .map(|(index, _)| index)
    else {
        return Ok(Some(CheckFailure::new(
            "The last paragraph of the description must include a Change-Id.",
        )));
    };

    let mut trailing: Vec<&str> = lines[position + 1..].to_vec();
    while trailing.first().is_some_and(|line| line.trim().is_empty()) {
        trailing.remove(0);
    }
    while trailing.last().is_some_and(|line| line.trim().is_empty()) {
        trailing.pop();
    }

    let allowed: &[String] = if trailing
        .last()
        .is_some_and(|line| line.starts_with(CHERRY_PICK_MARKER))
    {
        trailing.pop();
        &policy.cherry_pick_trailers
    } else {
        &policy.changeid_trailers
    };

    for line in trailing {
        let tag = line.split_once(':').map(|(tag, _)| tag);
        if !tag.is_some_and(|tag| allowed.iter().any(|a| a == tag)) {
            return Ok(Some(CheckFailure::new(format!(
                "Only \"{}\" tag(s) may follow the Change-Id.",
                allowed.join("\", \"")
            ))));
        }
    }
    Ok(None)
}

/// Summary-line style: the second line must be blank, the summary must be a
/// single sentence and fit the character budget.
///
/// # Errors
/// Propagates commit message read failures.
pub fn check_style(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let desc = ctx.commit_message()?;
    let policy = &ctx.policy.message;
    let lines: Vec<&str> = desc.lines().collect();

    if lines.len() > 1 && !lines[1].is_empty() {
        return Ok(Some(CheckFailure::new(
            "The second line of the commit message must be blank.",
        )));
    }

    let summary = lines.first().copied().unwrap_or_default();
    if summary.contains(". ") {
        return Ok(Some(CheckFailure::new(
            "The first line cannot be more than one sentence.",
        )));
    }
    if summary.chars().count() > policy.max_summary_len {
        return Ok(Some(CheckFailure::new(format!(
            "The first line must be shorter than {} characters.",
            policy.max_summary_len
        ))));
    }
    Ok(None)
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
