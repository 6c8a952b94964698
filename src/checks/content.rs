use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use regex::{Regex, RegexSet};

use crate::git::AffectedFilter;
use crate::{Result, UploadGuardError};

use super::{CheckContext, CheckFailure, CheckOutcome};

/// Detail items shown per failure before the list is cut off.
const MAX_SHOWN: usize = 5;

fn regex_set(patterns: &[String]) -> Result<RegexSet> {
    RegexSet::new(patterns)
        .map_err(|e| UploadGuardError::Config(format!("Invalid path pattern: {e}")))
}

fn is_source_path(path: &Path, include: &RegexSet, exclude: &RegexSet) -> bool {
    let text = path.to_string_lossy();
    include.is_match(&text) && !exclude.is_match(&text)
}

/// Affected source files, relative, with symlinks dropped: a symlink's blob
/// is just its target path and has no lines worth checking.
fn source_paths(
    ctx: &CheckContext<'_>,
    include: &RegexSet,
    exclude: &RegexSet,
) -> Result<Vec<PathBuf>> {
    Ok(ctx
        .affected_entries(AffectedFilter::default().relative(true))?
        .into_iter()
        .filter(|entry| !entry.is_symlink())
        .filter_map(|entry| entry.current_file().map(Path::to_path_buf))
        .filter(|path| is_source_path(path, include, exclude))
        .collect())
}

/// Flag added or changed lines longer than the configured budget. URLs and
/// preprocessor directives routinely exceed it and are left alone.
///
/// # Errors
/// Propagates diff read failures.
pub fn check_long_lines(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let policy = &ctx.policy.content;
    let skip_re = Regex::new(r"https?://|^#\s*(define|include|import|pragma|if|endif)\b")
        .expect("Invalid regex");
    let include = regex_set(&policy.included_paths)?;
    let exclude = regex_set(&policy.excluded_paths)?;

    let mut items = Vec::new();
    'files: for path in source_paths(ctx, &include, &exclude)? {
        for (line_no, line) in ctx.file_diff(&path)? {
            let width = line.chars().count();
            if width <= policy.max_line_len || skip_re.is_match(&line) {
                continue;
            }
            items.push(format!("{}, line {line_no}, {width} chars", path.display()));
            if items.len() == MAX_SHOWN {
                break 'files;
            }
        }
    }

    if items.is_empty() {
        Ok(None)
    } else {
        Ok(Some(CheckFailure::with_items(
            format!(
                "Found lines longer than {} characters (first {MAX_SHOWN} shown):",
                policy.max_line_len
            ),
            items,
        )))
    }
}

/// Require affected source files to carry the expected license header. The
/// `(c)` spelling was retired in 2014 and is rejected for later years.
///
/// # Errors
/// Propagates diff or content read failures, or a header pattern that does
/// not compile.
pub fn check_license_header(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let policy = &ctx.policy.content;
    let header_re = Regex::new(&format!("(?m){}", policy.license_header)).map_err(|e| {
        UploadGuardError::Config(format!("Invalid license header pattern: {e}"))
    })?;
    let stale_c_re = Regex::new(r"Copyright \(c\) 20(1[4-9]|[2-9][0-9])").expect("Invalid regex");
    let include = regex_set(&policy.included_paths)?;
    let exclude = regex_set(&policy.excluded_paths)?;

    let mut bad = Vec::new();
    for path in source_paths(ctx, &include, &exclude)? {
        let content = ctx.file_content(&path)?;
        if content.is_empty() {
            continue;
        }
        if !header_re.is_match(&content) || stale_c_re.is_match(&content) {
            bad.push(path.display().to_string());
        }
    }

    if bad.is_empty() {
        Ok(None)
    } else {
        Ok(Some(CheckFailure::with_items(
            "License header must match the expected form (no \"(c)\" from 2014 on). Bad files:",
            bad,
        )))
    }
}

/// Deepest directory containing every affected path; `None` when the change
/// spans top-level directories or touches the root itself.
fn common_dir(paths: &[PathBuf]) -> Option<PathBuf> {
    let mut iter = paths.iter();
    let mut prefix: Vec<&OsStr> = iter.next()?.parent()?.iter().collect();
    for path in iter {
        let parent: Vec<&OsStr> = path.parent()?.iter().collect();
        let shared = prefix
            .iter()
            .zip(&parent)
            .take_while(|(a, b)| a == b)
            .count();
        prefix.truncate(shared);
    }
    if prefix.is_empty() {
        None
    } else {
        Some(prefix.iter().copied().collect())
    }
}

/// When a change only touches one top-level directory, its summary line must
/// start with that directory's name (or the name in the closest-to-root
/// `.project_alias`) as a `name: ` prefix.
///
/// # Errors
/// Propagates diff or message read failures.
pub fn check_project_prefix(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let paths = ctx.affected_paths(AffectedFilter::default().relative(true))?;
    let Some(prefix) = common_dir(&paths) else {
        return Ok(None);
    };
    let Some(top) = prefix.iter().next().and_then(OsStr::to_str) else {
        return Ok(None);
    };

    let mut name = top.to_string();
    let mut dir = Some(prefix.as_path());
    while let Some(current) = dir {
        if current.as_os_str().is_empty() {
            break;
        }
        match ctx.file_content(&current.join(".project_alias")) {
            Ok(alias) => name = alias.trim().to_string(),
            Err(UploadGuardError::PathNotFound { .. }) => {}
            Err(e) => return Err(e),
        }
        dir = current.parent();
    }

    let desc = ctx.commit_message()?;
    if desc.starts_with(&format!("{name}: ")) {
        Ok(None)
    } else {
        Ok(Some(CheckFailure::new(format!(
            "The commit title for changes affecting only {name} should start with \"{name}: \""
        ))))
    }
}

/// Changes under isolated config paths must not be mixed with other changes
/// in one commit.
///
/// # Errors
/// Propagates diff read failures.
pub fn check_kernel_config(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let policy = &ctx.policy.content;
    let isolated = regex_set(&policy.isolated_paths)?;

    let paths = ctx.affected_paths(AffectedFilter::default().relative(true))?;
    let matching = paths
        .iter()
        .filter(|path| isolated.is_match(&path.to_string_lossy()))
        .count();

    if matching == 0 || matching == paths.len() {
        Ok(None)
    } else {
        Ok(Some(CheckFailure::with_items(
            "Config changes and regular changes must be in separate commits:",
            paths.iter().map(|path| path.display().to_string()).collect(),
        )))
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
