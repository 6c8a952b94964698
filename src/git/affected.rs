use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::Result;

use super::diff::{DiffEntry, DiffStatus};
use super::source::ChangeSource;

/// Options controlling which of a commit's diff records are reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct AffectedFilter {
    /// Keep entries whose status is `Deleted`.
    pub include_deletes: bool,
    /// Report paths relative to the project root instead of absolute.
    pub relative: bool,
}

impl AffectedFilter {
    #[must_use]
    pub const fn include_deletes(mut self, yes: bool) -> Self {
        self.include_deletes = yes;
        self
    }

    #[must_use]
    pub const fn relative(mut self, yes: bool) -> Self {
        self.relative = yes;
        self
    }
}

/// The full diff records touched by `commit`, filtered and with both path
/// fields absolutized against `root` unless `filter.relative`.
///
/// Order matches the underlying diff; errors from the diff fetch propagate.
///
/// # Errors
/// Returns whatever error the source's diff fetch raises.
pub fn affected_entries(
    source: &dyn ChangeSource,
    commit: &str,
    root: &Path,
    filter: AffectedFilter,
) -> Result<Vec<DiffEntry>> {
    let mut entries = Vec::new();
    for mut entry in source.raw_diff(commit)? {
        if entry.status == DiffStatus::Deleted && !filter.include_deletes {
            continue;
        }
        if !filter.relative {
            entry.src_file = entry.src_file.map(|p| root.join(p));
            entry.dst_file = entry.dst_file.map(|p| root.join(p));
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// The paths touched by `commit` (destination side when present), filtered
/// like [`affected_entries`], deduplicated with diff order preserved.
///
/// # Errors
/// Returns whatever error the source's diff fetch raises.
pub fn affected_paths(
    source: &dyn ChangeSource,
    commit: &str,
    root: &Path,
    filter: AffectedFilter,
) -> Result<Vec<PathBuf>> {
    let mut paths = IndexSet::new();
    for entry in affected_entries(source, commit, root, filter)? {
        if let Some(path) = entry.current_file() {
            paths.insert(path.to_path_buf());
        }
    }
    Ok(paths.into_iter().collect())
}

#[cfg(test)]
#[path = "affected_tests.rs"]
mod tests;
