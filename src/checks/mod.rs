pub mod content;
pub mod ebuild;
pub mod message;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Policy;
use crate::git::{AffectedFilter, ChangeSource, DiffEntry, affected_entries, affected_paths};
use crate::{Result, UploadGuardError};

/// A check that found a policy violation: a headline message plus ordered
/// detail items (offending files, lines, examples).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckFailure {
    pub msg: String,
    pub items: Vec<String>,
}

impl CheckFailure {
    #[must_use]
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_items(msg: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            msg: msg.into(),
            items,
        }
    }
}

/// Outcome of one check invocation. `None` is a pass; a violation is a value,
/// never an error. Errors are reserved for tool faults (unresolvable commit,
/// unreadable repository) and abort the run for the commit.
pub type CheckOutcome = Option<CheckFailure>;

/// Everything a check may look at for one (project, commit) pair.
///
/// Checks only read; there is no shared mutable state between them.
pub struct CheckContext<'a> {
    /// Name of the project the commit belongs to, e.g.
    /// `chromiumos/overlays/board-overlays`.
    pub project: &'a str,
    /// Commit under inspection, as an id or any revision expression the
    /// source understands.
    pub commit: &'a str,
    /// Project root used to absolutize paths.
    pub project_root: &'a Path,
    pub source: &'a dyn ChangeSource,
    pub policy: &'a Policy,
}

impl CheckContext<'_> {
    /// Paths touched by the commit, see [`affected_paths`].
    ///
    /// # Errors
    /// Propagates the source's diff errors.
    pub fn affected_paths(&self, filter: AffectedFilter) -> Result<Vec<PathBuf>> {
        affected_paths(self.source, self.commit, self.project_root, filter)
    }

    /// Full diff records touched by the commit, see [`affected_entries`].
    ///
    /// # Errors
    /// Propagates the source's diff errors.
    pub fn affected_entries(&self, filter: AffectedFilter) -> Result<Vec<DiffEntry>> {
        affected_entries(self.source, self.commit, self.project_root, filter)
    }

    /// Full text of a file at the commit.
    ///
    /// # Errors
    /// Propagates the source's read errors.
    pub fn file_content(&self, path: &Path) -> Result<String> {
        self.source.file_content(path, self.commit)
    }

    /// Added/changed lines of a file at the commit.
    ///
    /// # Errors
    /// Propagates the source's read errors.
    pub fn file_diff(&self, path: &Path) -> Result<Vec<(usize, String)>> {
        self.source.file_diff(path, self.commit)
    }

    /// The commit message.
    ///
    /// # Errors
    /// Propagates the source's read errors.
    pub fn commit_message(&self) -> Result<String> {
        self.source.commit_message(self.commit)
    }
}

/// A check function: pure in (project, commit) given the context's injected
/// accessors.
pub type CheckFn = fn(&CheckContext<'_>) -> Result<CheckOutcome>;

/// A registered check.
pub struct Check {
    pub name: &'static str,
    pub run: CheckFn,
}

static REGISTRY: &[Check] = &[
    Check {
        name: "commit-message-bug",
        run: message::check_bug_field,
    },
    Check {
        name: "commit-message-test",
        run: message::check_test_field,
    },
    Check {
        name: "commit-message-cqdepend",
        run: message::check_cq_depend,
    },
    Check {
        name: "commit-message-changeid",
        run: message::check_change_id,
    },
    Check {
        name: "commit-message-style",
        run: message::check_style,
    },
    Check {
        name: "ebuild-eapi",
        run: ebuild::check_eapi,
    },
    Check {
        name: "ebuild-keywords",
        run: ebuild::check_keywords,
    },
    Check {
        name: "ebuild-virtual-pv",
        run: ebuild::check_virtual_pv,
    },
    Check {
        name: "ebuild-uprev",
        run: ebuild::check_uprev,
    },
    Check {
        name: "long-lines",
        run: content::check_long_lines,
    },
    Check {
        name: "license-header",
        run: content::check_license_header,
    },
    Check {
        name: "project-prefix",
        run: content::check_project_prefix,
    },
    Check {
        name: "kernel-config",
        run: content::check_kernel_config,
    },
];

/// Every registered check, in the fixed execution order.
#[must_use]
pub const fn registry() -> &'static [Check] {
    REGISTRY
}

/// Run one named check. A lint failure comes back as `Ok(Some(_))`; an
/// unknown name or a collaborator fault is an error and is not converted
/// into a lint failure.
///
/// # Errors
/// Returns [`UploadGuardError::UnknownCheck`] for unregistered names, or the
/// check's own tool fault.
pub fn run_check(name: &str, ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let check = REGISTRY
        .iter()
        .find(|check| check.name == name)
        .ok_or_else(|| UploadGuardError::UnknownCheck(name.to_string()))?;
    (check.run)(ctx)
}

/// Run every registered check in order, pairing each name with its outcome.
/// The first tool fault aborts the whole run for this commit.
///
/// # Errors
/// Propagates the first check's tool fault.
pub fn run_all(ctx: &CheckContext<'_>) -> Result<Vec<(&'static str, CheckOutcome)>> {
    REGISTRY
        .iter()
        .map(|check| Ok((check.name, (check.run)(ctx)?)))
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
