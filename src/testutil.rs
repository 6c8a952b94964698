//! In-memory test doubles shared by the unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::checks::CheckContext;
use crate::config::Policy;
use crate::git::{ChangeSource, DiffEntry};
use crate::{Result, UploadGuardError};

/// An in-memory [`ChangeSource`]: entries, contents and diffs are whatever
/// the test registered. Reading an unregistered path is a `PathNotFound`
/// fault, which doubles as a guard that checks only touch what they should.
#[derive(Debug, Default)]
pub struct FakeChange {
    pub entries: Vec<DiffEntry>,
    pub contents: HashMap<PathBuf, String>,
    pub diffs: HashMap<PathBuf, Vec<(usize, String)>>,
    pub message: String,
}

impl FakeChange {
    pub fn with_message(message: &str) -> Self {
        Self {
            message: message.to_string(),
            ..Self::default()
        }
    }

    pub fn with_entries(entries: Vec<DiffEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn content(mut self, path: &str, content: &str) -> Self {
        self.contents
            .insert(PathBuf::from(path), content.to_string());
        self
    }

    #[must_use]
    pub fn diff(mut self, path: &str, lines: Vec<(usize, String)>) -> Self {
        self.diffs.insert(PathBuf::from(path), lines);
        self
    }

    #[must_use]
    pub fn message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }
}

impl ChangeSource for FakeChange {
    fn raw_diff(&self, _commit: &str) -> Result<Vec<DiffEntry>> {
        Ok(self.entries.clone())
    }

    fn file_diff(&self, path: &Path, _commit: &str) -> Result<Vec<(usize, String)>> {
        Ok(self.diffs.get(path).cloned().unwrap_or_default())
    }

    fn file_content(&self, path: &Path, commit: &str) -> Result<String> {
        self.contents.get(path).cloned().ok_or_else(|| {
            UploadGuardError::PathNotFound {
                commit: commit.to_string(),
                path: path.to_path_buf(),
            }
        })
    }

    fn commit_message(&self, _commit: &str) -> Result<String> {
        Ok(self.message.clone())
    }
}

/// A check context over a fake source with a neutral project name.
pub fn ctx<'a>(source: &'a FakeChange, policy: &'a Policy) -> CheckContext<'a> {
    ctx_for_project("project", source, policy)
}

pub fn ctx_for_project<'a>(
    project: &'a str,
    source: &'a FakeChange,
    policy: &'a Policy,
) -> CheckContext<'a> {
    CheckContext {
        project,
        commit: "1234",
        project_root: Path::new("/repo"),
        source,
        policy,
    }
}
