use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use similar::{ChangeTag, TextDiff};

use crate::{Result, UploadGuardError};

use super::diff::{DiffEntry, FileMode};

/// Read-only access to the data of one pending commit.
///
/// Checks receive a `ChangeSource` instead of touching the repository
/// directly, which keeps each check a pure function of the commit and lets
/// tests substitute an in-memory fake.
pub trait ChangeSource {
    /// Raw tree diff between the commit and its first parent.
    ///
    /// # Errors
    /// Returns an error if the commit cannot be resolved or the trees cannot
    /// be read.
    fn raw_diff(&self, commit: &str) -> Result<Vec<DiffEntry>>;

    /// Added or changed lines of `path` at `commit`, with 1-indexed line
    /// numbers. Paths absent from the commit yield no lines.
    ///
    /// # Errors
    /// Returns an error if the commit cannot be resolved.
    fn file_diff(&self, path: &Path, commit: &str) -> Result<Vec<(usize, String)>>;

    /// Full text of `path` at `commit`.
    ///
    /// # Errors
    /// Returns [`UploadGuardError::PathNotFound`] if the path is not present
    /// in the commit, or another error if the repository cannot be read.
    fn file_content(&self, path: &Path, commit: &str) -> Result<String>;

    /// Full commit message of `commit`.
    ///
    /// # Errors
    /// Returns an error if the commit cannot be resolved.
    fn commit_message(&self, commit: &str) -> Result<String>;
}

type TreeIndex = BTreeMap<String, (String, FileMode)>;

/// [`ChangeSource`] backed by a local repository via gix.
///
/// The raw diff is computed by walking the commit tree and its first parent
/// tree; rename detection is not performed, so renames surface as a
/// delete/add pair.
pub struct GixChangeSource {
    repo_path: PathBuf,
    workdir: PathBuf,
}

impl GixChangeSource {
    /// Open the repository containing the given path.
    ///
    /// # Errors
    /// Returns an error if no git repository is found or it has no working
    /// directory.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = gix::discover(path)
            .map_err(|e| UploadGuardError::GitRepoNotFound(format!("{}: {e}", path.display())))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| UploadGuardError::Git("Repository has no working directory".into()))?
            .to_path_buf();
        Ok(Self {
            repo_path: repo.path().to_path_buf(),
            workdir,
        })
    }

    /// The working directory of the repository.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn open_repo(&self) -> Result<gix::Repository> {
        gix::open(&self.repo_path)
            .map_err(|e| UploadGuardError::Git(format!("Failed to open git repository: {e}")))
    }

    fn resolve_commit<'repo>(
        repo: &'repo gix::Repository,
        commit: &str,
    ) -> Result<gix::Commit<'repo>> {
        repo.rev_parse_single(commit)
            .map_err(|e| UploadGuardError::Git(format!("Failed to parse revision '{commit}': {e}")))?
            .object()
            .map_err(|e| UploadGuardError::Git(format!("Failed to get object for '{commit}': {e}")))?
            .peel_to_commit()
            .map_err(|e| UploadGuardError::Git(format!("Failed to peel to commit '{commit}': {e}")))
    }

    fn parent_tree<'repo>(commit: &gix::Commit<'repo>) -> Result<Option<gix::Tree<'repo>>> {
        let Some(parent_id) = commit.parent_ids().next() else {
            return Ok(None);
        };
        let parent = parent_id
            .object()
            .map_err(|e| UploadGuardError::Git(format!("Failed to read parent commit: {e}")))?
            .peel_to_commit()
            .map_err(|e| UploadGuardError::Git(format!("Failed to peel parent commit: {e}")))?;
        let tree = parent
            .tree()
            .map_err(|e| UploadGuardError::Git(format!("Failed to get parent tree: {e}")))?;
        Ok(Some(tree))
    }

    fn entry_mode(kind: gix::object::tree::EntryKind) -> Option<FileMode> {
        match kind {
            gix::object::tree::EntryKind::Blob => Some(FileMode::REGULAR),
            gix::object::tree::EntryKind::BlobExecutable => Some(FileMode::EXECUTABLE),
            gix::object::tree::EntryKind::Link => Some(FileMode::SYMLINK),
            _ => None,
        }
    }

    fn index_tree(tree: &gix::Tree<'_>, prefix: &str, index: &mut TreeIndex) -> Result<()> {
        for entry in tree.iter() {
            let entry =
                entry.map_err(|e| UploadGuardError::Git(format!("Failed to read tree entry: {e}")))?;
            let name = std::str::from_utf8(entry.filename())
                .map_err(|e| UploadGuardError::Git(format!("Invalid filename encoding: {e}")))?;
            let path = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}/{name}")
            };

            match entry.mode().kind() {
                gix::object::tree::EntryKind::Tree => {
                    let subtree = entry
                        .object()
                        .map_err(|e| {
                            UploadGuardError::Git(format!("Failed to get subtree object: {e}"))
                        })?
                        .into_tree();
                    Self::index_tree(&subtree, &path, index)?;
                }
                kind => {
                    if let Some(mode) = Self::entry_mode(kind) {
                        index.insert(path, (entry.oid().to_string(), mode));
                    }
                }
            }
        }
        Ok(())
    }

    fn commit_index(repo: &gix::Repository, commit: &str) -> Result<(TreeIndex, TreeIndex)> {
        let commit_obj = Self::resolve_commit(repo, commit)?;
        let tree = commit_obj
            .tree()
            .map_err(|e| UploadGuardError::Git(format!("Failed to get tree for '{commit}': {e}")))?;

        let mut current = TreeIndex::new();
        Self::index_tree(&tree, "", &mut current)?;

        let mut parent = TreeIndex::new();
        if let Some(tree) = Self::parent_tree(&commit_obj)? {
            Self::index_tree(&tree, "", &mut parent)?;
        }
        Ok((parent, current))
    }

    fn entries_between(parent: &TreeIndex, current: &TreeIndex) -> Vec<DiffEntry> {
        let paths: std::collections::BTreeSet<&String> =
            parent.keys().chain(current.keys()).collect();

        let mut entries = Vec::new();
        for path in paths {
            match (parent.get(path), current.get(path)) {
                (None, Some((sha, mode))) => {
                    let mut entry = DiffEntry::added(path, *mode);
                    entry.dst_sha.clone_from(sha);
                    entries.push(entry);
                }
                (Some((src_sha, src_mode)), Some((dst_sha, dst_mode))) => {
                    if src_sha != dst_sha || src_mode != dst_mode {
                        let mut entry = DiffEntry::modified(path, *dst_mode);
                        entry.src_mode = *src_mode;
                        entry.src_sha.clone_from(src_sha);
                        entry.dst_sha.clone_from(dst_sha);
                        entries.push(entry);
                    }
                }
                (Some((sha, mode)), None) => {
                    let mut entry = DiffEntry::deleted(path, *mode);
                    entry.src_sha.clone_from(sha);
                    entries.push(entry);
                }
                (None, None) => {}
            }
        }
        entries
    }

    fn blob_at_path(
        repo: &gix::Repository,
        commit: &str,
        path: &Path,
    ) -> Result<Option<Vec<u8>>> {
        let commit_obj = Self::resolve_commit(repo, commit)?;
        let tree = commit_obj
            .tree()
            .map_err(|e| UploadGuardError::Git(format!("Failed to get tree for '{commit}': {e}")))?;
        Self::blob_in_tree(&tree, path)
    }

    fn blob_in_tree(tree: &gix::Tree<'_>, path: &Path) -> Result<Option<Vec<u8>>> {
        let mut components = path.components();
        let Some(component) = components.next() else {
            return Ok(None);
        };
        let name = component.as_os_str().to_string_lossy();
        let rest = components.as_path();

        for entry in tree.iter() {
            let entry =
                entry.map_err(|e| UploadGuardError::Git(format!("Failed to read tree entry: {e}")))?;
            let filename: &[u8] = entry.filename();
            if filename != name.as_bytes() {
                continue;
            }

            if rest.as_os_str().is_empty() {
                if Self::entry_mode(entry.mode().kind()).is_none() {
                    return Ok(None);
                }
                let object = entry
                    .object()
                    .map_err(|e| UploadGuardError::Git(format!("Failed to read blob: {e}")))?;
                return Ok(Some(object.data.clone()));
            }

            if entry.mode().kind() != gix::object::tree::EntryKind::Tree {
                return Ok(None);
            }
            let subtree = entry
                .object()
                .map_err(|e| UploadGuardError::Git(format!("Failed to get subtree object: {e}")))?
                .into_tree();
            return Self::blob_in_tree(&subtree, rest);
        }
        Ok(None)
    }
}

impl ChangeSource for GixChangeSource {
    fn raw_diff(&self, commit: &str) -> Result<Vec<DiffEntry>> {
        let repo = self.open_repo()?;
        let (parent, current) = Self::commit_index(&repo, commit)?;
        Ok(Self::entries_between(&parent, &current))
    }

    fn file_diff(&self, path: &Path, commit: &str) -> Result<Vec<(usize, String)>> {
        let repo = self.open_repo()?;
        let commit_obj = Self::resolve_commit(&repo, commit)?;
        let parent_rev = format!("{}^", commit_obj.id());

        let new = Self::blob_at_path(&repo, commit, path)?.unwrap_or_default();
        let old = if commit_obj.parent_ids().next().is_some() {
            Self::blob_at_path(&repo, &parent_rev, path)?.unwrap_or_default()
        } else {
            Vec::new()
        };

        let old_text = String::from_utf8_lossy(&old).into_owned();
        let new_text = String::from_utf8_lossy(&new).into_owned();

        let diff = TextDiff::from_lines(&old_text, &new_text);
        let mut lines = Vec::new();
        for change in diff.iter_all_changes() {
            if change.tag() != ChangeTag::Insert {
                continue;
            }
            if let Some(index) = change.new_index() {
                let value = change.value();
                let value = value.strip_suffix('\n').unwrap_or(value);
                let value = value.strip_suffix('\r').unwrap_or(value);
                lines.push((index + 1, value.to_string()));
            }
        }
        Ok(lines)
    }

    fn file_content(&self, path: &Path, commit: &str) -> Result<String> {
        let repo = self.open_repo()?;
        Self::blob_at_path(&repo, commit, path)?.map_or_else(
            || {
                Err(UploadGuardError::PathNotFound {
                    commit: commit.to_string(),
                    path: path.to_path_buf(),
                })
            },
            |data| Ok(String::from_utf8_lossy(&data).into_owned()),
        )
    }

    fn commit_message(&self, commit: &str) -> Result<String> {
        let repo = self.open_repo()?;
        let commit_obj = Self::resolve_commit(&repo, commit)?;
        Ok(String::from_utf8_lossy(commit_obj.message_raw_sloppy()).into_owned())
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
