use std::fmt;
use std::path::{Path, PathBuf};

/// Sentinel object hash for the missing side of an added or deleted entry.
pub const ZERO_SHA: &str = "0000000000000000000000000000000000000000";

/// File-level status of a single record in a tree-to-tree comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiffStatus {
    Added,
    Copied,
    Deleted,
    Modified,
    Renamed,
    TypeChanged,
    Unmerged,
}

/// Unix file mode as recorded in a tree entry, e.g. `100644` or `120000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileMode(u32);

impl FileMode {
    /// The missing side of an added or deleted entry.
    pub const MISSING: Self = Self(0);
    pub const REGULAR: Self = Self(0o100_644);
    pub const EXECUTABLE: Self = Self(0o100_755);
    pub const SYMLINK: Self = Self(0o120_000);

    #[must_use]
    pub const fn new(mode: u32) -> Self {
        Self(mode)
    }

    #[must_use]
    pub const fn is_symlink(self) -> bool {
        self.0 == 0o120_000
    }

    #[must_use]
    pub const fn is_missing(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06o}", self.0)
    }
}

/// One record of a raw diff between two tree states.
///
/// Added entries have no meaningful source side (zero hash, missing mode) and
/// deleted entries no meaningful destination side. Renamed and copied entries
/// populate both paths plus a similarity score; for every other status exactly
/// one of `src_file`/`dst_file` is the current path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub src_mode: FileMode,
    pub dst_mode: FileMode,
    pub src_sha: String,
    pub dst_sha: String,
    pub status: DiffStatus,
    /// Similarity percentage, only meaningful for renames and copies.
    pub score: Option<u8>,
    pub src_file: Option<PathBuf>,
    pub dst_file: Option<PathBuf>,
}

impl DiffEntry {
    #[must_use]
    pub fn added(path: impl Into<PathBuf>, mode: FileMode) -> Self {
        Self {
            src_mode: FileMode::MISSING,
            dst_mode: mode,
            src_sha: ZERO_SHA.to_string(),
            dst_sha: String::new(),
            status: DiffStatus::Added,
            score: None,
            src_file: None,
            dst_file: Some(path.into()),
        }
    }

    #[must_use]
    pub fn modified(path: impl Into<PathBuf>, mode: FileMode) -> Self {
        Self {
            src_mode: mode,
            dst_mode: mode,
            src_sha: String::new(),
            dst_sha: String::new(),
            status: DiffStatus::Modified,
            score: None,
            src_file: Some(path.into()),
            dst_file: None,
        }
    }

    #[must_use]
    pub fn deleted(path: impl Into<PathBuf>, mode: FileMode) -> Self {
        Self {
            src_mode: mode,
            dst_mode: FileMode::MISSING,
            src_sha: String::new(),
            dst_sha: ZERO_SHA.to_string(),
            status: DiffStatus::Deleted,
            score: None,
            src_file: Some(path.into()),
            dst_file: None,
        }
    }

    #[must_use]
    pub fn renamed(src: impl Into<PathBuf>, dst: impl Into<PathBuf>, mode: FileMode) -> Self {
        Self {
            src_mode: mode,
            dst_mode: mode,
            src_sha: String::new(),
            dst_sha: String::new(),
            status: DiffStatus::Renamed,
            score: Some(100),
            src_file: Some(src.into()),
            dst_file: Some(dst.into()),
        }
    }

    /// The path the entry refers to after the commit: the destination if one
    /// exists, the source otherwise.
    #[must_use]
    pub fn current_file(&self) -> Option<&Path> {
        self.dst_file.as_deref().or(self.src_file.as_deref())
    }

    /// Whether the entry is a symlink after the commit. Deleted entries are
    /// judged by their source mode since the destination side is missing.
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        if self.dst_mode.is_missing() {
            self.src_mode.is_symlink()
        } else {
            self.dst_mode.is_symlink()
        }
    }
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
