use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Git error: {0}")]
    Git(String),

    #[error("Not a git repository: {0}")]
    GitRepoNotFound(String),

    #[error("Unknown check: {0}")]
    UnknownCheck(String),

    #[error("Path not present in commit {commit}: {path}")]
    PathNotFound { commit: String, path: PathBuf },
}

pub type Result<T> = std::result::Result<T, UploadGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
