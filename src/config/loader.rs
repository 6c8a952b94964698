use std::path::Path;

use crate::{Result, UploadGuardError};

use super::model::Policy;
use super::validation::validate_policy;

/// Name of the per-repository policy file, looked up at the project root.
pub const CONFIG_FILE_NAME: &str = ".upload-guard.toml";

/// Load the check policy.
///
/// An explicit path wins; otherwise `.upload-guard.toml` at the project root
/// is used when present, and built-in defaults apply when it is not.
///
/// # Errors
/// Returns an error if an explicit path cannot be read, the TOML does not
/// parse, or validation rejects a table value.
pub fn load_policy(explicit: Option<&Path>, root: &Path) -> Result<Policy> {
    let policy = if let Some(path) = explicit {
        parse_file(path)?
    } else {
        let local = root.join(CONFIG_FILE_NAME);
        if local.is_file() {
            parse_file(&local)?
        } else {
            Policy::default()
        }
    };
    validate_policy(&policy)?;
    Ok(policy)
}

fn parse_file(path: &Path) -> Result<Policy> {
    let content = std::fs::read_to_string(path).map_err(|source| UploadGuardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
