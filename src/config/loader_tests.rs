use std::path::Path;

use tempfile::TempDir;

use crate::UploadGuardError;

use super::*;

fn write_config(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn defaults_when_no_file_present() {
    let dir = TempDir::new().unwrap();
    let policy = load_policy(None, dir.path()).unwrap();
    assert_eq!(policy, Policy::default());
}

#[test]
fn picks_up_repository_config_file() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), CONFIG_FILE_NAME, "[message]\nmax_summary_len = 72\n");

    let policy = load_policy(None, dir.path()).unwrap();
    assert_eq!(policy.message.max_summary_len, 72);
}

#[test]
fn explicit_path_wins_over_repository_file() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), CONFIG_FILE_NAME, "[message]\nmax_summary_len = 72\n");
    let other = write_config(dir.path(), "other.toml", "[message]\nmax_summary_len = 50\n");

    let policy = load_policy(Some(&other), dir.path()).unwrap();
    assert_eq!(policy.message.max_summary_len, 50);
}

#[test]
fn missing_explicit_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = load_policy(Some(&missing), dir.path()).unwrap_err();
    assert!(matches!(err, UploadGuardError::FileRead { .. }));
}

#[test]
fn invalid_toml_is_an_error() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), CONFIG_FILE_NAME, "not [valid toml");

    let err = load_policy(None, dir.path()).unwrap_err();
    assert!(matches!(err, UploadGuardError::TomlParse(_)));
}

#[test]
fn loaded_config_is_validated() {
    let dir = TempDir::new().unwrap();
    write_config(
        dir.path(),
        CONFIG_FILE_NAME,
        "[ebuild.virtual_pv]\npublic = \"one\"\n",
    );

    let err = load_policy(None, dir.path()).unwrap_err();
    assert!(matches!(err, UploadGuardError::Config(_)));
}
