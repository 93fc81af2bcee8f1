use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::AppError;

/// Per-session path context, built once in `main` and passed to every
/// collaborator. No module-level mutable state survives between sessions.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Persisted settings file (secrets live here, owner-only access).
    pub settings_path: PathBuf,
    /// Claude Code user config, the optional sync target.
    pub claude_json_path: PathBuf,
}

impl AppContext {
    /// Resolve the fixed per-user locations under the home directory.
    pub fn from_home() -> Result<Self, AppError> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("unable to determine home directory".into()))?;
        Ok(Self {
            settings_path: home
                .join(".config")
                .join("prism-relay")
                .join("settings.json"),
            claude_json_path: home.join(".claude.json"),
        })
    }

    pub fn new(settings_path: PathBuf, claude_json_path: PathBuf) -> Self {
        Self {
            settings_path,
            claude_json_path,
        }
    }
}

pub fn read_json_file(path: &Path) -> Result<Value, AppError> {
    let content = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| AppError::json(path, e))
}

/// Write a file all-or-nothing: a temp file in the destination directory is
/// renamed over the target, so concurrent readers never observe a partial
/// write.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    write_atomically(path, bytes, false)
}

/// Like [`atomic_write`], but the file is readable by the owning user only.
/// Used for artifacts that hold secrets in the clear.
pub fn atomic_write_owner_only(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    write_atomically(path, bytes, true)
}

fn write_atomically(path: &Path, bytes: &[u8], owner_only: bool) -> Result<(), AppError> {
    let parent = path
        .parent()
        .ok_or_else(|| AppError::Config(format!("invalid path: {}", path.display())))?;
    fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| AppError::io(parent, e))?;
    tmp.write_all(bytes).map_err(|e| AppError::io(tmp.path(), e))?;

    if owner_only {
        restrict_to_owner(tmp.path())?;
    }

    tmp.persist(path).map_err(|e| AppError::io(path, e.error))?;
    Ok(())
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> Result<(), AppError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| AppError::io(path, e))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> Result<(), AppError> {
    // Windows ACLs are inherited from the profile directory; nothing to do.
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_creates_parent_dirs_and_replaces_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("out.json");

        atomic_write(&path, b"first").expect("first write");
        assert_eq!(fs::read(&path).expect("read back"), b"first");

        atomic_write(&path, b"second").expect("second write");
        assert_eq!(fs::read(&path).expect("read back"), b"second");
    }

    #[cfg(unix)]
    #[test]
    fn owner_only_write_sets_0600() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("secrets.json");
        atomic_write_owner_only(&path, b"{}").expect("write");

        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
