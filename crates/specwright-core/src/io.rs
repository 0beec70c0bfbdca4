use crate::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile next to the target.
/// Prevents half-written artifacts when the process dies mid-write.
///
/// A symlink is written through, so the link survives and its target gets
/// the new bytes. An existing file keeps its permissions; a new one gets
/// the usual `0644`.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let target = resolve_target(path)?;
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let existing = std::fs::metadata(&target).ok().map(|m| m.permissions());
    let dir = target.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    match existing {
        Some(perms) => tmp.as_file().set_permissions(perms)?,
        None => set_default_permissions(tmp.as_file())?,
    }
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}

fn resolve_target(path: &Path) -> Result<PathBuf> {
    let is_link = std::fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if is_link {
        Ok(std::fs::canonicalize(path)?)
    } else {
        Ok(path.to_path_buf())
    }
}

#[cfg(unix)]
fn set_default_permissions(file: &File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &File) -> Result<()> {
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

/// Write `data` unless the file already holds exactly these bytes.
/// Returns true if the file was written.
pub fn write_if_changed(path: &Path, data: &[u8]) -> Result<bool> {
    if let Ok(existing) = std::fs::read(path) {
        if existing == data {
            return Ok(false);
        }
    }
    atomic_write(path, data)?;
    Ok(true)
}

/// Remove a file if present. Returns true if something was removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(path)?;
    Ok(true)
}

/// Recursively remove a directory if present. Returns true if something was removed.
pub fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_dir_all(path)?;
    Ok(true)
}
