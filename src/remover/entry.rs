// Platform deletion primitives

use std::fs;
use std::io;
use std::path::Path;

/// Removes a single file or symlink. A missing entry counts as success, so
/// repeated removal attempts stay idempotent.
///
/// Windows refuses to delete read-only files by default; plain `rm` on other
/// systems does not, so there the attribute is cleared first and the delete
/// retried once.
pub fn remove_file_entry(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        #[cfg(windows)]
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            clear_readonly(path)?;
            match fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(retry) if retry.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(retry) => Err(retry),
            }
        }
        Err(err) => Err(err),
    }
}

#[cfg(windows)]
fn clear_readonly(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    let mut permissions = metadata.permissions();
    if permissions.readonly() {
        permissions.set_readonly(false);
        fs::set_permissions(path, permissions)?;
    }
    Ok(())
}

/// Removes a file, symlink or empty directory, reporting whether anything
/// was actually there. Used by the sequential removal path.
pub fn remove_any(path: &Path) -> io::Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    let result = if metadata.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}
