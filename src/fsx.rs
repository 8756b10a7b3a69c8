//! Filesystem helpers used by the dispatcher between repeated runs.

use std::fs;
use std::io;
use std::path::Path;

/// Removes a run artifact: a single file, or a directory and everything
/// below it. Symlinks are removed, never followed.
pub fn remove_artifact(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Deletes everything inside a directory artifact but keeps the directory
/// itself, so it is still there for the next extraction. If `path` is a
/// symlink to a directory, the link stays and the linked directory is
/// emptied.
pub fn empty_dir(path: &Path) -> io::Result<()> {
    for entry in fs::read_dir(path)? {
        remove_artifact(&entry?.path())?;
    }
    Ok(())
}
