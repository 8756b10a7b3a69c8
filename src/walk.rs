//! Depth-first, pre-order traversal of a directory tree.
//!
//! Siblings are visited in file-name order so that two walks over an
//! unchanged tree yield the same sequence. The root itself is never yielded.
//! Nodes that are neither regular files nor directories (symlinks, sockets,
//! devices) are skipped.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::common::{EntryKind, Visit};
use crate::error::{Result, ZipBenchError};

pub struct TreeWalk {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

/// Starts a traversal of `root`.
pub fn walk(root: &Path) -> TreeWalk {
    TreeWalk {
        root: root.to_path_buf(),
        inner: WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter(),
    }
}

impl Iterator for TreeWalk {
    type Item = Result<Visit>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    return Some(Err(ZipBenchError::Io {
                        source: err.into(),
                        path,
                    }));
                }
            };

            let file_type = entry.file_type();
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                debug!(path = %entry.path().display(), "skipping special file");
                continue;
            };

            let relative_path = match entry.path().strip_prefix(&self.root) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => {
                    return Some(Err(ZipBenchError::StripPrefix {
                        prefix: self.root.clone(),
                        path: entry.path().to_path_buf(),
                    }))
                }
            };

            return Some(Ok(Visit {
                path: entry.into_path(),
                relative_path,
                kind,
            }));
        }
    }
}
