//! Common types shared by the writer, the reader and the dispatcher.

use std::path::PathBuf;

/// Whether a visited tree node is a regular file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One node of a directory traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    /// Full path of the node on disk.
    pub path: PathBuf,
    /// Path relative to the traversal root. Never empty, never absolute.
    pub relative_path: PathBuf,
    pub kind: EntryKind,
}

impl Visit {
    /// The archive entry name for this node: relative path components joined
    /// with `/`, with a trailing `/` for directories.
    pub fn entry_name(&self) -> String {
        let mut name = self
            .relative_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if self.kind == EntryKind::Directory {
            name.push('/');
        }
        name
    }
}

/// Counters collected while writing an archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveStats {
    pub files: u64,
    pub directories: u64,
    pub bytes_in: u64,
}

/// Counters collected while extracting an archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub files: u64,
    pub directories: u64,
    pub bytes_out: u64,
}
