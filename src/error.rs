use std::fmt;
use std::path::PathBuf;

use zip::result::ZipError;

/// The kind of path argument the dispatcher expects, used to explain why a
/// path was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    /// A directory to compress. Must exist.
    SourceDirectory,
    /// A directory to extract into. Must exist.
    TargetDirectory,
    /// An archive to extract. Must be an existing regular file.
    SourceFile,
    /// An archive to create. Must not exist, but its parent directory must.
    TargetFile,
}

impl PathRole {
    pub fn requirement(self) -> &'static str {
        match self {
            PathRole::SourceDirectory | PathRole::TargetDirectory => {
                "does not exist or is not a directory"
            }
            PathRole::SourceFile => "does not exist or is not a file",
            PathRole::TargetFile => "already exists or parent directory does not exist",
        }
    }
}

impl fmt::Display for PathRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PathRole::SourceDirectory => "source directory",
            PathRole::TargetDirectory => "target directory",
            PathRole::SourceFile => "source file",
            PathRole::TargetFile => "target file",
        })
    }
}

/// The primary error type for all operations in the `zipbench` crate.
#[derive(Debug, thiserror::Error)]
pub enum ZipBenchError {
    /// A path argument failed its existence or kind check.
    #[error("{role} '{}' {}", path.display(), role.requirement())]
    InvalidPath { role: PathRole, path: PathBuf },

    /// An I/O error occurred while walking, reading, writing or deleting.
    /// Includes the path where the error happened.
    #[error("I/O error on path '{}': {source}", path.display())]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// The archive could not be created or written.
    #[error("could not write archive '{}': {source}", path.display())]
    ArchiveWrite {
        #[source]
        source: ZipError,
        path: PathBuf,
    },

    /// The archive is malformed or truncated.
    #[error("could not read archive '{}': {source}", path.display())]
    ArchiveFormat {
        #[source]
        source: ZipError,
        path: PathBuf,
    },

    /// An archive entry would resolve outside the extraction directory.
    #[error("archive entry '{name}' escapes the target directory")]
    UnsafeEntryName { name: String },

    /// An error occurred when trying to strip a prefix from a file path.
    #[error("could not strip prefix '{}' from path '{}'", prefix.display(), path.display())]
    StripPrefix { prefix: PathBuf, path: PathBuf },
}

impl ZipBenchError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| ZipBenchError::Io { source, path }
    }
}

pub type Result<T> = std::result::Result<T, ZipBenchError>;
