//! # Compression Policies
//!
//! A policy decides, from an entry's relative path alone, how that entry is
//! stored in the archive. Keeping this decision out of the tree walk lets one
//! writer serve every compressing operation.

use std::path::Path;

use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime};

/// Suffix of entries the content-aware policy stores without compression.
pub const STORED_SUFFIX: &str = ".pb";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionPolicy {
    /// Deflate every entry at the default level.
    Default,
    /// Store every entry uncompressed.
    Store,
    /// Store entries ending in `.pb`, deflate the rest.
    ContentAware,
}

impl CompressionPolicy {
    /// Returns the compression method for the entry at `relative_path`.
    pub fn method_for(self, relative_path: &Path) -> CompressionMethod {
        match self {
            CompressionPolicy::Default => CompressionMethod::Deflated,
            CompressionPolicy::Store => CompressionMethod::Stored,
            CompressionPolicy::ContentAware => {
                if relative_path.to_string_lossy().ends_with(STORED_SUFFIX) {
                    CompressionMethod::Stored
                } else {
                    CompressionMethod::Deflated
                }
            }
        }
    }

    /// Builds the writer options for the entry at `relative_path`.
    pub fn options_for(self, relative_path: &Path) -> FileOptions {
        entry_options(self.method_for(relative_path))
    }
}

/// Writer options shared by every entry: the given method at its default
/// level and a fixed timestamp, so unchanged input gives identical archives.
pub fn entry_options(method: CompressionMethod) -> FileOptions {
    FileOptions::default()
        .compression_method(method)
        .compression_level(None)
        .last_modified_time(DateTime::default())
}
