//! # Archive Writer
//!
//! Turns a directory tree into a ZIP archive: one zero-length entry per
//! non-root directory and one entry per regular file, named by its path
//! relative to the source directory.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Seek, Write};
use std::path::Path;

use tracing::{debug, trace};
use zip::result::ZipError;
use zip::{CompressionMethod, ZipWriter};

use crate::common::{ArchiveStats, EntryKind};
use crate::compress::{entry_options, CompressionPolicy};
use crate::error::{Result, ZipBenchError};
use crate::walk;

// 1 MiB output buffer keeps syscall count low for trees of small files.
const ARCHIVE_BUFFER_SIZE: usize = 1024 * 1024;

/// Writes every file and non-root directory under `source_dir` into a new
/// archive at `archive_path`, compressing each file as `policy` dictates.
///
/// The archive file is created with `create_new`; an existing file at
/// `archive_path` is an error and is left untouched. On failure a partially
/// written archive may remain on disk.
pub fn write_archive(
    source_dir: &Path,
    archive_path: &Path,
    policy: CompressionPolicy,
) -> Result<ArchiveStats> {
    let write_err = |source: ZipError| ZipBenchError::ArchiveWrite {
        source,
        path: archive_path.to_path_buf(),
    };

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(archive_path)
        .map_err(|e| write_err(e.into()))?;
    let mut zip = ZipWriter::new(BufWriter::with_capacity(ARCHIVE_BUFFER_SIZE, file));
    let mut stats = ArchiveStats::default();

    for visit in walk::walk(source_dir) {
        let visit = visit?;
        let name = visit.entry_name();
        match visit.kind {
            EntryKind::Directory => {
                trace!(entry = %name, "adding directory");
                zip.add_directory(name, entry_options(CompressionMethod::Stored))
                    .map_err(write_err)?;
                stats.directories += 1;
            }
            EntryKind::File => {
                let options = policy.options_for(&visit.relative_path);
                trace!(entry = %name, "adding file");
                zip.start_file(name, options).map_err(write_err)?;
                stats.bytes_in += append_file(&mut zip, &visit.path)?;
                stats.files += 1;
            }
        }
    }

    let mut out = zip.finish().map_err(write_err)?;
    out.flush().map_err(|e| write_err(e.into()))?;

    debug!(
        archive = %archive_path.display(),
        files = stats.files,
        directories = stats.directories,
        bytes_in = stats.bytes_in,
        ?policy,
        "archive written"
    );
    Ok(stats)
}

/// Streams the file at `path` into the entry last started on `zip`.
fn append_file<W: Write + Seek>(zip: &mut ZipWriter<W>, path: &Path) -> Result<u64> {
    let mut reader = BufReader::new(File::open(path).map_err(ZipBenchError::io(path))?);
    io::copy(&mut reader, zip).map_err(ZipBenchError::io(path))
}
