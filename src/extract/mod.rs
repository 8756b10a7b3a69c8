//! # Extraction Module
//!
//! Reads a ZIP archive entry by entry, in stored order, and recreates every
//! entry under a target directory.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, trace};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::common::ExtractStats;
use crate::error::{Result, ZipBenchError};

/// Extracts every entry of `archive_path` under `target_dir`.
///
/// Entries whose name would resolve outside `target_dir` (parent-directory
/// segments, absolute paths) are rejected. Extraction stops at the first
/// error and files already written are kept.
pub fn extract_archive(archive_path: &Path, target_dir: &Path) -> Result<ExtractStats> {
    let format_err = |source: ZipError| ZipBenchError::ArchiveFormat {
        source,
        path: archive_path.to_path_buf(),
    };

    let file = File::open(archive_path).map_err(ZipBenchError::io(archive_path))?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(format_err)?;
    let mut stats = ExtractStats::default();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(format_err)?;
        let relative = entry
            .enclosed_name()
            .map(Path::to_path_buf)
            .ok_or_else(|| ZipBenchError::UnsafeEntryName {
                name: entry.name().to_string(),
            })?;
        let out_path = target_dir.join(&relative);

        if entry.is_dir() {
            trace!(entry = entry.name(), "creating directory");
            fs::create_dir_all(&out_path).map_err(ZipBenchError::io(&out_path))?;
            stats.directories += 1;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(ZipBenchError::io(parent))?;
        }
        trace!(entry = entry.name(), "extracting file");
        let mut out =
            BufWriter::new(File::create(&out_path).map_err(ZipBenchError::io(&out_path))?);
        stats.bytes_out += io::copy(&mut entry, &mut out)
            .map_err(|e| copy_error(e, archive_path, &out_path))?;
        out.flush().map_err(ZipBenchError::io(&out_path))?;
        stats.files += 1;
    }

    debug!(
        archive = %archive_path.display(),
        files = stats.files,
        directories = stats.directories,
        bytes_out = stats.bytes_out,
        "archive extracted"
    );
    Ok(stats)
}

// Corrupt compressed data and checksum mismatches surface from the entry
// reader as `InvalidData`; anything else is a failure on the output side.
fn copy_error(err: io::Error, archive_path: &Path, out_path: &Path) -> ZipBenchError {
    if err.kind() == io::ErrorKind::InvalidData {
        ZipBenchError::ArchiveFormat {
            source: err.into(),
            path: archive_path.to_path_buf(),
        }
    } else {
        ZipBenchError::Io {
            source: err,
            path: out_path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::entry_options;
    use std::io::Cursor;
    use tempfile::tempdir;
    use zip::{CompressionMethod, ZipWriter};

    fn archive_with(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = entry_options(CompressionMethod::Deflated);
        for (name, data) in entries {
            match data {
                Some(data) => {
                    zip.start_file(*name, options).unwrap();
                    zip.write_all(data).unwrap();
                }
                None => zip.add_directory(*name, options).unwrap(),
            }
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn creates_parents_for_files_listed_before_their_directory() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("a.zip");
        fs::write(&archive_path, archive_with(&[("x/y/z.txt", Some(&b"deep"[..]))])).unwrap();
        let out = tempdir().unwrap();

        let stats = extract_archive(&archive_path, out.path()).unwrap();
        assert_eq!(stats.files, 1);
        assert_eq!(stats.bytes_out, 4);
        assert_eq!(fs::read(out.path().join("x/y/z.txt")).unwrap(), b"deep");
    }

    #[test]
    fn rejects_parent_directory_segments() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("evil.zip");
        fs::write(&archive_path, archive_with(&[("../evil.txt", Some(&b"boom"[..]))])).unwrap();
        let out = tempdir().unwrap();
        let target = out.path().join("target");
        fs::create_dir(&target).unwrap();

        let err = extract_archive(&archive_path, &target).unwrap_err();
        assert!(matches!(err, ZipBenchError::UnsafeEntryName { ref name } if name == "../evil.txt"));
        assert!(!out.path().join("evil.txt").exists());
    }

    #[test]
    fn keeps_existing_content() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("a.zip");
        fs::write(&archive_path, archive_with(&[("new.txt", Some(&b"new"[..]))])).unwrap();
        let out = tempdir().unwrap();
        fs::write(out.path().join("old.txt"), b"old").unwrap();

        extract_archive(&archive_path, out.path()).unwrap();
        assert_eq!(fs::read(out.path().join("old.txt")).unwrap(), b"old");
        assert_eq!(fs::read(out.path().join("new.txt")).unwrap(), b"new");
    }

    #[test]
    fn garbage_is_a_format_error() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("junk.zip");
        fs::write(&archive_path, b"definitely not a zip file").unwrap();
        let err = extract_archive(&archive_path, dir.path()).unwrap_err();
        assert!(matches!(err, ZipBenchError::ArchiveFormat { .. }));
    }
}
