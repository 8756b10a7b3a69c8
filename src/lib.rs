//! # zipbench Core Library
//!
//! This crate provides the functionality behind the `zipbench` command-line
//! harness, which times directory-to-ZIP compression and ZIP-to-directory
//! extraction, optionally repeating an operation to average out noise.
//!
//! ## Key Modules
//!
//! - [`archive`]: Writes a directory tree into a ZIP archive.
//! - [`extract`]: Extracts a ZIP archive into a directory.
//! - [`compress`]: Compression policies deciding how each entry is stored.
//! - [`walk`]: Ordered, depth-first traversal of a directory tree.
//! - [`cli`] and [`cli_runner`]: Argument parsing, path validation and the repeated-run loop.
//! - [`report`]: The reporting channel runs are logged through.
//!
//! ## Examples
//!
//! ```no_run
//! use std::path::Path;
//! use zipbench::compress::CompressionPolicy;
//!
//! zipbench::archive::write_archive(
//!     Path::new("project"),
//!     Path::new("project.zip"),
//!     CompressionPolicy::ContentAware,
//! )?;
//! zipbench::extract::extract_archive(Path::new("project.zip"), Path::new("restored"))?;
//! # Ok::<(), zipbench::ZipBenchError>(())
//! ```

pub mod archive;
pub mod cli;
pub mod cli_runner;
pub mod common;
pub mod compress;
pub mod error;
pub mod extract;
pub mod report;
pub mod walk;

pub use error::{Result, ZipBenchError};

// Filesystem helpers for artifact cleanup
pub mod fsx;
