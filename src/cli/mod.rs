use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::compress::CompressionPolicy;
use crate::error::{PathRole, Result, ZipBenchError};
use crate::{archive, extract};

/// Times directory-to-ZIP compression and ZIP-to-directory extraction.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The operation to run (case-insensitive).
    #[arg(value_enum, ignore_case = true)]
    pub operation: Operation,

    /// Directory to compress, or ZIP file to decompress.
    pub source: PathBuf,

    /// ZIP file to compress to, or directory to decompress into.
    pub target: PathBuf,

    /// Number of times to run the operation. Outputs of all but the last run are deleted.
    #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,
}

/// The benchmarked operations.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Compress a directory, deflating every file.
    #[value(name = "zip")]
    Zip,
    /// Extract a ZIP file into an existing directory.
    #[value(name = "unzip")]
    Unzip,
    /// Same as `zip`, kept as its own operation for comparison runs.
    #[value(name = "zip7")]
    Zip7,
    /// Compress a directory, storing `.pb` files and deflating the rest.
    #[value(name = "smartzip")]
    SmartZip,
    /// Compress a directory without compression.
    #[value(name = "fastzip")]
    FastZip,
}

impl Operation {
    /// The compression policy of a compressing operation, `None` for `UNZIP`.
    pub fn policy(self) -> Option<CompressionPolicy> {
        match self {
            Operation::Zip | Operation::Zip7 => Some(CompressionPolicy::Default),
            Operation::SmartZip => Some(CompressionPolicy::ContentAware),
            Operation::FastZip => Some(CompressionPolicy::Store),
            Operation::Unzip => None,
        }
    }

    /// Checks `source` and `target` against what this operation expects of them.
    pub fn validate(self, source: &Path, target: &Path) -> Result<()> {
        match self {
            Operation::Unzip => {
                require(PathRole::SourceFile, source)?;
                require(PathRole::TargetDirectory, target)
            }
            _ => {
                require(PathRole::TargetFile, target)?;
                require(PathRole::SourceDirectory, source)
            }
        }
    }

    /// Runs the operation once and returns the path of what it produced:
    /// the archive for compressing operations, the target directory for `UNZIP`.
    pub fn execute(self, source: &Path, target: &Path) -> Result<PathBuf> {
        match self.policy() {
            Some(policy) => {
                archive::write_archive(source, target, policy)?;
            }
            None => {
                extract::extract_archive(source, target)?;
            }
        }
        Ok(target.to_path_buf())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Zip => "ZIP",
            Operation::Unzip => "UNZIP",
            Operation::Zip7 => "ZIP7",
            Operation::SmartZip => "SMARTZIP",
            Operation::FastZip => "FASTZIP",
        })
    }
}

/// Checks that `path` satisfies what `role` demands of it.
pub fn require(role: PathRole, path: &Path) -> Result<()> {
    let ok = match role {
        PathRole::SourceDirectory | PathRole::TargetDirectory => path.is_dir(),
        PathRole::SourceFile => path.is_file(),
        PathRole::TargetFile => {
            let parent_exists = match path.parent() {
                Some(parent) if parent.as_os_str().is_empty() => true,
                Some(parent) => parent.is_dir(),
                None => false,
            };
            // symlink_metadata so a dangling link also counts as taken
            parent_exists && path.symlink_metadata().is_err()
        }
    };
    if ok {
        Ok(())
    } else {
        Err(ZipBenchError::InvalidPath {
            role,
            path: path.to_path_buf(),
        })
    }
}

/// Parses the process arguments.
pub fn parse() -> std::result::Result<Args, clap::Error> {
    Args::try_parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::fs;
    use tempfile::tempdir;

    fn parse_from(args: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("zipbench").chain(args.iter().copied()))
    }

    #[test]
    fn operation_names_are_case_insensitive() {
        for (name, op) in [
            ("ZIP", Operation::Zip),
            ("unzip", Operation::Unzip),
            ("Zip7", Operation::Zip7),
            ("SMARTZIP", Operation::SmartZip),
            ("fastZip", Operation::FastZip),
        ] {
            let args = parse_from(&[name, "src", "dst"]).unwrap();
            assert_eq!(args.operation, op);
        }
    }

    #[test]
    fn runs_default_to_one() {
        let args = parse_from(&["zip", "src", "out.zip"]).unwrap();
        assert_eq!(args.runs, 1);
        assert_eq!(args.source, PathBuf::from("src"));
        assert_eq!(args.target, PathBuf::from("out.zip"));
    }

    #[test]
    fn runs_must_be_a_positive_integer() {
        assert_eq!(parse_from(&["zip", "a", "b", "3"]).unwrap().runs, 3);
        assert!(parse_from(&["zip", "a", "b", "0"]).is_err());
        assert!(parse_from(&["zip", "a", "b", "-2"]).is_err());
        assert!(parse_from(&["zip", "a", "b", "many"]).is_err());
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let err = parse_from(&["FOO", "a", "b"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn missing_arguments_are_rejected() {
        let err = parse_from(&["zip", "a"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn compressing_operations_share_policies() {
        assert_eq!(Operation::Zip.policy(), Operation::Zip7.policy());
        assert_eq!(Operation::FastZip.policy(), Some(CompressionPolicy::Store));
        assert_eq!(Operation::SmartZip.policy(), Some(CompressionPolicy::ContentAware));
        assert_eq!(Operation::Unzip.policy(), None);
    }

    #[test]
    fn target_file_rules() {
        let dir = tempdir().unwrap();
        let fresh = dir.path().join("out.zip");
        assert!(require(PathRole::TargetFile, &fresh).is_ok());

        fs::write(&fresh, b"x").unwrap();
        assert!(matches!(
            require(PathRole::TargetFile, &fresh),
            Err(ZipBenchError::InvalidPath {
                role: PathRole::TargetFile,
                ..
            })
        ));

        let orphan = dir.path().join("missing/out.zip");
        assert!(require(PathRole::TargetFile, &orphan).is_err());
        assert!(require(PathRole::TargetFile, Path::new("relative-out.zip")).is_ok());
    }

    #[test]
    fn directory_and_file_rules() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.zip");
        fs::write(&file, b"x").unwrap();

        assert!(require(PathRole::SourceDirectory, dir.path()).is_ok());
        assert!(require(PathRole::SourceDirectory, &file).is_err());
        assert!(require(PathRole::TargetDirectory, &dir.path().join("nope")).is_err());
        assert!(require(PathRole::SourceFile, &file).is_ok());
        assert!(require(PathRole::SourceFile, dir.path()).is_err());
    }

    #[test]
    fn validation_reports_the_failing_argument() {
        let dir = tempdir().unwrap();
        let err = Operation::Unzip
            .validate(&dir.path().join("in.zip"), dir.path())
            .unwrap_err();
        assert!(matches!(
            err,
            ZipBenchError::InvalidPath {
                role: PathRole::SourceFile,
                ..
            }
        ));

        let err = Operation::SmartZip
            .validate(&dir.path().join("no-src"), &dir.path().join("out.zip"))
            .unwrap_err();
        assert!(matches!(
            err,
            ZipBenchError::InvalidPath {
                role: PathRole::SourceDirectory,
                ..
            }
        ));
    }
}
