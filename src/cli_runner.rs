//! Repeated-run driver shared by the `zipbench` binary and the tests.
//!
//! Paths are validated once, up front; a bad path aborts before anything
//! runs. After that every run is timed on its own, and a failing run is
//! reported and skipped over rather than ending the benchmark.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::{Args, Operation};
use crate::error::Result;
use crate::fsx;
use crate::report::{error_chain, Reporter, RunEvent, RunSummary, RunTimings, TracingReporter};

/// A fully parsed request: which operation, on which paths, how many times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub operation: Operation,
    pub source: PathBuf,
    pub target: PathBuf,
    pub runs: u32,
}

impl From<Args> for Invocation {
    fn from(args: Args) -> Self {
        Invocation {
            operation: args.operation,
            source: args.source,
            target: args.target,
            runs: args.runs,
        }
    }
}

/// Entry point of the binary: runs `args` and logs through `tracing`.
pub fn run_cli_app(args: Args) -> Result<RunSummary> {
    run_repeated(&Invocation::from(args), &mut TracingReporter)
}

/// Runs `invocation.operation` `invocation.runs` times in sequence.
///
/// Between runs the previous run's artifact is deleted; the last run's
/// artifact is kept. Only path validation errors are returned; errors from
/// individual runs and from deletions go to `reporter`.
pub fn run_repeated<R: Reporter + ?Sized>(
    invocation: &Invocation,
    reporter: &mut R,
) -> Result<RunSummary> {
    let Invocation {
        operation,
        source,
        target,
        runs,
    } = invocation;
    operation.validate(source, target)?;

    let mut timings = RunTimings::default();
    for run in 1..=*runs {
        reporter.report(RunEvent::RunStarted {
            run,
            runs: *runs,
            operation: *operation,
        });

        let start = Instant::now();
        let artifact = match operation.execute(source, target) {
            Ok(artifact) => {
                let elapsed = start.elapsed();
                timings.record(elapsed);
                reporter.report(RunEvent::RunFinished {
                    run,
                    elapsed,
                    artifact: artifact.clone(),
                });
                Some(artifact)
            }
            Err(err) => {
                reporter.report(RunEvent::RunFailed {
                    run,
                    error: error_chain(&err),
                });
                None
            }
        };

        if run < *runs {
            if let Some(artifact) = artifact {
                discard_artifact(*operation, &artifact, reporter);
            }
        }
    }

    let summary = timings.summary(*runs);
    reporter.report(RunEvent::Summary(summary.clone()));
    Ok(summary)
}

fn discard_artifact<R: Reporter + ?Sized>(operation: Operation, artifact: &Path, reporter: &mut R) {
    reporter.report(RunEvent::Deleting {
        path: artifact.to_path_buf(),
    });
    // UNZIP keeps its target directory for the next run
    let result = match operation {
        Operation::Unzip => fsx::empty_dir(artifact),
        _ => fsx::remove_artifact(artifact),
    };
    if let Err(err) = result {
        reporter.report(RunEvent::DeleteFailed {
            path: artifact.to_path_buf(),
            error: error_chain(&err),
        });
    }
}
