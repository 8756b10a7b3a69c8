//! Run reporting.
//!
//! The dispatcher never prints. It hands [`RunEvent`]s to a [`Reporter`]:
//! the binary uses [`TracingReporter`], tests use [`RecordingReporter`] and
//! assert on the events themselves.

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::cli::Operation;

#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    RunStarted {
        run: u32,
        runs: u32,
        operation: Operation,
    },
    RunFinished {
        run: u32,
        elapsed: Duration,
        artifact: PathBuf,
    },
    /// `error` carries the rendered error chain.
    RunFailed { run: u32, error: String },
    Deleting { path: PathBuf },
    DeleteFailed { path: PathBuf, error: String },
    Summary(RunSummary),
}

/// Timing statistics over all successful runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub runs: u32,
    pub succeeded: u32,
    pub fastest: Option<Duration>,
    pub slowest: Option<Duration>,
    pub mean: Option<Duration>,
}

/// Running min/max/total of successful run times. Holds no per-run state,
/// so its size does not depend on how many runs were requested.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunTimings {
    succeeded: u32,
    total: Duration,
    fastest: Option<Duration>,
    slowest: Option<Duration>,
}

impl RunTimings {
    pub fn record(&mut self, elapsed: Duration) {
        self.succeeded += 1;
        self.total = self.total.saturating_add(elapsed);
        self.fastest = Some(self.fastest.map_or(elapsed, |d| d.min(elapsed)));
        self.slowest = Some(self.slowest.map_or(elapsed, |d| d.max(elapsed)));
    }

    pub fn summary(&self, runs: u32) -> RunSummary {
        RunSummary {
            runs,
            succeeded: self.succeeded,
            fastest: self.fastest,
            slowest: self.slowest,
            mean: (self.succeeded > 0).then(|| self.total / self.succeeded),
        }
    }
}

pub trait Reporter {
    fn report(&mut self, event: RunEvent);
}

/// Emits every event as a `tracing` event.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, event: RunEvent) {
        match event {
            RunEvent::RunStarted {
                run,
                runs,
                operation,
            } => tracing::debug!(run, runs, %operation, "starting run"),
            RunEvent::RunFinished {
                run,
                elapsed,
                artifact,
            } => info!(run, artifact = %artifact.display(), "done in {:?}", elapsed),
            RunEvent::RunFailed { run, error } => error!(run, "run failed: {}", error),
            RunEvent::Deleting { path } => info!("Deleting '{}'", path.display()),
            RunEvent::DeleteFailed { path, error } => {
                warn!("could not delete '{}': {}", path.display(), error)
            }
            RunEvent::Summary(summary) => match (summary.fastest, summary.mean, summary.slowest) {
                (Some(fastest), Some(mean), Some(slowest)) => info!(
                    runs = summary.runs,
                    succeeded = summary.succeeded,
                    "min {:?} / mean {:?} / max {:?}",
                    fastest,
                    mean,
                    slowest
                ),
                _ => warn!(runs = summary.runs, "no run succeeded"),
            },
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Vec<RunEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: RunEvent) {
        self.events.push(event);
    }
}

/// Renders an error and all of its sources as `outer: inner: root`.
pub fn error_chain(err: &dyn Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        // thiserror messages often embed their source already
        if !rendered.ends_with(&cause_text) {
            rendered.push_str(": ");
            rendered.push_str(&cause_text);
        }
        source = cause.source();
    }
    rendered
}
