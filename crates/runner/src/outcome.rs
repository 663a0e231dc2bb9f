use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No `system` item below a `location` item
    SubtreeNotFound,
    /// Subtree found but no input point resolved
    NoPoints,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SubtreeNotFound => f.write_str("subtree not found"),
            SkipReason::NoPoints => f.write_str("no input points"),
        }
    }
}

/// Terminal state of one job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobOutcome {
    Completed {
        points: usize,
        path: PathBuf,
        /// Points dropped because their parent could not be resolved
        warnings: usize,
    },
    Skipped {
        reason: SkipReason,
    },
    Failed {
        cause: String,
    },
    /// Never dispatched because shutdown was requested
    Cancelled,
}

/// Lifecycle of a job inside the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Finished(JobOutcome),
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Finished(_))
    }

    /// Legal transitions: Pending -> Running -> Finished, or Pending -> Finished(Cancelled)
    pub fn advance(self, next: JobState) -> Option<JobState> {
        let allowed = match (&self, &next) {
            (JobState::Pending, JobState::Running) => true,
            (JobState::Pending, JobState::Finished(outcome)) => *outcome == JobOutcome::Cancelled,
            (JobState::Running, JobState::Finished(outcome)) => *outcome != JobOutcome::Cancelled,
            _ => false,
        };
        allowed.then_some(next)
    }
}
