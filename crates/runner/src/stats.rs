use crate::JobOutcome;
use serde::{Deserialize, Serialize};

/// Counters for the closing log line of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Jobs in the catalog given to the scheduler
    pub total: usize,

    pub completed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub cancelled: usize,

    /// Points written across all reports
    pub points: usize,

    /// Points dropped for unresolved parents
    pub warnings: usize,

    /// Wall time in milliseconds
    pub time_ms: u64,

    /// `"<job>: <cause>"` for every failed job
    pub failures: Vec<String>,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record(&mut self, label: &str, outcome: &JobOutcome) {
        match outcome {
            JobOutcome::Completed {
                points, warnings, ..
            } => {
                self.completed += 1;
                self.points += points;
                self.warnings += warnings;
            }
            JobOutcome::Skipped { .. } => self.skipped += 1,
            JobOutcome::Failed { cause } => {
                self.failed += 1;
                self.failures.push(format!("{label}: {cause}"));
            }
            JobOutcome::Cancelled => self.cancelled += 1,
        }
    }

    /// Jobs that reached a terminal state
    pub fn finished(&self) -> usize {
        self.completed + self.skipped + self.failed + self.cancelled
    }
}
