use crate::job::run_job;
use crate::{JobContext, JobError, JobOutcome, JobState, RunSummary, RunnerConfig};
use ssr_catalog::{ExtractionJob, JobCatalog};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;

/// Runs catalog jobs on a bounded pool of blocking workers.
///
/// Every job is isolated: its failure, or a panic inside it, is recorded and
/// the remaining jobs still run. Completion order is unspecified.
pub struct JobScheduler {
    ctx: Arc<JobContext>,
    config: RunnerConfig,
}

struct FinishedJob {
    label: String,
    outcome: JobOutcome,
}

impl JobScheduler {
    pub fn new(ctx: JobContext, config: RunnerConfig) -> Self {
        Self {
            ctx: Arc::new(ctx),
            config,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run every job of `catalog` and wait for all of them
    pub async fn run(&self, catalog: &JobCatalog) -> RunSummary {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        self.run_until(catalog, shutdown_rx).await
    }

    /// [`run`](Self::run) on a dedicated runtime, for callers outside async code
    pub fn run_blocking(&self, catalog: &JobCatalog) -> std::io::Result<RunSummary> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(runtime.block_on(self.run(catalog)))
    }

    /// Like [`run`](Self::run), but stops dispatching once `shutdown` turns
    /// true. Jobs already running are allowed to finish; the rest are
    /// reported as cancelled.
    pub async fn run_until(
        &self,
        catalog: &JobCatalog,
        mut shutdown: watch::Receiver<bool>,
    ) -> RunSummary {
        let start = Instant::now();
        let pool_size = self.config.pool_size.max(1);
        let semaphore = Arc::new(Semaphore::new(pool_size));
        let jobs = catalog.jobs();
        let mut summary = RunSummary::new(jobs.len());
        let mut tasks = JoinSet::new();

        log::info!("Running {} jobs (pool size {pool_size})", jobs.len());

        let mut dispatched = 0;
        while dispatched < jobs.len() {
            let permit = tokio::select! {
                biased;
                () = shutdown_requested(&mut shutdown) => None,
                permit = Arc::clone(&semaphore).acquire_owned() => permit.ok(),
            };
            let Some(permit) = permit else {
                break;
            };

            let job = jobs[dispatched].clone();
            let ctx = Arc::clone(&self.ctx);
            tasks.spawn_blocking(move || {
                let outcome = execute(&ctx, &job);
                drop(permit);
                FinishedJob {
                    label: job.to_string(),
                    outcome,
                }
            });
            dispatched += 1;
        }

        if dispatched < jobs.len() {
            log::warn!(
                "Shutdown requested, {} jobs not dispatched",
                jobs.len() - dispatched
            );
            for job in &jobs[dispatched..] {
                let label = job.to_string();
                transition(
                    &label,
                    JobState::Pending,
                    JobState::Finished(JobOutcome::Cancelled),
                );
                log::info!("Processing {label} database ... CANCELLED");
                summary.record(&label, &JobOutcome::Cancelled);
            }
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(finished) => summary.record(&finished.label, &finished.outcome),
                Err(err) => {
                    log::error!("Job task did not complete: {err}");
                    summary.failed += 1;
                    summary.failures.push(err.to_string());
                }
            }
        }

        summary.failures.sort();
        summary.time_ms = start.elapsed().as_millis() as u64;
        log::info!(
            "Total processing time: {:.4}s ({} completed, {} skipped, {} failed, {} cancelled, {} points)",
            start.elapsed().as_secs_f64(),
            summary.completed,
            summary.skipped,
            summary.failed,
            summary.cancelled,
            summary.points
        );
        summary
    }
}

/// Resolves once shutdown is requested; never resolves if the sender is gone
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

fn execute(ctx: &JobContext, job: &ExtractionJob) -> JobOutcome {
    contain(&job.to_string(), || run_job(ctx, job))
}

/// Run one job body, turning a panic into a failed outcome, and log the result
fn contain(label: &str, body: impl FnOnce() -> JobOutcome) -> JobOutcome {
    let state = transition(label, JobState::Pending, JobState::Running);

    log::info!("Processing {label} database ...");
    let start = Instant::now();
    let outcome = catch_unwind(AssertUnwindSafe(body)).unwrap_or_else(|panic| JobOutcome::Failed {
        cause: JobError::Panicked(panic_message(panic.as_ref())).to_string(),
    });
    let elapsed = start.elapsed().as_secs_f64();

    match &outcome {
        JobOutcome::Completed {
            points, warnings, ..
        } => log::info!(
            "Processing {label} database ... DONE ({elapsed:.4}s, {points} points, {warnings} dropped)"
        ),
        JobOutcome::Skipped { reason } => {
            log::info!("Processing {label} database ... SKIPPED ({reason}, {elapsed:.4}s)")
        }
        JobOutcome::Failed { cause } => {
            log::warn!("Processing {label} database ... FAILED ({elapsed:.4}s): {cause}")
        }
        JobOutcome::Cancelled => {}
    }

    transition(label, state, JobState::Finished(outcome.clone()));
    outcome
}

/// Log a lifecycle step. Steps are fixed by the scheduler, so an illegal one
/// is a bug and only checked in debug builds.
fn transition(label: &str, from: JobState, to: JobState) -> JobState {
    log::debug!("{label}: {from:?} -> {to:?}");
    let next = from.advance(to.clone());
    debug_assert!(
        next.is_some(),
        "{label}: illegal state transition to {to:?}"
    );
    next.unwrap_or(to)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkipReason;
    use pretty_assertions::assert_eq;
    use ssr_hierarchy::HierarchyStore;
    use ssr_report::{ReportOptions, ReportWriter};
    use std::sync::Mutex;

    struct CaptureLogger;

    static RECORDS: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());
    static LOGGER: CaptureLogger = CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            if let Ok(mut records) = RECORDS.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    /// Records logged so far that mention `needle`
    fn captured(needle: &str) -> Vec<(log::Level, String)> {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Debug);
        RECORDS
            .lock()
            .map(|records| {
                records
                    .iter()
                    .filter(|(_, msg)| msg.contains(needle))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn job(source: &str, system: &str) -> ExtractionJob {
        ExtractionJob {
            source: source.to_string(),
            location: source.to_string(),
            system: system.to_string(),
            output_dir: format!("{}sms", source.to_lowercase()),
            output: format!("{source}-{system}"),
            environment: format!("{source}SMS"),
        }
    }

    #[test]
    fn test_panicking_job_becomes_failure() {
        captured("");
        let outcome = contain("PNC:BMF in PNC", || panic!("index out of range"));

        match outcome {
            JobOutcome::Failed { cause } => {
                assert!(cause.contains("job panicked"), "{cause}");
                assert!(cause.contains("index out of range"), "{cause}");
            }
            other => panic!("expected failure, got {other:?}"),
        }

        let warnings: Vec<_> = captured("PNC:BMF in PNC")
            .into_iter()
            .filter(|(level, _)| *level == log::Level::Warn)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].1.contains("FAILED"));
    }

    #[test]
    fn test_contained_job_keeps_its_outcome() {
        let skipped = JobOutcome::Skipped {
            reason: SkipReason::NoPoints,
        };
        assert_eq!(contain("OKS:BMF in OKS", || skipped.clone()), skipped);
    }

    #[tokio::test]
    async fn test_cancelled_jobs_are_logged_one_by_one() {
        captured("");
        let xml = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let scheduler = JobScheduler::new(
            JobContext::new(
                HierarchyStore::new(xml.path()),
                ReportWriter::new(out.path(), ReportOptions::default()),
            ),
            RunnerConfig::default(),
        );
        let catalog = JobCatalog::from_jobs(vec![job("CNX", "BMF"), job("CNX", "ECS")]).unwrap();
        let (shutdown_tx, shutdown_rx) = watch::channel(true);

        let summary = scheduler.run_until(&catalog, shutdown_rx).await;
        drop(shutdown_tx);

        assert_eq!(summary.cancelled, 2);
        for label in ["CNX:BMF in CNX", "CNX:ECS in CNX"] {
            let lines: Vec<_> = captured(label)
                .into_iter()
                .filter(|(level, msg)| *level == log::Level::Info && msg.ends_with("CANCELLED"))
                .collect();
            assert_eq!(lines.len(), 1, "{label}");
        }
    }

    #[test]
    fn test_legal_transitions_pass_through() {
        let running = transition("T:S in T", JobState::Pending, JobState::Running);
        assert_eq!(running, JobState::Running);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "illegal state transition")]
    fn test_illegal_transition_is_caught_in_debug_builds() {
        transition("T:S in T", JobState::Running, JobState::Pending);
    }
}
