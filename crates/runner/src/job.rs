use crate::{JobContext, JobOutcome, Result, SkipReason};
use ssr_catalog::ExtractionJob;
use ssr_points::{Collator, PointResolver};
use ssr_report::WriteOutcome;

/// Run one job to completion. Errors are folded into `JobOutcome::Failed`.
pub fn run_job(ctx: &JobContext, job: &ExtractionJob) -> JobOutcome {
    match try_run_job(ctx, job) {
        Ok(outcome) => outcome,
        Err(err) => JobOutcome::Failed {
            cause: err.to_string(),
        },
    }
}

fn try_run_job(ctx: &JobContext, job: &ExtractionJob) -> Result<JobOutcome> {
    let tree = ctx.store().load(&job.source)?;

    let Some(root) = tree.find_subtree(&job.location, &job.system) else {
        return Ok(JobOutcome::Skipped {
            reason: SkipReason::SubtreeNotFound,
        });
    };

    let resolution = PointResolver::new(&tree, &job.location).resolve(root);
    log::debug!(
        "{job}: scanned {}, self references {}, rejected {}, unresolved {}",
        resolution.scanned,
        resolution.self_references,
        resolution.rejected,
        resolution.warnings.len()
    );
    if resolution.is_empty() {
        return Ok(JobOutcome::Skipped {
            reason: SkipReason::NoPoints,
        });
    }

    let warnings = resolution.warnings.len();
    let points = Collator::en_us()?.sort(resolution.points);

    match ctx.writer().write(job, &points)? {
        WriteOutcome::Written(report) => Ok(JobOutcome::Completed {
            points: report.points,
            path: report.path,
            warnings,
        }),
        WriteOutcome::Skipped => Ok(JobOutcome::Skipped {
            reason: SkipReason::NoPoints,
        }),
    }
}
