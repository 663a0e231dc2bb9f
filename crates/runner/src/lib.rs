//! # SSR Runner
//!
//! Executes extraction jobs from a [`ssr_catalog::JobCatalog`] with a bounded
//! worker pool.
//!
//! ```text
//! JobScheduler::run(catalog)
//!     │
//!     ├──> Semaphore(pool_size)       at most N jobs in flight
//!     │
//!     └──> per job (blocking worker)
//!          ├─> HierarchyStore::load(source)
//!          ├─> HierarchyTree::find_subtree(location, system)
//!          ├─> PointResolver::resolve  →  Collator::sort
//!          └─> ReportWriter::write
//! ```
//!
//! A job's failure is reported in its [`JobOutcome`] and the [`RunSummary`];
//! other jobs are unaffected.

mod config;
mod context;
mod error;
mod job;
mod limits;
mod outcome;
mod scheduler;
mod stats;

pub use config::RunnerConfig;
pub use context::JobContext;
pub use error::{JobError, Result};
pub use job::run_job;
pub use limits::{DEFAULT_POOL_SIZE, MAX_POOL_SIZE, POOL_SIZE_ENV};
pub use outcome::{JobOutcome, JobState, SkipReason};
pub use scheduler::JobScheduler;
pub use stats::RunSummary;
