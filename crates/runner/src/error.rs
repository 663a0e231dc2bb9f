use thiserror::Error;

pub type Result<T> = std::result::Result<T, JobError>;

/// Failure of a single job; never fatal to the run
#[derive(Error, Debug)]
pub enum JobError {
    #[error("{0}")]
    Hierarchy(#[from] ssr_hierarchy::HierarchyError),

    #[error("{0}")]
    Points(#[from] ssr_points::PointsError),

    #[error("{0}")]
    Report(#[from] ssr_report::ReportError),

    #[error("job panicked: {0}")]
    Panicked(String),
}
