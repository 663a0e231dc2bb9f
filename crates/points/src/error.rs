use thiserror::Error;

/// Result type for point operations
pub type Result<T> = std::result::Result<T, PointsError>;

#[derive(Error, Debug)]
pub enum PointsError {
    /// Collation data could not be loaded for the requested locale
    #[error("Collator error: {0}")]
    CollatorError(String),
}

/// Why a candidate point was dropped during resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionWarning {
    #[error("Point {name} has no alias")]
    MissingAlias { name: String },

    #[error("Unexpected number of parents ({parents}) for {alias}")]
    ParentCount { alias: String, parents: usize },

    #[error("Parent of {alias} has no alias")]
    ParentWithoutAlias { alias: String },
}
