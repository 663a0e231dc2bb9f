use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog parse error: {0}")]
    Parse(String),

    #[error("Unsupported catalog schema_version {found} (expected {expected})")]
    UnsupportedSchema { found: u32, expected: u32 },

    #[error("Invalid job #{index}: {reason}")]
    InvalidJob { index: usize, reason: String },

    #[error("Output {path} is produced by more than one job")]
    DuplicateOutput { path: String },

    #[error("{source_id} is not a valid environment (expected one of {known})")]
    UnknownSource { source_id: String, known: String },
}
