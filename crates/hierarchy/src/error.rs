use std::path::PathBuf;
use thiserror::Error;

/// Result type for hierarchy operations
pub type Result<T> = std::result::Result<T, HierarchyError>;

/// Errors that can occur while loading a hierarchy document
#[derive(Error, Debug)]
pub enum HierarchyError {
    /// The source document does not exist
    #[error("Hierarchy document not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// Source identifier cannot be mapped to a path
    #[error("Invalid source id: {0:?}")]
    InvalidSourceId(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed XML
    #[error("XML error at byte {position}: {message}")]
    XmlError { position: u64, message: String },

    /// Document has no root element
    #[error("Hierarchy document has no root element")]
    EmptyDocument,
}

impl HierarchyError {
    /// Create an XML error
    pub fn xml(position: u64, msg: impl Into<String>) -> Self {
        Self::XmlError {
            position,
            message: msg.into(),
        }
    }
}
