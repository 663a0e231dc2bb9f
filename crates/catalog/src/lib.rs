//! # SSR Catalog
//!
//! Declarative table of report extraction jobs. Each entry names the source
//! database, the `(location, system)` subtree to extract and where the report
//! goes. Entries are independent of each other, even when several share a
//! source database.
//!
//! The builtin table lives in `catalog/ssr.json`; a replacement file may be
//! given as JSON or TOML.

mod catalog;
mod error;
mod job;

pub use catalog::{JobCatalog, CATALOG_SCHEMA_VERSION};
pub use error::{CatalogError, Result};
pub use job::{ExtractionJob, REPORT_EXTENSION};
