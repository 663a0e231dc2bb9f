//! # SSR Report
//!
//! Renders ordered points into the Status Summary Report `.dat` format and
//! publishes the file atomically:
//!
//! ```text
//! [optional banner]
//! ENVIRONEMENT=<environment>
//! CONFIGURATION=
//! POINT=<alias><prefix>:<local_name>
//! ```
//!
//! `ENVIRONEMENT` is spelled the way downstream consumers expect it.

mod error;
mod format;
mod writer;

pub use error::{ReportError, Result};
pub use format::{
    render_report, HeaderStyle, ReportOptions, DEFAULT_REPORT_BASE, TIMESTAMP_FORMAT,
};
pub use writer::{Report, ReportWriter, WriteOutcome};
