use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Report file extension
pub const REPORT_EXTENSION: &str = "dat";

/// One catalog entry: everything needed to produce one report
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionJob {
    /// Source database id; selects `xml_DB_<source>`
    pub source: String,

    /// Location item name (station or OCC environment, e.g., "BNK")
    pub location: String,

    /// Subsystem item name searched below the location (e.g., "BMF", "LNE__0001")
    pub system: String,

    /// Output subdirectory below the output root (e.g., "bnksms")
    pub output_dir: String,

    /// Report file stem (e.g., "BNK-BMF")
    pub output: String,

    /// Label written as `ENVIRONEMENT=` (e.g., "BNKSMS")
    pub environment: String,
}

impl ExtractionJob {
    /// Report path relative to the output root
    pub fn relative_output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir).join(self.file_name())
    }

    pub fn file_name(&self) -> String {
        format!("{}.{REPORT_EXTENSION}", self.output)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let fields = [
            ("source", &self.source),
            ("location", &self.location),
            ("system", &self.system),
            ("output_dir", &self.output_dir),
            ("output", &self.output),
            ("environment", &self.environment),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(format!("{field} must not be empty"));
            }
        }

        if !self
            .source
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(format!("source {:?} contains unsupported characters", self.source));
        }

        for (field, value) in [("output_dir", &self.output_dir), ("output", &self.output)] {
            if value.contains(['/', '\\']) || value == "." || value == ".." {
                return Err(format!("{field} {value:?} must be a single path component"));
            }
        }

        Ok(())
    }
}

impl fmt::Display for ExtractionJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} in {}", self.location, self.system, self.source)
    }
}
