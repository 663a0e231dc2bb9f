use crate::{CatalogError, ExtractionJob, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../../../catalog/ssr.json");

pub const CATALOG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    schema_version: u32,
    jobs: Vec<ExtractionJob>,
}

/// Validated, read-only table of extraction jobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCatalog {
    jobs: Vec<ExtractionJob>,
}

impl JobCatalog {
    /// Station and OCC jobs shipped with the tool
    pub fn builtin() -> Result<Self> {
        Self::from_bytes(BUILTIN_CATALOG.as_bytes())
    }

    /// Load a catalog file (JSON, or TOML with `[[jobs]]` tables)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_bytes(&bytes)?;
        log::debug!("Loaded {} jobs from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = parse_raw(bytes)?;
        if raw.schema_version != CATALOG_SCHEMA_VERSION {
            return Err(CatalogError::UnsupportedSchema {
                found: raw.schema_version,
                expected: CATALOG_SCHEMA_VERSION,
            });
        }
        Self::from_jobs(raw.jobs)
    }

    pub fn from_jobs(jobs: Vec<ExtractionJob>) -> Result<Self> {
        let mut outputs = HashSet::with_capacity(jobs.len());
        for (index, job) in jobs.iter().enumerate() {
            job.validate()
                .map_err(|reason| CatalogError::InvalidJob { index, reason })?;

            let path = job.relative_output_path();
            if !outputs.insert(path.clone()) {
                return Err(CatalogError::DuplicateOutput {
                    path: path.display().to_string(),
                });
            }
        }
        Ok(Self { jobs })
    }

    pub fn jobs(&self) -> &[ExtractionJob] {
        &self.jobs
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractionJob> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Distinct source ids, sorted
    pub fn sources(&self) -> Vec<&str> {
        self.jobs
            .iter()
            .map(|job| job.source.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn contains_source(&self, source_id: &str) -> bool {
        self.jobs.iter().any(|job| job.source == source_id)
    }

    /// Restrict to the jobs of one source. Matching is case-insensitive.
    pub fn filter_source(&self, source_id: &str) -> Result<Self> {
        let wanted = source_id.trim();
        let jobs: Vec<ExtractionJob> = self
            .jobs
            .iter()
            .filter(|job| job.source.eq_ignore_ascii_case(wanted))
            .cloned()
            .collect();

        if jobs.is_empty() {
            return Err(CatalogError::UnknownSource {
                source_id: source_id.to_string(),
                known: self.sources().join(", "),
            });
        }
        Ok(Self { jobs })
    }
}

impl<'a> IntoIterator for &'a JobCatalog {
    type Item = &'a ExtractionJob;
    type IntoIter = std::slice::Iter<'a, ExtractionJob>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

fn parse_raw(bytes: &[u8]) -> Result<RawCatalog> {
    let value: serde_json::Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes)
                .map_err(|err| CatalogError::Parse(format!("{json_err}; {err}")))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                CatalogError::Parse(format!(
                    "catalog is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}"
                ))
            })?;
            serde_json::to_value(toml_value).map_err(|err| {
                CatalogError::Parse(format!("failed to convert TOML catalog to JSON: {err}"))
            })?
        }
    };

    serde_json::from_value(value).map_err(|err| CatalogError::Parse(err.to_string()))
}
