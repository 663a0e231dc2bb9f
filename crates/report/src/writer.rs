use crate::format::{render_report, ReportOptions, TIMESTAMP_FORMAT};
use crate::{ReportError, Result};
use ssr_catalog::ExtractionJob;
use ssr_points::Point;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A report that has been published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub environment: String,
    pub path: PathBuf,
    pub points: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(Report),
    /// No points: nothing was written and any existing file was left alone
    Skipped,
}

/// Writes `.dat` reports below an output root
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_root: PathBuf,
    options: ReportOptions,
}

impl ReportWriter {
    pub fn new(output_root: impl AsRef<Path>, options: ReportOptions) -> Self {
        Self {
            output_root: output_root.as_ref().to_path_buf(),
            options,
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// `<output_root>/<output_dir>/<output>.dat`
    pub fn destination(&self, job: &ExtractionJob) -> PathBuf {
        self.output_root.join(job.relative_output_path())
    }

    pub fn render(&self, job: &ExtractionJob, points: &[Point]) -> String {
        let stamp = self
            .options
            .timestamp
            .then(|| chrono::Local::now().format(TIMESTAMP_FORMAT).to_string());
        render_report(job, points, &self.options, stamp.as_deref())
    }

    /// Publish the report for `job`, replacing any previous version.
    ///
    /// The content is written to a sibling `.tmp` file and renamed into place,
    /// so readers see either the old file or the complete new one.
    pub fn write(&self, job: &ExtractionJob, points: &[Point]) -> Result<WriteOutcome> {
        let path = self.destination(job);
        if points.is_empty() {
            log::info!("No points for {job}, {} not written", path.display());
            return Ok(WriteOutcome::Skipped);
        }

        if let Some(dir) = path.parent() {
            ensure_dir(dir)?;
        }

        let content = self.render(job, points);
        publish(&path, content.as_bytes())?;

        log::info!("{} points written to {}", points.len(), path.display());
        Ok(WriteOutcome::Written(Report {
            environment: job.environment.clone(),
            path,
            points: points.len(),
        }))
    }
}

/// Create `dir` unless it exists. Concurrent creators of the same directory
/// both succeed.
fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    log::info!("Creating directory: {}", dir.display());
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(source) => Err(ReportError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

fn publish(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("dat.tmp");

    let written = File::create(&tmp).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp);
        return Err(ReportError::Write { path: tmp, source });
    }

    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(ReportError::Publish {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}
