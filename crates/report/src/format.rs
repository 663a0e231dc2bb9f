use serde::{Deserialize, Serialize};
use ssr_catalog::ExtractionJob;
use ssr_points::Point;
use std::fmt::Write;

/// Total width of the banner header, including both `#` borders
const BANNER_WIDTH: usize = 59;

pub const DEFAULT_REPORT_BASE: &str = "/home/dbs/SumReport";

pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderStyle {
    /// Body lines only
    None,

    /// `#` framed comment block naming the deployed file
    #[default]
    Banner,
}

/// Rendering options shared by every report of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub header: HeaderStyle,

    /// Add a "generated automatically on" line to the banner.
    /// Output is then no longer byte-identical between runs.
    pub timestamp: bool,

    /// Deployment directory shown in the banner
    pub report_base: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            header: HeaderStyle::Banner,
            timestamp: false,
            report_base: DEFAULT_REPORT_BASE.to_string(),
        }
    }
}

/// Render a report. `generated_at` is only used by banners with timestamps.
pub fn render_report(
    job: &ExtractionJob,
    points: &[Point],
    options: &ReportOptions,
    generated_at: Option<&str>,
) -> String {
    let mut out = String::with_capacity(64 + points.len() * 48);

    if options.header == HeaderStyle::Banner {
        push_banner(&mut out, job, options, generated_at);
    }

    let _ = writeln!(out, "ENVIRONEMENT={}", job.environment);
    out.push_str("CONFIGURATION=\n");
    for point in points {
        let _ = writeln!(out, "POINT=<alias>{}", point.key());
    }
    out
}

fn push_banner(
    out: &mut String,
    job: &ExtractionJob,
    options: &ReportOptions,
    generated_at: Option<&str>,
) {
    let border = "#".repeat(BANNER_WIDTH);
    let base = options.report_base.trim_end_matches('/');

    out.push_str(&border);
    out.push('\n');
    push_banner_line(out, &format!("{base}/{}/{}", job.environment, job.file_name()));
    push_banner_line(out, "Status Summary Report configuration file");
    if options.timestamp {
        if let Some(stamp) = generated_at {
            push_banner_line(out, &format!("generated automatically on {stamp}"));
        }
    }
    push_banner_line(out, "");
    out.push_str(&border);
    out.push('\n');
}

fn push_banner_line(out: &mut String, content: &str) {
    let inner = BANNER_WIDTH - 4;
    let _ = writeln!(out, "#  {content:<inner$}#");
}
