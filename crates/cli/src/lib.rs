use anyhow::{bail, Context as AnyhowContext, Result};
use clap::Parser;
use flags::HeaderFlag;
use ssr_catalog::JobCatalog;
use ssr_hierarchy::HierarchyStore;
use ssr_report::{ReportOptions, ReportWriter, DEFAULT_REPORT_BASE};
use ssr_runner::{JobContext, JobScheduler, RunnerConfig, POOL_SIZE_ENV};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::watch;

mod flags;
mod logging;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "generate-ssr")]
#[command(about = "Generate Status Summary Report configuration files", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the xml_DB_<SOURCE> exports
    #[arg(short = 'x', long, required_unless_present = "list")]
    xml_dir: Option<PathBuf>,

    /// Directory receiving the reports (created if missing)
    #[arg(short = 'o', long, required_unless_present = "list")]
    output_dir: Option<PathBuf>,

    /// Number of jobs run at the same time (default: SSR_POOL_SIZE or 1)
    #[arg(short = 'p', long)]
    pool: Option<usize>,

    /// Only generate the reports of this source database (e.g. BNK)
    #[arg(short = 'e', long)]
    environment: Option<String>,

    /// Job catalog file (JSON or TOML) replacing the builtin one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Report header style
    #[arg(long, value_enum, default_value = "banner")]
    header: HeaderFlag,

    /// Add the generation time to the banner (reports are then not reproducible)
    #[arg(long)]
    timestamp: bool,

    /// Deployment directory shown in the banner
    #[arg(long, default_value = DEFAULT_REPORT_BASE)]
    report_base: String,

    /// Also append log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the selected jobs and exit
    #[arg(long)]
    list: bool,

    /// Print JSON on stdout (implies --quiet)
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long)]
    quiet: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();
    if cli.json {
        cli.quiet = true;
    }
    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let catalog = load_catalog(cli.catalog.as_deref(), cli.environment.as_deref())?;

    if cli.list {
        return print_catalog(&catalog, cli.json);
    }

    let (Some(xml_dir), Some(output_dir)) = (cli.xml_dir.as_deref(), cli.output_dir.as_deref())
    else {
        bail!("--xml-dir and --output-dir are required");
    };
    let config = runner_config(cli.pool)?;
    check_xml_dir(xml_dir)?;
    ensure_output_dir(output_dir)?;

    let options = ReportOptions {
        header: cli.header.as_domain(),
        timestamp: cli.timestamp,
        report_base: cli.report_base.clone(),
    };
    let ctx = JobContext::new(
        HierarchyStore::new(xml_dir),
        ReportWriter::new(output_dir, options),
    );
    let scheduler = JobScheduler::new(ctx, config);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, waiting for running jobs to finish");
            let _ = shutdown_tx.send(true);
        }
    });

    let summary = scheduler.run_until(&catalog, shutdown_rx).await;
    for failure in &summary.failures {
        log::debug!("Failed: {failure}");
    }

    if cli.json {
        print_stdout(&serde_json::to_string_pretty(&summary)?)?;
    }
    Ok(())
}

fn load_catalog(path: Option<&Path>, source: Option<&str>) -> Result<JobCatalog> {
    let catalog = match path {
        Some(path) => JobCatalog::from_path(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => JobCatalog::builtin().context("Failed to load the builtin catalog")?,
    };

    match source {
        Some(source) => catalog
            .filter_source(source)
            .context("Invalid --environment"),
        None => Ok(catalog),
    }
}

fn runner_config(pool: Option<usize>) -> Result<RunnerConfig> {
    let config = match pool {
        Some(pool_size) => RunnerConfig::with_pool_size(pool_size),
        None => RunnerConfig::from_env(),
    };
    if let Err(reason) = config.validate() {
        bail!("Invalid pool size: {reason}");
    }
    log::debug!(
        "Pool size {} (from {})",
        config.pool_size,
        if pool.is_some() { "--pool" } else { POOL_SIZE_ENV }
    );
    Ok(config)
}

fn check_xml_dir(xml_dir: &Path) -> Result<()> {
    if !xml_dir.is_dir() {
        bail!("XML directory not found: {}", xml_dir.display());
    }
    Ok(())
}

fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    if output_dir.is_dir() {
        return Ok(());
    }
    log::info!("Creating output directory: {}", output_dir.display());
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            output_dir.display()
        )
    })
}

fn print_catalog(catalog: &JobCatalog, json: bool) -> Result<()> {
    if json {
        return print_stdout(&serde_json::to_string_pretty(catalog.jobs())?);
    }

    let lines: Vec<String> = catalog
        .iter()
        .map(|job| {
            format!(
                "{:<4} {:<24} {}",
                job.source,
                format!("{}:{}", job.location, job.system),
                job.relative_output_path().display()
            )
        })
        .collect();
    print_stdout(&lines.join("\n"))
}
