use anyhow::{Context as AnyhowContext, Result};
use env_logger::{Env, Target, WriteStyle};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Copies every log record to stderr and to a log file.
///
/// env_logger hands each formatted record to the pipe in a single write under
/// its own lock, so records from concurrent jobs never interleave.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().lock().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().lock().flush()?;
        self.file.flush()
    }
}

pub(crate) fn init_logging(verbose: bool, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .write_style(WriteStyle::Never)
                .target(Target::Pipe(Box::new(Tee { file })));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder.try_init().context("Failed to initialise logging")
}
