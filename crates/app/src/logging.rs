//! File logging for the binary.
//!
//! The terminal belongs to the UI, so log records only ever go to rolling
//! files under the project data directory.

use std::path::Path;

use anyhow::Context as _;
use chronicle_core::LogLevel;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};

const LOG_FILE_BASENAME: &str = "chronicle";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

/// Starts the file logger. The returned handle must stay alive for the
/// lifetime of the process; dropping it flushes and stops logging.
pub fn init_logging(level: LogLevel, log_dir: &Path) -> anyhow::Result<LoggerHandle> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("create log dir {}", log_dir.display()))?;

    let handle = Logger::try_with_str(level.as_str())
        .with_context(|| format!("invalid log level {level}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("start logger")?;

    log::info!(
        "logging started level={level} dir={} version={}",
        log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}
