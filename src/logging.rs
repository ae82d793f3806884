use std::path::Path;

use anyhow::Context;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

use crate::config;

/// Starts the global logger. Stdout belongs to request/response output, so
/// logs go to stderr, plus a rotating file when `log_dir` is given.
///
/// The returned handle must stay alive for the whole run or file output is lost.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> anyhow::Result<LoggerHandle> {
    let spec = if verbose {
        config::logging::LOG_SPEC_VERBOSE
    } else {
        config::logging::LOG_SPEC_DEFAULT
    };

    // RUST_LOG wins over the flag-derived spec.
    let logger = Logger::try_with_env_or_str(spec).context("invalid log specification")?;

    let handle = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed creating log dir {}", dir.display()))?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(config::logging::LOG_FILE_NAME))
                .rotate(
                    Criterion::Size(config::logging::LOG_ROTATE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(config::logging::LOG_ROTATE_KEEP_FILES),
                )
                .duplicate_to_stderr(Duplicate::Warn)
                .format(flexi_logger::detailed_format)
                .start()
                .context("failed to start logger")?
        }
        None => logger
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()
            .context("failed to start logger")?,
    };

    log::debug!("spdk-rpc-client {} starting", config::CLIENT_VERSION);
    Ok(handle)
}
