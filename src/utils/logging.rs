//! Logging Setup
//!
//! stderr output always; a daily rolling file in the data directory when
//! `log.file` is set. `RUST_LOG` takes precedence over `log.level`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::constants::LOG_FILE_PREFIX;
use crate::domain::config::LogConfig;
use crate::error::{Error, Result};
use crate::helpers::get_or_create_data_dir;

/// Build the filter from `RUST_LOG`, falling back to the configured level
pub fn build_filter(config: &LogConfig) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::Invalid {
            message: format!("Invalid log level {:?}: {e}", config.level),
        })
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the whole process, or buffered file
/// output is lost on exit.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(config)?;
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = if config.file {
        let dir = get_or_create_data_dir()?;
        let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (
            Some(fmt::layer().with_ansi(false).with_writer(writer)),
            Some(guard),
        )
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Invalid {
            message: format!("Logging already initialized: {e}"),
        })?;

    Ok(guard)
}
