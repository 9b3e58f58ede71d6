//! Structured logging with tracing
//!
//! Centralized subscriber setup for binaries and tests that embed the
//! injector. The engine itself only emits `tracing` events; nothing is
//! printed unless a subscriber is installed.

use std::ffi::OsStr;
use std::path::Path;

use modwire_domain::error::{Error, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

pub use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILE_STEM, LOG_ENV_VAR};

type OutputLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Initialize logging with the provided configuration
///
/// `MODWIRE_LOG` takes precedence over `config.level` when set. Fails if a
/// global subscriber is already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut outputs = vec![output_layer(std::io::stdout, config.json_format, true)];
    if let Some(path) = &config.file_output {
        let appender = tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| Path::new(".")),
            path.file_stem()
                .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_STEM)),
        );
        outputs.push(output_layer(appender, config.json_format, false));
    }

    Registry::default()
        .with(filter)
        .with(outputs)
        .try_init()
        .map_err(|e| {
            Error::configuration_with_source("Failed to install tracing subscriber", e)
        })?;
    info!(level = %level, file = ?config.file_output, "Logging initialized");
    Ok(())
}

/// One formatted output; the console also gets ANSI colors and source locations
fn output_layer<W>(writer: W, json: bool, console: bool) -> OutputLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(console)
        .with_target(true)
        .with_file(console)
        .with_line_number(console);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Expected one of trace, debug, info, warn, error"
        ))),
    }
}

/// Log whether a configuration file was found
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        warn!(path = %config_path.display(), "Configuration file not found, using defaults");
    }
}
