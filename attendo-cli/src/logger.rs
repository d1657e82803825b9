//! Logging setup
//!
//! Console output goes to stderr so command output stays pipeable. When a
//! log directory is given, a daily rotating `attendo.YYYY-MM-DD` file is
//! written as well.

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
pub fn default_level(verbose: bool) -> &'static str {
    if verbose || cfg!(debug_assertions) {
        "info,attendo_client=debug"
    } else {
        "warn"
    }
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Filter directive used when `RUST_LOG` is unset
/// * `json_format` - JSON lines instead of the human format
/// * `log_dir` - Optional directory for the rolling log file
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "attendo");
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(appender)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
