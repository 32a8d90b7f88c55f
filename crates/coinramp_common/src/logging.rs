//! Logging utilities for the Coinramp application.
//!
//! This module provides a standardized approach to logging across all crates
//! in the workspace. It initialises the tracing subscriber once at startup and
//! offers a couple of helpers for logging results.

use coinramp_config::LoggingConfig;
use tracing::{error, info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix used by the rolling file appender.
const LOG_FILE_PREFIX: &str = "coinramp.log";

/// Initialize the tracing subscriber from the logging section of the config.
///
/// `RUST_LOG` directives are honoured; the configured level is added on top for
/// the `coinramp*` targets. When `directory` is set, a second non-ANSI layer writes
/// to a daily rolling file there.
///
/// The returned guard flushes the file writer on drop and must be held for the
/// lifetime of the process. Calling this twice is harmless: the second call keeps
/// the subscriber that is already installed.
pub fn init_from_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = parse_level(&config.level);

    let mut filter = EnvFilter::from_default_env();
    for directive in [format!("coinramp={}", level), format!("tower_http={}", level)] {
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => warn!("Ignoring log directive {}: {}", directive, e),
        }
    }

    let (file_layer, guard) = match config.directory.as_deref() {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(file_layer)
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
    guard
}

/// Parses a level name, falling back to INFO for anything unrecognised.
pub fn parse_level(value: &str) -> Level {
    value.trim().parse::<Level>().unwrap_or(Level::INFO)
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
