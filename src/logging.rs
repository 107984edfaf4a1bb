//! This module installs the process wide tracing subscriber: bunyan formatted JSON lines written
//! through a non-blocking writer, filtered by an `EnvFilter` directive.

use std::path::Path;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::{LogConfig, LogTarget};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Unable to setup log tracer: {0}")]
    LogTracer(String),
    #[error("Invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },
    #[error("Log file {0} has no file name")]
    InvalidFile(String),
    #[error("Unable to install the tracing subscriber: {0}")]
    Subscriber(String)
}

/// Installs the global subscriber. Log lines are only flushed while the returned guard is alive,
/// so keep it until the end of `main`.
pub fn init(config: &LogConfig, app_name: &str) -> Result<WorkerGuard, LoggingError> {
    LogTracer::init().map_err(|err| LoggingError::LogTracer(err.to_string()))?;

    let filter = EnvFilter::try_new(&config.filter).map_err(|err| LoggingError::Filter {
        filter: config.filter.clone(),
        reason: err.to_string()
    })?;

    let (non_blocking_writer, guard) = match &config.target {
        LogTarget::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogTarget::File(path) => {
            let (dir, file_name) = split_path(path)?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
    };

    let bunyan_formatting_layer = BunyanFormattingLayer::new(app_name.to_owned(), non_blocking_writer);
    let subscriber = Registry::default()
        .with(filter)
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer);
    tracing::subscriber::set_global_default(subscriber).map_err(|err| LoggingError::Subscriber(err.to_string()))?;

    Ok(guard)
}

/// Splits a log file path into the directory and the file name `rolling::never` expects.
fn split_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr), LoggingError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidFile(path.display().to_string()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new(".")
    };
    Ok((dir, file_name))
}
