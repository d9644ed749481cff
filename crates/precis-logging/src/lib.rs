//! # precis-logging
//!
//! Installs the global `tracing` subscriber for a precis binary.
//!
//! Output goes to stderr so stdout carries only results. `RUST_LOG`, when
//! set, replaces the configured level and per-module overrides entirely.

#![deny(unsafe_code)]

use std::fmt::Write as _;

use precis_settings::{LogFormat, LoggingSettings};
use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Errors from subscriber installation.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured level or a module override is not a valid directive.
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),
    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Build the filter directive string from settings.
///
/// `level` comes first, followed by `target=level` for each override in
/// key order.
pub fn filter_directives(settings: &LoggingSettings) -> String {
    let mut directives = settings.level.to_lowercase();
    for (module, level) in &settings.module_levels {
        let _ = write!(directives, ",{module}={}", level.to_lowercase());
    }
    directives
}

/// Install the global subscriber.
///
/// Returns [`LoggingError::AlreadyInitialized`] on a second call; callers
/// that may initialize twice (tests) can ignore it.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), LoggingError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directives(settings))?,
    };

    let registry = tracing_subscriber::registry();
    match settings.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .with_filter(env_filter),
            )
            .try_init()?,
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .with_filter(env_filter),
            )
            .try_init()?,
    }

    tracing::debug!(format = ?settings.format, "logging initialized");
    Ok(())
}
