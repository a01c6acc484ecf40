//! Subscriber installation

use crate::reload::ReloadHandle;
use schemagen_core::LogLevel;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload};

/// Install the global subscriber at the given level
///
/// Events go to stderr so that stdout stays free for command output. Returns `false`
/// when a global subscriber was already installed, in which case nothing changes.
pub fn init_logging(level: LogLevel) -> bool {
    let (filter, handle) = reload::Layer::new(level_filter(level));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return false;
    }

    ReloadHandle::global().set_handle(handle);
    tracing::trace!(%level, "logging initialized");
    true
}

/// Convert a [`LogLevel`] to a tracing [`LevelFilter`]
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}

#[cfg(test)]
#[path = "subscriber/subscriber_tests.rs"]
mod subscriber_tests;
