//! Runtime log level changes

use crate::subscriber::level_filter;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use schemagen_core::LogLevel;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{Registry, reload};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReloadError {
    #[error("logging has not been initialized")]
    NotInitialized,

    #[error("failed to reload level filter: {0}")]
    Reload(String),
}

/// Handle for changing the level of the installed subscriber
pub struct ReloadHandle {
    handle: Mutex<Option<reload::Handle<LevelFilter, Registry>>>,
}

impl ReloadHandle {
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    /// Get the process-wide handle filled in by [`crate::init_logging`]
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    pub fn set_handle(&self, handle: reload::Handle<LevelFilter, Registry>) {
        *self.handle.lock() = Some(handle);
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.lock().is_some()
    }

    /// Replace the active level filter
    pub fn reload_level(&self, level: LogLevel) -> Result<(), ReloadError> {
        let guard = self.handle.lock();
        let handle = guard.as_ref().ok_or(ReloadError::NotInitialized)?;
        handle
            .reload(level_filter(level))
            .map_err(|e| ReloadError::Reload(e.to_string()))
    }

    /// Current level filter, if a subscriber is installed
    pub fn current_level(&self) -> Option<LevelFilter> {
        let guard = self.handle.lock();
        guard.as_ref().and_then(|h| h.clone_current())
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}
