//! schemagen-logging - tracing subscriber setup
//!
//! Library crates only emit `tracing` events. Front ends call [`init_logging`] once to
//! install a stderr subscriber whose level can be changed later through
//! [`ReloadHandle::global`].

mod reload;
mod subscriber;

pub use reload::{ReloadError, ReloadHandle};
pub use schemagen_core::LogLevel;
pub use subscriber::{init_logging, level_filter};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_logging};
}
