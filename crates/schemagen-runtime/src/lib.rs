//! schemagen-runtime - bounded worker pool for translation batches
//!
//! This crate provides:
//! - [`WorkerPool`] running batches of CPU-bound tasks on a fixed-size Tokio runtime
//! - [`CancelHandle`] for cancelling the tail of a failed batch

mod cancel;
mod pool;

pub use cancel::CancelHandle;
pub use pool::{PoolConfig, WorkerPool};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CancelHandle, PoolConfig, WorkerPool};
}
