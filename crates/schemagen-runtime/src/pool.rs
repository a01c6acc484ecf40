//! Fixed-size worker pool

use crate::cancel::CancelHandle;
use schemagen_core::{GenerationError, GenerationResult, GeneratorConfig};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Configuration for the worker pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker threads, and the cap on tasks in flight
    pub workers: usize,
    /// Name prefix for worker threads
    pub thread_name: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::from_generator_config(&GeneratorConfig::default())
    }
}

impl PoolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive pool settings from a generator configuration
    pub fn from_generator_config(config: &GeneratorConfig) -> Self {
        Self {
            workers: config.worker_count(),
            thread_name: "schemagen-worker".to_string(),
        }
    }

    /// Set the number of workers (clamped to at least one)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

/// Runs batches of independent tasks with bounded parallelism
///
/// The pool owns a dedicated multi-thread runtime, so [`WorkerPool::run_batch`] must be
/// called from synchronous code, not from inside another Tokio runtime.
pub struct WorkerPool {
    runtime: Runtime,
    config: PoolConfig,
}

type TaskOutcome<R> = (usize, Option<GenerationResult<R>>);

impl WorkerPool {
    /// Create a pool with the given configuration
    pub fn new(config: PoolConfig) -> GenerationResult<Self> {
        let config = PoolConfig {
            workers: config.workers.max(1),
            ..config
        };

        let runtime = Builder::new_multi_thread()
            .worker_threads(config.workers)
            .thread_name(&config.thread_name)
            .build()
            .map_err(|e| GenerationError::Internal(format!("Failed to create worker pool: {}", e)))?;

        Ok(Self { runtime, config })
    }

    /// Create a pool with the given number of workers
    pub fn with_workers(workers: usize) -> GenerationResult<Self> {
        Self::new(PoolConfig::new().with_workers(workers))
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn workers(&self) -> usize {
        self.config.workers
    }

    /// Run `task` over every item and return the results in input order
    ///
    /// At most `workers` tasks run at once. A failing task at index `i` cancels every
    /// task after `i`; tasks before `i` still run. The error of the lowest failing index
    /// is returned, so the same input always reports the same error. A panicking task
    /// fails with [`GenerationError::Internal`] at its own index.
    pub fn run_batch<T, R, F>(&self, items: Vec<T>, task: F) -> GenerationResult<Vec<R>>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> GenerationResult<R> + Send + Sync + 'static,
    {
        let total = items.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let limit = self.config.workers;
        let task = Arc::new(task);
        let cancel = CancelHandle::new();

        tracing::trace!(tasks = total, workers = limit, "running batch");

        self.runtime.block_on(async move {
            let permits = Arc::new(Semaphore::new(limit));
            let mut set: JoinSet<TaskOutcome<R>> = JoinSet::new();

            for (index, item) in items.into_iter().enumerate() {
                let permit = match Arc::clone(&permits).acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return Err(GenerationError::Internal(format!(
                            "worker pool closed: {}",
                            e
                        )));
                    }
                };

                // Indices only grow, so nothing after this point can run either.
                if cancel.is_cancelled(index) {
                    break;
                }

                let task = Arc::clone(&task);
                let cancel = cancel.clone();
                set.spawn(async move {
                    let _permit = permit;
                    if cancel.is_cancelled(index) {
                        return (index, None);
                    }
                    let result = run_guarded(index, || task(item));
                    if result.is_err() && cancel.fail_at(index) {
                        tracing::trace!(index, "cancelling later tasks");
                    }
                    (index, Some(result))
                });
            }

            let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(total).collect();
            let mut failure: Option<(usize, GenerationError)> = None;

            while let Some(joined) = set.join_next().await {
                match joined {
                    Ok((index, Some(Ok(value)))) => {
                        if let Some(slot) = slots.get_mut(index) {
                            *slot = Some(value);
                        }
                    }
                    Ok((index, Some(Err(err)))) => {
                        if failure.as_ref().is_none_or(|(first, _)| index < *first) {
                            failure = Some((index, err));
                        }
                    }
                    // Skipped after an earlier index failed
                    Ok((_, None)) => {}
                    Err(err) => {
                        set.abort_all();
                        return Err(GenerationError::Internal(format!(
                            "worker task failed: {}",
                            err
                        )));
                    }
                }
            }

            if let Some((index, err)) = failure {
                tracing::debug!(index, error = %err, "batch failed");
                return Err(err);
            }

            slots
                .into_iter()
                .enumerate()
                .map(|(index, slot)| {
                    slot.ok_or_else(|| {
                        GenerationError::Internal(format!("task {} produced no result", index))
                    })
                })
                .collect::<GenerationResult<Vec<R>>>()
        })
    }
}

/// Run one task, turning a panic into an error for its index
fn run_guarded<R>(index: usize, f: impl FnOnce() -> GenerationResult<R>) -> GenerationResult<R> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(GenerationError::Internal(format!(
            "worker task {} panicked: {}",
            index, message
        )))
    })
}
