//! Generator configuration types

use crate::LogLevel;
use serde::{Deserialize, Serialize};

/// Configuration for a generation run
///
/// Every field has a default, so an empty document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of translation workers (default: available parallelism)
    #[serde(default)]
    pub workers: Option<usize>,

    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Extension the emitter appends to artifact paths
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// First line of every generated artifact
    #[serde(default = "default_header")]
    pub header: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_file_extension() -> String {
    "ts".to_string()
}

fn default_header() -> String {
    "// This file is generated. Do not edit it manually.".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            workers: None,
            log_level: default_log_level(),
            file_extension: default_file_extension(),
            header: default_header(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Set the number of translation workers
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Set the log level name
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the emitted file extension (without the leading dot)
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    /// Set the generated-file header line
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Resolved worker count, never zero
    pub fn worker_count(&self) -> usize {
        match self.workers {
            Some(n) => n.max(1),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }

    /// Parsed log level, falling back to `Info` for unknown names
    pub fn level(&self) -> LogLevel {
        LogLevel::parse(&self.log_level).unwrap_or(LogLevel::Info)
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
