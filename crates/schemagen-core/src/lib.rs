//! schemagen-core - Definition model, schema model, and shared rules
//!
//! This crate provides the foundational types for schema-driven code generation:
//! - [`Definition`] for the declarative integration definition
//! - [`SchemaNode`] for structural schemas parsed from JSON Schema
//! - [`GenerationError`] for the error taxonomy shared by every stage
//! - [`GeneratorConfig`] for generator configuration
//! - [`naming`] for the casing conventions used in paths and symbols

mod config;
mod definition;
mod error;
pub mod naming;
mod schema;

pub use config::GeneratorConfig;
pub use definition::{
    ActionDefinition, ChannelDefinition, ConversationDefinition, Definition, MessageDefinition,
    OrderedMap, SchemaRecord, SecretDefinition, StateDefinition, StateKind, TagDefinition,
};
pub use error::{GenerationError, GenerationResult};
pub use schema::{
    Field, Literal, ObjectSchema, Primitive, SchemaError, SchemaNode, join_pointer,
};

/// Log levels understood by the generator and its front ends
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    /// Parse a level name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Definition, GenerationError, GenerationResult, GeneratorConfig, LogLevel, OrderedMap,
        SchemaNode,
    };
}
