//! Error types for generation runs

use crate::schema::SchemaError;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Error type for generation operations
///
/// Every variant is fatal to the run that produced it. A failed run yields no artifacts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// A schema uses an unsupported or malformed shape
    #[error("schema error in {section} `{item}` at {path}: {message}")]
    Schema {
        section: String,
        item: String,
        path: String,
        message: String,
    },

    /// Two distinct declarations or artifacts resolve to the same name or path
    #[error("naming collision on `{name}` between {first} and {second}")]
    NamingCollision {
        name: String,
        first: String,
        second: String,
    },

    /// A definition-level convention was violated (checked before translation starts)
    #[error("invalid definition: `{identifier}` {message}")]
    ConfigValidation { identifier: String, message: String },

    /// The definition document could not be read
    #[error("definition error: {0}")]
    Definition(String),

    /// A translation worker failed outside of the translator
    #[error("internal error: {0}")]
    Internal(String),
}

impl GenerationError {
    /// Attach section and item context to a schema parsing error
    pub fn schema(section: impl Into<String>, item: impl Into<String>, err: SchemaError) -> Self {
        GenerationError::Schema {
            section: section.into(),
            item: item.into(),
            path: err.path,
            message: err.message,
        }
    }

    /// Returns a stable numeric code for the error kind
    pub fn error_code(&self) -> u32 {
        match self {
            GenerationError::Schema { .. } => 1,
            GenerationError::NamingCollision { .. } => 2,
            GenerationError::ConfigValidation { .. } => 3,
            GenerationError::Definition(_) => 4,
            GenerationError::Internal(_) => 5,
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Definition(err.to_string())
    }
}
