//! schemagen-codegen - type declarations and module trees from integration definitions
//!
//! # Architecture
//!
//! ```text
//! Definition
//!     ↓
//!  [Section Builders]  one batch per section on the WorkerPool
//!     ↓
//!  SchemaTranslator → IR (Declaration) → TypeScript text
//!     ↓
//!  Module trees (leaf / composite, barrels)
//!     ↓
//!  [flatten]  registry, collision checks
//!     ↓
//!  Vec<Artifact>
//! ```
//!
//! Nothing in this crate touches the filesystem. Writing artifacts is left to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use schemagen_codegen::Generator;
//! use schemagen_core::{Definition, GeneratorConfig};
//!
//! let definition = Definition::from_json_str(r#"{"events": {"ping": {"schema": {}}}}"#).unwrap();
//! let generator = Generator::new(GeneratorConfig::default()).unwrap();
//!
//! for artifact in generator.generate(&definition).unwrap() {
//!     println!("{}", artifact.path);
//! }
//! ```

pub mod barrel;
pub mod ir;
pub mod module;
pub mod pipeline;
pub mod sections;
pub mod translator;
pub mod typescript;

pub use ir::{Declaration, DeclarationBody, Member, TypeExpr};
pub use module::{Module, ModuleDef};
pub use pipeline::{Artifact, Generator, Registry, flatten};
pub use translator::{Origin, SchemaTranslator};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Artifact, Generator, Module, ModuleDef, SchemaTranslator};
}
