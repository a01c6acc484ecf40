//! Generation pipeline.
//!
//! [`Generator::generate`] runs in four steps:
//!
//! 1. [`preflight`] checks definition-level conventions before any translation.
//! 2. Section builders produce one barrel module per non-empty section, in a fixed order.
//! 3. The sections are gathered under a top-level `index` barrel exporting `Integration`.
//! 4. [`flatten`] walks the tree depth-first into a path-unique artifact list.
//!
//! Any error discards the whole run.

use crate::module::{Module, ModuleDef};
use crate::sections;
use schemagen_core::naming::{is_screaming_snake_case, is_valid_item_key};
use schemagen_core::{Definition, GenerationError, GenerationResult, GeneratorConfig};
use schemagen_runtime::{PoolConfig, WorkerPool};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::Instant;

/// Symbol of the top-level aggregate
pub const ROOT_EXPORT: &str = "Integration";

/// A generated file: extension-less relative path and full content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: String,
    pub content: String,
}

/// Runs generation for definitions with a fixed configuration and worker pool
pub struct Generator {
    config: GeneratorConfig,
    pool: WorkerPool,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> GenerationResult<Self> {
        let pool = WorkerPool::new(PoolConfig::from_generator_config(&config))?;
        Ok(Self { config, pool })
    }

    pub fn with_defaults() -> GenerationResult<Self> {
        Self::new(GeneratorConfig::default())
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the artifacts for `definition`
    ///
    /// Returns every artifact or an error, never a partial list. A definition with no
    /// sections yields no artifacts.
    pub fn generate(&self, definition: &Definition) -> GenerationResult<Vec<Artifact>> {
        let started = Instant::now();

        preflight(definition)?;

        let Some(root) = self.build(definition)? else {
            tracing::info!(artifacts = 0, "definition declares nothing to generate");
            return Ok(Vec::new());
        };

        let artifacts = flatten(&root, &self.config.header)?;

        tracing::info!(
            integration = %definition.name,
            artifacts = artifacts.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generation complete"
        );

        Ok(artifacts)
    }

    /// Build the module tree without flattening it
    pub fn build(&self, definition: &Definition) -> GenerationResult<Option<Module>> {
        let pool = &self.pool;
        let mut built = Vec::new();

        if let Some(record) = &definition.configuration {
            push_section(
                &mut built,
                sections::CONFIGURATION.name,
                Some(sections::build_configuration(record)?),
            );
        }
        push_section(
            &mut built,
            sections::CONFIGURATIONS.name,
            sections::build_configurations(pool, &definition.configurations)?,
        );
        push_section(
            &mut built,
            sections::ACTIONS.name,
            sections::build_actions(pool, &definition.actions)?,
        );
        push_section(
            &mut built,
            sections::EVENTS.name,
            sections::build_events(pool, &definition.events)?,
        );
        push_section(
            &mut built,
            sections::CHANNELS.name,
            sections::build_channels(pool, &definition.channels)?,
        );
        push_section(
            &mut built,
            sections::STATES.name,
            sections::build_states(pool, &definition.states)?,
        );
        push_section(
            &mut built,
            sections::ENTITIES.name,
            sections::build_entities(pool, &definition.entities)?,
        );
        push_section(
            &mut built,
            sections::SECRETS.name,
            sections::build_secrets(&definition.secrets),
        );

        if built.is_empty() {
            return Ok(None);
        }
        Ok(Some(Module::barrel("", ROOT_EXPORT, built)))
    }
}

fn push_section(built: &mut Vec<Module>, name: &str, module: Option<Module>) {
    match module {
        Some(module) => {
            tracing::debug!(
                section = name,
                items = module.children().len(),
                files = module.file_count(),
                "section built"
            );
            built.push(module);
        }
        None => tracing::trace!(section = name, "section empty"),
    }
}

/// Check definition-level conventions
///
/// Secret names must be `SCREAMING_SNAKE_CASE`. Item keys (and channel message names)
/// must start with a letter and contain only letters, digits, `_` and `-`.
pub fn preflight(definition: &Definition) -> GenerationResult<()> {
    for name in definition.secrets.keys() {
        if !is_screaming_snake_case(name) {
            return Err(GenerationError::ConfigValidation {
                identifier: name.to_string(),
                message: "is not a valid secret name, expected SCREAMING_SNAKE_CASE".to_string(),
            });
        }
    }

    check_keys("configurations", definition.configurations.keys())?;
    check_keys("actions", definition.actions.keys())?;
    check_keys("events", definition.events.keys())?;
    check_keys("channels", definition.channels.keys())?;
    for (key, channel) in definition.channels.iter() {
        check_keys(&format!("channels.{}.messages", key), channel.messages.keys())?;
    }
    check_keys("states", definition.states.keys())?;
    check_keys("entities", definition.entities.keys())?;

    Ok(())
}

fn check_keys<'a>(scope: &str, keys: impl Iterator<Item = &'a str>) -> GenerationResult<()> {
    for key in keys {
        if !is_valid_item_key(key) {
            return Err(GenerationError::ConfigValidation {
                identifier: format!("{}.{}", scope, key),
                message: "is not a valid key, expected a letter followed by letters, digits, `_` or `-`"
                    .to_string(),
            });
        }
    }
    Ok(())
}

/// Path-unique accumulator used while flattening one tree
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<String, RegistryEntry>,
}

#[derive(Debug)]
struct RegistryEntry {
    content: String,
    origin: String,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path`; returns false when an identical entry was already present
    pub fn register(&mut self, path: &str, content: &str, origin: &str) -> GenerationResult<bool> {
        match self.entries.entry(path.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(RegistryEntry {
                    content: content.to_string(),
                    origin: origin.to_string(),
                });
                Ok(true)
            }
            Entry::Occupied(existing) if existing.get().content == content => Ok(false),
            Entry::Occupied(existing) => Err(GenerationError::NamingCollision {
                name: path.to_string(),
                first: existing.get().origin.clone(),
                second: origin.to_string(),
            }),
        }
    }
}

/// Flatten a module tree into artifacts, depth-first
///
/// Each file-owning node comes before its descendants and siblings keep their order.
/// `header` becomes the first line of every artifact. Fails on sibling modules sharing
/// an export name or key, on two symbols reaching one barrel's exports (its own
/// aggregates or star re-exports of its children), and on a path reached twice with
/// different content.
pub fn flatten(root: &Module, header: &str) -> GenerationResult<Vec<Artifact>> {
    let mut flattener = Flattener {
        header,
        registry: Registry::new(),
        artifacts: Vec::new(),
    };
    flattener.visit(root, root.key())?;
    Ok(flattener.artifacts)
}

struct Flattener<'a> {
    header: &'a str,
    registry: Registry,
    artifacts: Vec<Artifact>,
}

impl Flattener<'_> {
    fn visit(&mut self, module: &Module, origin: &str) -> GenerationResult<()> {
        if let Some(def) = module.def() {
            self.emit(def, origin)?;
        }

        if let Module::Composite { children, .. } = module {
            check_siblings(children, origin)?;
            if module.def().is_some() {
                check_exports(module, origin)?;
            }
            for child in children {
                self.visit(child, &child_origin(origin, child.key()))?;
            }
        }

        Ok(())
    }

    fn emit(&mut self, def: &ModuleDef, origin: &str) -> GenerationResult<()> {
        if !self.registry.register(&def.path, &def.content, origin)? {
            tracing::trace!(path = %def.path, "duplicate artifact dropped");
            return Ok(());
        }

        let content = if self.header.is_empty() {
            def.content.clone()
        } else {
            format!("{}\n\n{}", self.header, def.content)
        };

        self.artifacts.push(Artifact {
            path: def.path.clone(),
            content,
        });
        Ok(())
    }
}

fn child_origin(origin: &str, key: &str) -> String {
    format!("{}.{}", origin, key)
}

/// Export names and keys must be unique among siblings
fn check_siblings(children: &[Module], origin: &str) -> GenerationResult<()> {
    let mut names: HashMap<&str, &str> = HashMap::new();
    let mut keys: HashMap<&str, &str> = HashMap::new();

    for child in children {
        if let Some(first) = names.insert(child.export_name(), child.key()) {
            return Err(GenerationError::NamingCollision {
                name: child.export_name().to_string(),
                first: child_origin(origin, first),
                second: child_origin(origin, child.key()),
            });
        }
        if let Some(first) = keys.insert(child.key(), child.export_name()) {
            return Err(GenerationError::NamingCollision {
                name: child.key().to_string(),
                first: sibling_origin(origin, child.key(), first),
                second: sibling_origin(origin, child.key(), child.export_name()),
            });
        }
    }

    Ok(())
}

/// Origin of a sibling that shares its key with another, told apart by export name
fn sibling_origin(origin: &str, key: &str, export_name: &str) -> String {
    format!("{} ({})", child_origin(origin, key), export_name)
}

/// Every symbol a barrel exports must be declared once
///
/// The barrel exports its own aggregate, one aggregate per inline composite below it,
/// and whatever its direct file-owning children export through `export *`.
fn check_exports(barrel: &Module, origin: &str) -> GenerationResult<()> {
    let mut exports = ExportSet::default();
    exports.insert(barrel.export_name(), origin)?;

    for child in barrel.children() {
        let at = child_origin(origin, child.key());
        match child.def() {
            Some(def) => {
                for name in &def.exports {
                    exports.insert(name, &at)?;
                }
            }
            None => exports.insert_inline(child, at)?,
        }
    }

    Ok(())
}

#[derive(Default)]
struct ExportSet {
    origins: HashMap<String, String>,
}

impl ExportSet {
    fn insert(&mut self, name: &str, origin: &str) -> GenerationResult<()> {
        match self.origins.entry(name.to_string()) {
            // Clashes inside one child barrel are reported when that barrel is visited.
            Entry::Occupied(first) if first.get() == origin => Ok(()),
            Entry::Occupied(first) => Err(GenerationError::NamingCollision {
                name: name.to_string(),
                first: first.get().clone(),
                second: origin.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(origin.to_string());
                Ok(())
            }
        }
    }

    /// Aggregates of an inline composite and its inline descendants, pre-order
    fn insert_inline(&mut self, module: &Module, origin: String) -> GenerationResult<()> {
        if module.def().is_some() {
            return Ok(());
        }
        self.insert(module.export_name(), &origin)?;
        for child in module.children() {
            self.insert_inline(child, child_origin(&origin, child.key()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "pipeline/pipeline_tests.rs"]
mod pipeline_tests;
