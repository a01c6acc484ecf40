//! Section builders.
//!
//! Each builder turns one section of a [`Definition`](schemagen_core::Definition) into
//! a barrel module. Items are translated on the [`WorkerPool`], one task per item, and
//! come back in declaration order; the section barrel then lists them sorted by key.
//!
//! | Section | Directory | Item symbol | Aggregate | Files per item |
//! |---------|-----------|-------------|-----------|----------------|
//! | configuration | `configuration` | | `Configuration` | `configuration/index` only |
//! | configurations | `configurations` | `Configuration<Key>` | `Configurations` | `schema` |
//! | actions | `action` | `Action<Key>` | `Actions` | `input`, `output` |
//! | events | `event` | `Event<Key>` | `Events` | `payload` |
//! | channels | `channel` | `Channel<Key>` | `Channels` | `messages/<name>`, `message-tags`, `conversation-tags` |
//! | states | `state` | `State<Key>` | `States` | `payload` |
//! | entities | `entity` | `Entity<Key>` | `Entities` | `schema` |
//! | secrets | `secrets` | | `Secrets` | `secrets/index` only |

use crate::ir::{Declaration, Member, TypeExpr};
use crate::module::{Module, ModuleDef};
use crate::translator::{Origin, SchemaTranslator};
use crate::typescript::render_declarations;
use schemagen_core::naming::{to_kebab_case, to_pascal_case};
use schemagen_core::{
    ActionDefinition, ChannelDefinition, Field, GenerationResult, Literal, ObjectSchema,
    OrderedMap, Primitive, SchemaNode, SchemaRecord, SecretDefinition, StateDefinition,
    TagDefinition, join_pointer,
};
use schemagen_runtime::WorkerPool;

/// Naming scheme of one definition section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Key of the section in the definition document
    pub name: &'static str,
    /// Output directory
    pub segment: &'static str,
    /// Prefix of item symbols
    pub prefix: &'static str,
    /// Symbol of the section aggregate
    pub aggregate: &'static str,
}

impl Section {
    /// Section-qualified symbol for an item key, e.g. `createIssue` → `ActionCreateIssue`
    pub fn symbol(&self, key: &str) -> String {
        format!("{}{}", self.prefix, to_pascal_case(key))
    }
}

pub const CONFIGURATION: Section = Section {
    name: "configuration",
    segment: "configuration",
    prefix: "",
    aggregate: "Configuration",
};

pub const CONFIGURATIONS: Section = Section {
    name: "configurations",
    segment: "configurations",
    prefix: "Configuration",
    aggregate: "Configurations",
};

pub const ACTIONS: Section = Section {
    name: "actions",
    segment: "action",
    prefix: "Action",
    aggregate: "Actions",
};

pub const EVENTS: Section = Section {
    name: "events",
    segment: "event",
    prefix: "Event",
    aggregate: "Events",
};

pub const CHANNELS: Section = Section {
    name: "channels",
    segment: "channel",
    prefix: "Channel",
    aggregate: "Channels",
};

pub const STATES: Section = Section {
    name: "states",
    segment: "state",
    prefix: "State",
    aggregate: "States",
};

pub const ENTITIES: Section = Section {
    name: "entities",
    segment: "entity",
    prefix: "Entity",
    aggregate: "Entities",
};

pub const SECRETS: Section = Section {
    name: "secrets",
    segment: "secrets",
    prefix: "",
    aggregate: "Secrets",
};

/// Single configuration schema as `configuration/index`
pub fn build_configuration(record: &SchemaRecord) -> GenerationResult<Module> {
    let origin = Origin::new(CONFIGURATION.name, CONFIGURATION.name, "/schema");
    let declarations = SchemaTranslator::new(origin).translate_value(
        &record.schema,
        CONFIGURATION.aggregate,
        record.description.as_deref(),
    )?;

    Ok(Module::leaf(declarations_def(
        format!("{}/index", CONFIGURATION.segment),
        CONFIGURATION.aggregate,
        &declarations,
    )))
}

pub fn build_configurations(
    pool: &WorkerPool,
    configurations: &OrderedMap<SchemaRecord>,
) -> GenerationResult<Option<Module>> {
    build_section(pool, CONFIGURATIONS, configurations, schema_item)
}

pub fn build_actions(
    pool: &WorkerPool,
    actions: &OrderedMap<ActionDefinition>,
) -> GenerationResult<Option<Module>> {
    build_section(pool, ACTIONS, actions, action_item)
}

pub fn build_events(
    pool: &WorkerPool,
    events: &OrderedMap<SchemaRecord>,
) -> GenerationResult<Option<Module>> {
    build_section(pool, EVENTS, events, payload_item)
}

pub fn build_channels(
    pool: &WorkerPool,
    channels: &OrderedMap<ChannelDefinition>,
) -> GenerationResult<Option<Module>> {
    build_section(pool, CHANNELS, channels, channel_item)
}

pub fn build_states(
    pool: &WorkerPool,
    states: &OrderedMap<StateDefinition>,
) -> GenerationResult<Option<Module>> {
    build_section(pool, STATES, states, |section, key, state: StateDefinition| {
        let record = SchemaRecord::new(state.schema);
        payload_item(section, key, record)
    })
}

pub fn build_entities(
    pool: &WorkerPool,
    entities: &OrderedMap<SchemaRecord>,
) -> GenerationResult<Option<Module>> {
    build_section(pool, ENTITIES, entities, schema_item)
}

/// Secret names as `secrets/index`: a `Secrets` record and a `SecretName` union
pub fn build_secrets(secrets: &OrderedMap<SecretDefinition>) -> Option<Module> {
    if secrets.is_empty() {
        return None;
    }

    let mut names: Vec<TypeExpr> = secrets
        .keys()
        .map(|name| TypeExpr::Literal(Literal::String(name.to_string())))
        .collect();
    let name_type = if names.len() == 1 {
        names.remove(0)
    } else {
        TypeExpr::Union(names)
    };

    let members = secrets
        .iter()
        .map(|(name, secret)| {
            Member::new(name, TypeExpr::Primitive(Primitive::String), secret.optional)
                .with_description(secret.description.clone())
        })
        .collect();

    let declarations = vec![
        Declaration::interface(SECRETS.aggregate, members, false),
        Declaration::alias("SecretName", name_type),
    ];

    Some(Module::leaf(declarations_def(
        format!("{}/index", SECRETS.segment),
        SECRETS.aggregate,
        &declarations,
    )))
}

/// Translate every item on the pool and gather them into the section barrel
fn build_section<T, F>(
    pool: &WorkerPool,
    section: Section,
    items: &OrderedMap<T>,
    build_item: F,
) -> GenerationResult<Option<Module>>
where
    T: Clone + Send + 'static,
    F: Fn(&Section, &str, T) -> GenerationResult<Module> + Send + Sync + 'static,
{
    if items.is_empty() {
        return Ok(None);
    }

    let batch: Vec<(String, T)> = items
        .iter()
        .map(|(key, item)| (key.to_string(), item.clone()))
        .collect();

    let modules = pool.run_batch(batch, move |(key, item)| {
        build_item(&section, &key, item).map(|module| module.rename(&key))
    })?;

    Ok(Some(Module::index(section.segment, section.aggregate, modules)))
}

fn action_item(section: &Section, key: &str, action: ActionDefinition) -> GenerationResult<Module> {
    let symbol = section.symbol(key);
    let input = schema_facet(section, key, &symbol, "input", "/input/schema", &action.input)?;
    let output = schema_facet(section, key, &symbol, "output", "/output/schema", &action.output)?;
    Ok(Module::composite(symbol, vec![input, output], None))
}

fn payload_item(section: &Section, key: &str, record: SchemaRecord) -> GenerationResult<Module> {
    let symbol = section.symbol(key);
    let payload = schema_facet(section, key, &symbol, "payload", "/schema", &record)?;
    Ok(Module::composite(symbol, vec![payload], None))
}

fn schema_item(section: &Section, key: &str, record: SchemaRecord) -> GenerationResult<Module> {
    let symbol = section.symbol(key);
    let schema = schema_facet(section, key, &symbol, "schema", "/schema", &record)?;
    Ok(Module::composite(symbol, vec![schema], None))
}

fn channel_item(
    section: &Section,
    key: &str,
    channel: ChannelDefinition,
) -> GenerationResult<Module> {
    let symbol = section.symbol(key);
    let messages_symbol = format!("{}Messages", symbol);

    let mut messages = Vec::with_capacity(channel.messages.len());
    for (name, record) in channel.messages.iter() {
        let pointer = join_pointer(&join_pointer("/messages", name), "schema");
        messages.push(schema_facet(
            section,
            key,
            &messages_symbol,
            name,
            &pointer,
            record,
        )?);
    }
    let messages = Module::composite(messages_symbol, messages, None).rename("messages");

    let message_tags = tags_facet(key, &symbol, "messageTags", &channel.message.tags)?;
    let conversation_tags =
        tags_facet(key, &symbol, "conversationTags", &channel.conversation.tags)?;

    Ok(Module::composite(
        symbol,
        vec![messages, message_tags, conversation_tags],
        None,
    ))
}

/// Leaf holding the translation of one schema of an item
///
/// The leaf is keyed `facet`, lives at the kebab-cased facet, and declares
/// `<symbol><Facet>`.
fn schema_facet(
    section: &Section,
    item: &str,
    symbol: &str,
    facet: &str,
    pointer: &str,
    record: &SchemaRecord,
) -> GenerationResult<Module> {
    let name = format!("{}{}", symbol, to_pascal_case(facet));
    let declarations = SchemaTranslator::new(Origin::new(section.name, item, pointer))
        .translate_value(&record.schema, &name, record.description.as_deref())?;

    Ok(facet_leaf(facet, name, &declarations))
}

/// Tags are string-valued and always optional
fn tags_facet(
    item: &str,
    symbol: &str,
    facet: &str,
    tags: &OrderedMap<TagDefinition>,
) -> GenerationResult<Module> {
    let node = SchemaNode::Object(ObjectSchema {
        fields: tags
            .iter()
            .map(|(name, tag)| Field {
                name: name.to_string(),
                schema: SchemaNode::Primitive(Primitive::String),
                required: false,
                description: tag.description.clone().or_else(|| tag.title.clone()),
            })
            .collect(),
    });

    let name = format!("{}{}", symbol, to_pascal_case(facet));
    let pointer = format!("/{}/tags", facet.trim_end_matches("Tags"));
    let mut translator = SchemaTranslator::new(Origin::new(CHANNELS.name, item, pointer));
    translator.translate(&node, &name, None)?;

    Ok(facet_leaf(facet, name, &translator.into_declarations()))
}

fn facet_leaf(facet: &str, name: String, declarations: &[Declaration]) -> Module {
    Module::leaf(declarations_def(to_kebab_case(facet), name, declarations)).with_key(facet)
}

/// File holding `declarations`, exporting each of them
fn declarations_def(
    path: impl Into<String>,
    export_name: impl Into<String>,
    declarations: &[Declaration],
) -> ModuleDef {
    let export_name = export_name.into();
    let others: Vec<&str> = declarations
        .iter()
        .map(|declaration| declaration.name.as_str())
        .filter(|name| *name != export_name)
        .collect();
    ModuleDef::new(path, export_name.as_str(), render_declarations(declarations))
        .with_exports(others)
}

#[cfg(test)]
#[path = "sections/sections_tests.rs"]
mod sections_tests;
