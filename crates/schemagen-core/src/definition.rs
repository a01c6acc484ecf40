//! Integration definition types
//!
//! A [`Definition`] is the declarative input of a generation run. Every section is an
//! [`OrderedMap`], which keeps the key order of the source document so that builders can
//! reassemble their output in declaration order.

use crate::error::GenerationResult;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Key-ordered mapping that preserves insertion (declaration) order
#[derive(Debug, Clone)]
pub struct OrderedMap<T> {
    entries: Vec<(String, T)>,
    /// Key to position in `entries`
    index: HashMap<String, usize>,
}

impl<T> OrderedMap<T> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a value, replacing (in place) any previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&position) => {
                if let Some(entry) = self.entries.get_mut(position) {
                    entry.1 = value;
                }
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index
            .get(key)
            .and_then(|&position| self.entries.get(position))
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<T: PartialEq> PartialEq for OrderedMap<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(String, T)> for OrderedMap<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<T> IntoIterator for OrderedMap<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T: Serialize> Serialize for OrderedMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<T> {
    type Value = OrderedMap<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<String, T>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: PhantomData,
        })
    }
}

/// A record carrying one structural schema plus descriptive metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRecord {
    /// JSON-Schema-compatible structural description
    pub schema: serde_json::Value,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl SchemaRecord {
    pub fn new(schema: serde_json::Value) -> Self {
        Self {
            schema,
            title: None,
            description: None,
        }
    }
}

/// An action: a named operation with an input and an output schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub input: SchemaRecord,
    pub output: SchemaRecord,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl ActionDefinition {
    pub fn new(input: serde_json::Value, output: serde_json::Value) -> Self {
        Self {
            input: SchemaRecord::new(input),
            output: SchemaRecord::new(output),
            title: None,
            description: None,
        }
    }
}

/// Tag metadata; tags are always string-valued
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagDefinition {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageDefinition {
    #[serde(default)]
    pub tags: OrderedMap<TagDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationDefinition {
    #[serde(default)]
    pub tags: OrderedMap<TagDefinition>,
}

/// A channel: a set of message types plus message and conversation tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelDefinition {
    #[serde(default)]
    pub messages: OrderedMap<SchemaRecord>,

    #[serde(default)]
    pub message: MessageDefinition,

    #[serde(default)]
    pub conversation: ConversationDefinition,

    #[serde(default)]
    pub title: Option<String>,
}

/// Scope a state is attached to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    #[default]
    Conversation,
    User,
    Integration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDefinition {
    #[serde(rename = "type", default)]
    pub kind: StateKind,

    pub schema: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecretDefinition {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub optional: bool,
}

/// The declarative description of an integration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub configuration: Option<SchemaRecord>,

    #[serde(default)]
    pub configurations: OrderedMap<SchemaRecord>,

    #[serde(default)]
    pub actions: OrderedMap<ActionDefinition>,

    #[serde(default)]
    pub events: OrderedMap<SchemaRecord>,

    #[serde(default)]
    pub channels: OrderedMap<ChannelDefinition>,

    #[serde(default)]
    pub states: OrderedMap<StateDefinition>,

    #[serde(default)]
    pub entities: OrderedMap<SchemaRecord>,

    #[serde(default)]
    pub secrets: OrderedMap<SecretDefinition>,
}

impl Definition {
    /// Create an empty definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a definition from JSON bytes
    pub fn from_json(bytes: &[u8]) -> GenerationResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse a definition from a JSON string
    pub fn from_json_str(content: &str) -> GenerationResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Check if the definition declares nothing to generate
    pub fn is_empty(&self) -> bool {
        self.configuration.is_none()
            && self.configurations.is_empty()
            && self.actions.is_empty()
            && self.events.is_empty()
            && self.channels.is_empty()
            && self.states.is_empty()
            && self.entities.is_empty()
            && self.secrets.is_empty()
    }
}
