//! Structural schema model
//!
//! [`SchemaNode`] is a tree describing the shape of a value. It is parsed from a
//! JSON-Schema-compatible document with [`SchemaNode::parse`]. Schemas are assumed to be
//! trees; `$ref` is rejected rather than followed.
//!
//! # Keyword Mapping
//!
//! | JSON Schema | Node |
//! |-------------|------|
//! | `true`, `{}` | `Primitive(Unknown)` |
//! | `const`, single-value `enum` | `Literal` |
//! | `enum`, `anyOf`, `oneOf`, `type: [..]` | `Union` |
//! | `type: "array"` | `Array` |
//! | `type: "object"` / `properties` | `Object` |
//! | `properties` + `additionalProperties` | `Open` |
//! | `additionalProperties` alone | `Map` |

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Keywords that describe shapes the translator cannot express.
const UNSUPPORTED_KEYWORDS: [&str; 3] = ["$ref", "allOf", "not"];

/// Error raised when a schema node is malformed or unsupported
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (at {path})")]
pub struct SchemaError {
    /// JSON-pointer style location of the offending node
    pub path: String,
    pub message: String,
}

impl SchemaError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: display_path(&path.into()),
            message: message.into(),
        }
    }
}

/// Primitive value types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Integer,
    Boolean,
    Null,
    /// Any value
    Unknown,
}

/// Literal (constant) values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

/// A named member of an object schema
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: SchemaNode,
    pub required: bool,
    pub description: Option<String>,
}

/// Object members in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub fields: Vec<Field>,
}

impl ObjectSchema {
    /// Number of members marked required
    pub fn required_count(&self) -> usize {
        self.fields.iter().filter(|f| f.required).count()
    }
}

/// Structural description of a value's shape
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Primitive(Primitive),
    Literal(Literal),
    Array(Box<SchemaNode>),
    Object(ObjectSchema),
    Union(Vec<SchemaNode>),
    /// Object that tolerates unknown extra fields
    Open(ObjectSchema),
    /// Object with arbitrary keys and a single value shape
    Map(Box<SchemaNode>),
}

impl SchemaNode {
    /// Parse a JSON-Schema-compatible document
    pub fn parse(value: &Value) -> Result<SchemaNode, SchemaError> {
        parse_at(value, "")
    }

    /// Check if this node needs its own named declaration when nested
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            SchemaNode::Object(_) | SchemaNode::Open(_) | SchemaNode::Union(_)
        )
    }
}

/// Append a JSON-pointer segment, escaping `~` and `/`
pub fn join_pointer(path: &str, segment: &str) -> String {
    format!("{}/{}", path, segment.replace('~', "~0").replace('/', "~1"))
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

fn parse_at(value: &Value, path: &str) -> Result<SchemaNode, SchemaError> {
    let obj = match value {
        Value::Bool(true) => return Ok(SchemaNode::Primitive(Primitive::Unknown)),
        Value::Bool(false) => {
            return Err(SchemaError::new(path, "`false` schema accepts no value"));
        }
        Value::Object(obj) => obj,
        _ => {
            return Err(SchemaError::new(
                path,
                "schema must be an object or a boolean",
            ));
        }
    };

    for keyword in UNSUPPORTED_KEYWORDS {
        if obj.contains_key(keyword) {
            return Err(SchemaError::new(
                join_pointer(path, keyword),
                format!("unsupported keyword `{keyword}`"),
            ));
        }
    }

    if let Some(value) = obj.get("const") {
        return parse_literal(value, &join_pointer(path, "const")).map(SchemaNode::Literal);
    }

    if let Some(values) = obj.get("enum") {
        return parse_enum(values, &join_pointer(path, "enum"));
    }

    for keyword in ["anyOf", "oneOf"] {
        if let Some(members) = obj.get(keyword) {
            return parse_union(members, &join_pointer(path, keyword));
        }
    }

    match obj.get("type") {
        None => {
            if obj.contains_key("properties") || obj.contains_key("additionalProperties") {
                parse_object(obj, path)
            } else if obj.contains_key("items") {
                parse_array(obj, path)
            } else {
                Ok(SchemaNode::Primitive(Primitive::Unknown))
            }
        }
        Some(Value::String(name)) => parse_typed(name, obj, path),
        Some(Value::Array(names)) => {
            let type_path = join_pointer(path, "type");
            let mut members = Vec::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                let name = name.as_str().ok_or_else(|| {
                    SchemaError::new(
                        join_pointer(&type_path, &i.to_string()),
                        "type names must be strings",
                    )
                })?;
                members.push(parse_typed(name, obj, path)?);
            }
            match members.len() {
                0 => Err(SchemaError::new(type_path, "`type` array must not be empty")),
                1 => Ok(members.remove(0)),
                _ => Ok(SchemaNode::Union(members)),
            }
        }
        Some(_) => Err(SchemaError::new(
            join_pointer(path, "type"),
            "`type` must be a string or an array of strings",
        )),
    }
}

fn parse_typed(name: &str, obj: &Map<String, Value>, path: &str) -> Result<SchemaNode, SchemaError> {
    match name {
        "string" => Ok(SchemaNode::Primitive(Primitive::String)),
        "number" => Ok(SchemaNode::Primitive(Primitive::Number)),
        "integer" => Ok(SchemaNode::Primitive(Primitive::Integer)),
        "boolean" => Ok(SchemaNode::Primitive(Primitive::Boolean)),
        "null" => Ok(SchemaNode::Primitive(Primitive::Null)),
        "array" => parse_array(obj, path),
        "object" => parse_object(obj, path),
        other => Err(SchemaError::new(
            join_pointer(path, "type"),
            format!("unknown type `{other}`"),
        )),
    }
}

fn parse_literal(value: &Value, path: &str) -> Result<Literal, SchemaError> {
    match value {
        Value::String(s) => Ok(Literal::String(s.clone())),
        Value::Number(n) => Ok(Literal::Number(n.clone())),
        Value::Bool(b) => Ok(Literal::Bool(*b)),
        Value::Null => Ok(Literal::Null),
        Value::Array(_) | Value::Object(_) => Err(SchemaError::new(
            path,
            "literal values must be scalars",
        )),
    }
}

fn parse_enum(values: &Value, path: &str) -> Result<SchemaNode, SchemaError> {
    let values = values
        .as_array()
        .filter(|arr| !arr.is_empty())
        .ok_or_else(|| SchemaError::new(path, "`enum` must be a non-empty array"))?;

    let mut literals = values
        .iter()
        .enumerate()
        .map(|(i, v)| parse_literal(v, &join_pointer(path, &i.to_string())).map(SchemaNode::Literal))
        .collect::<Result<Vec<_>, _>>()?;

    if literals.len() == 1 {
        Ok(literals.remove(0))
    } else {
        Ok(SchemaNode::Union(literals))
    }
}

fn parse_union(members: &Value, path: &str) -> Result<SchemaNode, SchemaError> {
    let members = members
        .as_array()
        .filter(|arr| !arr.is_empty())
        .ok_or_else(|| SchemaError::new(path, "union must be a non-empty array"))?;

    let mut nodes = members
        .iter()
        .enumerate()
        .map(|(i, m)| parse_at(m, &join_pointer(path, &i.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    if nodes.len() == 1 {
        Ok(nodes.remove(0))
    } else {
        Ok(SchemaNode::Union(nodes))
    }
}

fn parse_array(obj: &Map<String, Value>, path: &str) -> Result<SchemaNode, SchemaError> {
    let item = match obj.get("items") {
        None => SchemaNode::Primitive(Primitive::Unknown),
        Some(Value::Array(_)) => {
            return Err(SchemaError::new(
                join_pointer(path, "items"),
                "tuple arrays are not supported",
            ));
        }
        Some(items) => parse_at(items, &join_pointer(path, "items"))?,
    };
    Ok(SchemaNode::Array(Box::new(item)))
}

fn parse_object(obj: &Map<String, Value>, path: &str) -> Result<SchemaNode, SchemaError> {
    let properties_path = join_pointer(path, "properties");
    let properties = match obj.get("properties") {
        None => None,
        Some(Value::Object(props)) => Some(props),
        Some(_) => {
            return Err(SchemaError::new(properties_path, "`properties` must be an object"));
        }
    };

    let required_path = join_pointer(path, "required");
    let required: Vec<&str> = match obj.get("required") {
        None => Vec::new(),
        Some(Value::Array(names)) => names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                name.as_str().ok_or_else(|| {
                    SchemaError::new(
                        join_pointer(&required_path, &i.to_string()),
                        "required field names must be strings",
                    )
                })
            })
            .collect::<Result<_, _>>()?,
        Some(_) => {
            return Err(SchemaError::new(required_path, "`required` must be an array"));
        }
    };

    if let Some(missing) = required
        .iter()
        .find(|name| !properties.is_some_and(|props| props.contains_key(**name)))
    {
        return Err(SchemaError::new(
            required_path,
            format!("required field `{missing}` is not declared in `properties`"),
        ));
    }

    let mut fields = Vec::new();
    for (name, schema) in properties.into_iter().flatten() {
        let field_path = join_pointer(&properties_path, name);
        fields.push(Field {
            name: name.clone(),
            schema: parse_at(schema, &field_path)?,
            required: required.contains(&name.as_str()),
            description: schema
                .get("description")
                .and_then(|d| d.as_str())
                .map(String::from),
        });
    }

    let additional_path = join_pointer(path, "additionalProperties");
    let additional = match obj.get("additionalProperties") {
        None | Some(Value::Bool(false)) => None,
        Some(Value::Bool(true)) => Some(SchemaNode::Primitive(Primitive::Unknown)),
        Some(schema @ Value::Object(_)) => Some(parse_at(schema, &additional_path)?),
        Some(_) => {
            return Err(SchemaError::new(
                additional_path,
                "`additionalProperties` must be a boolean or a schema",
            ));
        }
    };

    let object = ObjectSchema { fields };
    Ok(match additional {
        None => SchemaNode::Object(object),
        Some(value) if object.fields.is_empty() => SchemaNode::Map(Box::new(value)),
        Some(_) => SchemaNode::Open(object),
    })
}
