//! Schema to declaration translation.
//!
//! A [`SchemaTranslator`] turns one [`SchemaNode`] into a primary [`Declaration`] plus
//! the nested declarations it references. Compound values (objects, open objects,
//! unions) nested inside the primary get their own declarations named after their
//! position:
//!
//! | Position | Name |
//! |----------|------|
//! | array element | `<Base>Item` |
//! | object field `labels` | `<Base>Labels` |
//! | union member `i` | `<Base>Variant<i>` |
//! | map value | `<Base>Value` |
//!
//! The translator keeps a registry of the names it has emitted. Reaching the same name
//! with an identical node reuses the earlier declaration; reaching it with a different
//! node is a [`GenerationError::NamingCollision`].

use crate::ir::{Declaration, DeclarationBody, Member, TypeExpr};
use schemagen_core::naming::to_pascal_case;
use schemagen_core::{
    GenerationError, GenerationResult, ObjectSchema, SchemaError, SchemaNode, join_pointer,
};
use std::collections::HashMap;
use std::fmt;

/// Where a schema came from: definition section, item key, and the pointer of the
/// schema inside the item record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub section: String,
    pub item: String,
    pub pointer: String,
}

impl Origin {
    pub fn new(
        section: impl Into<String>,
        item: impl Into<String>,
        pointer: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            item: item.into(),
            pointer: pointer.into(),
        }
    }

    /// Pointer of a schema-relative path inside the item record
    pub fn locate(&self, path: &str) -> String {
        match path {
            "" | "/" => self.pointer.clone(),
            _ => format!("{}{}", self.pointer, path),
        }
    }

    pub fn schema_error(&self, err: SchemaError) -> GenerationError {
        let path = self.locate(&err.path);
        GenerationError::schema(
            self.section.as_str(),
            self.item.as_str(),
            SchemaError::new(path, err.message),
        )
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.item)
    }
}

struct Registered {
    path: String,
    node: SchemaNode,
}

/// Translates schemas into IR declarations for one output file.
pub struct SchemaTranslator {
    origin: Origin,
    declarations: Vec<Declaration>,
    registry: HashMap<String, Registered>,
}

impl SchemaTranslator {
    pub fn new(origin: Origin) -> Self {
        Self {
            origin,
            declarations: Vec::new(),
            registry: HashMap::new(),
        }
    }

    /// Parse a raw JSON schema and translate it under `name`.
    pub fn translate_value(
        mut self,
        schema: &serde_json::Value,
        name: &str,
        description: Option<&str>,
    ) -> GenerationResult<Vec<Declaration>> {
        let node = SchemaNode::parse(schema).map_err(|e| self.origin.schema_error(e))?;
        self.translate(&node, name, description)?;
        Ok(self.into_declarations())
    }

    /// Translate a node as a primary declaration named `name`.
    pub fn translate(
        &mut self,
        node: &SchemaNode,
        name: &str,
        description: Option<&str>,
    ) -> GenerationResult<()> {
        self.declare(name, node, "", description)
    }

    /// Declarations emitted so far, primary first, nested ones in depth-first order.
    pub fn into_declarations(self) -> Vec<Declaration> {
        self.declarations
    }

    fn declare(
        &mut self,
        name: &str,
        node: &SchemaNode,
        path: &str,
        description: Option<&str>,
    ) -> GenerationResult<()> {
        if let Some(existing) = self.registry.get(name) {
            if existing.node == *node {
                return Ok(());
            }
            return Err(GenerationError::NamingCollision {
                name: name.to_string(),
                first: format!("{} at {}", self.origin, self.origin.locate(&existing.path)),
                second: format!("{} at {}", self.origin, self.origin.locate(path)),
            });
        }

        self.registry.insert(
            name.to_string(),
            Registered {
                path: path.to_string(),
                node: node.clone(),
            },
        );

        // Reserve the slot so this declaration precedes the ones it references.
        let slot = self.declarations.len();
        self.declarations.push(
            Declaration::alias(name, TypeExpr::Ref(name.to_string()))
                .with_description(description.map(String::from)),
        );

        let body = match node {
            SchemaNode::Object(object) => DeclarationBody::Interface {
                members: self.members(name, object, path, false)?,
                open: false,
            },
            SchemaNode::Open(object) => DeclarationBody::Interface {
                members: self.members(name, object, path, true)?,
                open: true,
            },
            other => DeclarationBody::Alias(self.expr(name, other, path)?),
        };

        if let Some(declaration) = self.declarations.get_mut(slot) {
            declaration.body = body;
        }
        Ok(())
    }

    fn members(
        &mut self,
        name: &str,
        object: &ObjectSchema,
        path: &str,
        all_optional: bool,
    ) -> GenerationResult<Vec<Member>> {
        let properties = join_pointer(path, "properties");
        let mut members = Vec::with_capacity(object.fields.len());

        for (index, field) in object.fields.iter().enumerate() {
            let nested_name = format!("{}{}", name, symbol_segment(&field.name, index));
            let ty = self.nested(
                &nested_name,
                &field.schema,
                &join_pointer(&properties, &field.name),
            )?;
            members.push(
                Member::new(&field.name, ty, all_optional || !field.required)
                    .with_description(field.description.clone()),
            );
        }

        Ok(members)
    }

    /// Type expression for a node in a nested position.
    fn nested(&mut self, name: &str, node: &SchemaNode, path: &str) -> GenerationResult<TypeExpr> {
        if node.is_compound() {
            self.declare(name, node, path, None)?;
            Ok(TypeExpr::Ref(name.to_string()))
        } else {
            self.expr(name, node, path)
        }
    }

    fn expr(&mut self, name: &str, node: &SchemaNode, path: &str) -> GenerationResult<TypeExpr> {
        Ok(match node {
            SchemaNode::Primitive(primitive) => TypeExpr::Primitive(*primitive),
            SchemaNode::Literal(literal) => TypeExpr::Literal(literal.clone()),
            SchemaNode::Array(item) => TypeExpr::Array(Box::new(self.nested(
                &format!("{}Item", name),
                item,
                &join_pointer(path, "items"),
            )?)),
            SchemaNode::Map(value) => TypeExpr::Map(Box::new(self.nested(
                &format!("{}Value", name),
                value,
                &join_pointer(path, "additionalProperties"),
            )?)),
            SchemaNode::Union(members) => {
                let variants = join_pointer(path, "anyOf");
                let mut exprs = Vec::with_capacity(members.len());
                for (index, member) in members.iter().enumerate() {
                    exprs.push(self.nested(
                        &format!("{}Variant{}", name, index),
                        member,
                        &join_pointer(&variants, &index.to_string()),
                    )?);
                }
                TypeExpr::Union(exprs)
            }
            SchemaNode::Object(_) | SchemaNode::Open(_) => {
                self.declare(name, node, path, None)?;
                TypeExpr::Ref(name.to_string())
            }
        })
    }
}

/// PascalCase symbol fragment for a field name, restricted to identifier characters.
///
/// A name with no such character falls back to `Field<index>`, its position among the
/// object's fields.
fn symbol_segment(field: &str, index: usize) -> String {
    let segment: String = to_pascal_case(field)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    if segment.is_empty() {
        format!("Field{}", index)
    } else {
        segment
    }
}
