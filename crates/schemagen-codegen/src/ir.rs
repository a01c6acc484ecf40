//! Intermediate representation for generated type declarations.
//!
//! The translator produces [`Declaration`]s; renderers such as [`crate::typescript`]
//! turn them into source text. Keeping the two apart lets the translator be tested on
//! structure (member counts, optionality) without string matching.

use schemagen_core::{Literal, Primitive};

/// A named, top-level type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,

    /// Rendered as a doc comment above the declaration.
    pub description: Option<String>,

    pub body: DeclarationBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationBody {
    /// Record type with named members.
    ///
    /// `open` adds an index signature accepting unknown extra members.
    Interface { members: Vec<Member>, open: bool },

    /// Alias for a type expression.
    Alias(TypeExpr),
}

/// A member of an interface declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub ty: TypeExpr,
    pub optional: bool,
    pub description: Option<String>,
}

/// Inline type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Primitive(Primitive),
    Literal(Literal),
    Array(Box<TypeExpr>),
    Union(Vec<TypeExpr>),

    /// Record with arbitrary string keys.
    Map(Box<TypeExpr>),

    /// Reference to another declaration by name.
    Ref(String),
}

impl Declaration {
    pub fn interface(name: impl Into<String>, members: Vec<Member>, open: bool) -> Self {
        Self {
            name: name.into(),
            description: None,
            body: DeclarationBody::Interface { members, open },
        }
    }

    pub fn alias(name: impl Into<String>, expr: TypeExpr) -> Self {
        Self {
            name: name.into(),
            description: None,
            body: DeclarationBody::Alias(expr),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Interface members, or an empty slice for aliases.
    pub fn members(&self) -> &[Member] {
        match &self.body {
            DeclarationBody::Interface { members, .. } => members,
            DeclarationBody::Alias(_) => &[],
        }
    }

    /// Number of members that are not optional.
    pub fn required_count(&self) -> usize {
        self.members().iter().filter(|m| !m.optional).count()
    }
}

impl Member {
    pub fn new(name: impl Into<String>, ty: TypeExpr, optional: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            optional,
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}
