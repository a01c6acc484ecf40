//! TypeScript rendering of IR declarations.

use crate::ir::{Declaration, DeclarationBody, Member, TypeExpr};
use schemagen_core::naming::is_identifier;
use schemagen_core::{Literal, Primitive};

const INDENT: &str = "  ";

/// Render a list of declarations as the body of one source file.
pub fn render_declarations(declarations: &[Declaration]) -> String {
    let mut code = declarations
        .iter()
        .map(render_declaration)
        .collect::<Vec<_>>()
        .join("\n\n");
    code.push('\n');
    code
}

/// Render a single declaration.
pub fn render_declaration(declaration: &Declaration) -> String {
    let mut code = String::new();

    if let Some(description) = &declaration.description {
        code.push_str(&doc_comment(description, ""));
    }

    match &declaration.body {
        DeclarationBody::Interface { members, open } => {
            if members.is_empty() && !open {
                code.push_str(&format!("export interface {} {{}}", declaration.name));
                return code;
            }

            code.push_str(&format!("export interface {} {{\n", declaration.name));
            for member in members {
                code.push_str(&render_member(member));
            }
            if *open {
                code.push_str(&format!("{}[key: string]: unknown;\n", INDENT));
            }
            code.push('}');
        }
        DeclarationBody::Alias(expr) => {
            code.push_str(&format!(
                "export type {} = {};",
                declaration.name,
                render_type(expr)
            ));
        }
    }

    code
}

fn render_member(member: &Member) -> String {
    let mut code = String::new();
    if let Some(description) = &member.description {
        code.push_str(&doc_comment(description, INDENT));
    }
    code.push_str(&format!(
        "{}{}{}: {};\n",
        INDENT,
        property_name(&member.name),
        if member.optional { "?" } else { "" },
        render_type(&member.ty)
    ));
    code
}

/// Render an inline type expression.
pub fn render_type(expr: &TypeExpr) -> String {
    match expr {
        TypeExpr::Primitive(primitive) => primitive_keyword(*primitive).to_string(),
        TypeExpr::Literal(literal) => render_literal(literal),
        TypeExpr::Array(item) => match item.as_ref() {
            TypeExpr::Union(_) => format!("({})[]", render_type(item)),
            _ => format!("{}[]", render_type(item)),
        },
        TypeExpr::Union(members) => members
            .iter()
            .map(render_type)
            .collect::<Vec<_>>()
            .join(" | "),
        TypeExpr::Map(value) => format!("{{ [key: string]: {} }}", render_type(value)),
        TypeExpr::Ref(name) => name.clone(),
    }
}

fn primitive_keyword(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String => "string",
        Primitive::Number | Primitive::Integer => "number",
        Primitive::Boolean => "boolean",
        Primitive::Null => "null",
        Primitive::Unknown => "unknown",
    }
}

fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::String(s) => quote(s),
        Literal::Number(n) => n.to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Null => "null".to_string(),
    }
}

/// Member name as written in a type body, quoted when it is not an identifier.
pub fn property_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

/// Single-quoted string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// JSDoc block for a description, one line when possible.
fn doc_comment(text: &str, indent: &str) -> String {
    let text = text.trim().replace("*/", "*\\/");
    let lines: Vec<&str> = text.lines().collect();

    if lines.len() <= 1 {
        return format!("{}/** {} */\n", indent, text);
    }

    let mut code = format!("{}/**\n", indent);
    for line in lines {
        let line = line.trim_end();
        if line.is_empty() {
            code.push_str(&format!("{} *\n", indent));
        } else {
            code.push_str(&format!("{} * {}\n", indent, line));
        }
    }
    code.push_str(&format!("{} */\n", indent));
    code
}
