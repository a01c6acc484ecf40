//! Barrel (re-export) file rendering.
//!
//! A barrel imports every file-owning module reachable through its inline composites,
//! re-exports its direct file-owning children, declares one aggregate type per inline
//! composite, and finally declares its own aggregate:
//!
//! ```text
//! import * as createIssue_input from './create-issue/input';
//! import * as createIssue_output from './create-issue/output';
//!
//! export type ActionCreateIssue = {
//!   input: createIssue_input.ActionCreateIssueInput;
//!   output: createIssue_output.ActionCreateIssueOutput;
//! };
//!
//! export type Actions = {
//!   createIssue: ActionCreateIssue;
//! };
//! ```
//!
//! Paths of the children are relative to the barrel's directory.

use crate::module::Module;
use crate::typescript::property_name;
use schemagen_core::naming::{is_identifier, to_camel_case};

/// Render the content of a barrel exporting `export_name` over `children`
pub fn render_barrel(export_name: &str, children: &[Module]) -> String {
    let mut writer = BarrelWriter::default();
    let members: Vec<(String, String)> = children
        .iter()
        .map(|child| (child.key().to_string(), writer.member(child, true)))
        .collect();
    writer.finish(export_name, &members)
}

/// `export type <name> = { key: Type; ... };`
pub fn render_aggregate(name: &str, members: &[(String, String)]) -> String {
    if members.is_empty() {
        return format!("export type {} = {{}};", name);
    }

    let mut code = format!("export type {} = {{\n", name);
    for (key, ty) in members {
        code.push_str(&format!("  {}: {};\n", property_name(key), ty));
    }
    code.push_str("};");
    code
}

/// Module specifier for a path relative to the importing barrel
pub fn import_specifier(path: &str) -> String {
    format!("./{}", path.strip_suffix("/index").unwrap_or(path))
}

/// Namespace alias for an import specifier, e.g. `./create-issue/input` → `createIssue_input`
pub fn import_alias(specifier: &str) -> String {
    let alias = specifier
        .trim_start_matches("./")
        .split('/')
        .map(to_camel_case)
        .collect::<Vec<_>>()
        .join("_");

    if is_identifier(&alias) {
        alias
    } else {
        format!("_{}", alias)
    }
}

#[derive(Default)]
struct BarrelWriter {
    imports: Vec<String>,
    reexports: Vec<String>,
    inline: Vec<String>,
}

impl BarrelWriter {
    /// Type expression for `module` as seen from the barrel
    fn member(&mut self, module: &Module, direct: bool) -> String {
        match module.def() {
            Some(def) => {
                let specifier = import_specifier(&def.path);
                let alias = import_alias(&specifier);
                push_unique(
                    &mut self.imports,
                    format!("import * as {} from '{}';", alias, specifier),
                );
                if direct {
                    push_unique(
                        &mut self.reexports,
                        format!("export * from '{}';", specifier),
                    );
                }
                format!("{}.{}", alias, def.export_name)
            }
            None => {
                let members: Vec<(String, String)> = module
                    .children()
                    .iter()
                    .map(|child| (child.key().to_string(), self.member(child, false)))
                    .collect();
                self.inline
                    .push(render_aggregate(module.export_name(), &members));
                module.export_name().to_string()
            }
        }
    }

    fn finish(self, export_name: &str, members: &[(String, String)]) -> String {
        let blocks = [
            self.imports.join("\n"),
            self.reexports.join("\n"),
            self.inline.join("\n\n"),
            render_aggregate(export_name, members),
        ];

        let mut code = blocks
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        code.push('\n');
        code
    }
}

fn push_unique(lines: &mut Vec<String>, line: String) {
    if !lines.contains(&line) {
        lines.push(line);
    }
}

#[cfg(test)]
#[path = "barrel/barrel_tests.rs"]
mod barrel_tests;
