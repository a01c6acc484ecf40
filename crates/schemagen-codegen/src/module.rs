//! Generated-output module trees.
//!
//! A [`Module`] is either a leaf owning one file or a composite aggregating child
//! modules. A composite may own a file too (a barrel); one that does not is rendered
//! inline into the barrel of its nearest file-owning ancestor.
//!
//! Construction never fails. Name and path uniqueness are checked when the tree is
//! flattened by [`crate::pipeline::flatten`].

use crate::barrel::render_barrel;
use schemagen_core::naming::{lower_first, to_kebab_case};

/// One physical output unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDef {
    /// Relative, extension-less, `/`-separated path
    pub path: String,
    /// Primary symbol declared in `content`
    pub export_name: String,
    pub content: String,
    /// Every symbol a star re-export of this file brings in, `export_name` first
    pub exports: Vec<String>,
}

impl ModuleDef {
    pub fn new(
        path: impl Into<String>,
        export_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let export_name = export_name.into();
        Self {
            path: path.into(),
            exports: vec![export_name.clone()],
            export_name,
            content: content.into(),
        }
    }

    /// Add symbols declared besides `export_name`
    pub fn with_exports<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exports.extend(names.into_iter().map(Into::into));
        self
    }

    fn prefixed(self, segment: &str) -> Self {
        Self {
            path: join_path(segment, &self.path),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Module {
    Leaf {
        /// Member name in the parent aggregate
        key: String,
        def: ModuleDef,
    },
    Composite {
        key: String,
        export_name: String,
        def: Option<ModuleDef>,
        children: Vec<Module>,
    },
}

impl Module {
    /// Terminal node; its key is the export name with a lowercase first letter
    pub fn leaf(def: ModuleDef) -> Self {
        Module::Leaf {
            key: lower_first(&def.export_name),
            def,
        }
    }

    /// Aggregating node, optionally owning a file of its own
    pub fn composite(
        export_name: impl Into<String>,
        children: Vec<Module>,
        def: Option<ModuleDef>,
    ) -> Self {
        let export_name = export_name.into();
        Module::Composite {
            key: lower_first(&export_name),
            export_name,
            def,
            children,
        }
    }

    /// File-owning composite at `<dir>/index` whose content re-exports `children`
    ///
    /// Children keep the given order; their paths move under `dir`.
    pub fn barrel(dir: &str, export_name: impl Into<String>, children: Vec<Module>) -> Self {
        let export_name = export_name.into();
        let content = render_barrel(&export_name, &children);
        let segment = to_kebab_path(dir);
        let def = ModuleDef::new(join_path(&segment, "index"), export_name.clone(), content)
            .with_exports(barrel_exports(&children));
        let children = children
            .into_iter()
            .map(|child| child.prefixed(&segment))
            .collect();
        Module::composite(export_name, children, Some(def))
    }

    /// Barrel whose children are sorted by key
    pub fn index(dir: &str, export_name: impl Into<String>, mut children: Vec<Module>) -> Self {
        children.sort_by(|a, b| a.key().cmp(b.key()));
        Self::barrel(dir, export_name, children)
    }

    /// Same node nested under `prefix`
    ///
    /// Every path in the subtree moves under the kebab-cased prefix, and the node's key
    /// becomes `prefix`. Export names are left alone.
    pub fn rename(self, prefix: &str) -> Self {
        let segment = to_kebab_case(prefix);
        match self.prefixed(&segment) {
            Module::Leaf { def, .. } => Module::Leaf {
                key: prefix.to_string(),
                def,
            },
            Module::Composite {
                export_name,
                def,
                children,
                ..
            } => Module::Composite {
                key: prefix.to_string(),
                export_name,
                def,
                children,
            },
        }
    }

    /// Replace the member name used by the parent aggregate
    pub fn with_key(self, key: impl Into<String>) -> Self {
        let key = key.into();
        match self {
            Module::Leaf { def, .. } => Module::Leaf { key, def },
            Module::Composite {
                export_name,
                def,
                children,
                ..
            } => Module::Composite {
                key,
                export_name,
                def,
                children,
            },
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Module::Leaf { key, .. } | Module::Composite { key, .. } => key,
        }
    }

    pub fn export_name(&self) -> &str {
        match self {
            Module::Leaf { def, .. } => &def.export_name,
            Module::Composite { export_name, .. } => export_name,
        }
    }

    /// The file this node owns, if any
    pub fn def(&self) -> Option<&ModuleDef> {
        match self {
            Module::Leaf { def, .. } => Some(def),
            Module::Composite { def, .. } => def.as_ref(),
        }
    }

    pub fn children(&self) -> &[Module] {
        match self {
            Module::Leaf { .. } => &[],
            Module::Composite { children, .. } => children,
        }
    }

    /// Number of files in the subtree, duplicates included
    pub fn file_count(&self) -> usize {
        usize::from(self.def().is_some())
            + self.children().iter().map(Module::file_count).sum::<usize>()
    }

    fn prefixed(self, segment: &str) -> Self {
        if segment.is_empty() {
            return self;
        }
        match self {
            Module::Leaf { key, def } => Module::Leaf {
                key,
                def: def.prefixed(segment),
            },
            Module::Composite {
                key,
                export_name,
                def,
                children,
            } => Module::Composite {
                key,
                export_name,
                def: def.map(|d| d.prefixed(segment)),
                children: children
                    .into_iter()
                    .map(|child| child.prefixed(segment))
                    .collect(),
            },
        }
    }
}

/// Symbols a barrel exposes besides its own aggregate
///
/// Direct file-owning children are star re-exported, so all their exports pass through.
/// Inline composites are declared in the barrel itself; files below them are only
/// imported.
fn barrel_exports(children: &[Module]) -> Vec<String> {
    fn inline(module: &Module, out: &mut Vec<String>) {
        if module.def().is_some() {
            return;
        }
        out.push(module.export_name().to_string());
        for child in module.children() {
            inline(child, out);
        }
    }

    let mut out = Vec::new();
    for child in children {
        match child.def() {
            Some(def) => out.extend(def.exports.iter().cloned()),
            None => inline(child, &mut out),
        }
    }
    out
}

/// Join two relative paths, skipping empty parts
pub fn join_path(prefix: &str, path: &str) -> String {
    match (prefix.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (_, true) => prefix.to_string(),
        _ => format!("{}/{}", prefix, path),
    }
}

fn to_kebab_path(dir: &str) -> String {
    dir.split('/')
        .filter(|s| !s.is_empty())
        .map(to_kebab_case)
        .collect::<Vec<_>>()
        .join("/")
}
