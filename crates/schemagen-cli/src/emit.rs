//! Writes generated artifacts to disk

use anyhow::{Context, Result};
use schemagen_codegen::Artifact;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Writes artifacts under a root directory
///
/// Existing files are overwritten and nothing is ever removed.
pub struct Emitter {
    root: PathBuf,
    extension: String,
}

impl Emitter {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Destination of an artifact: `<root>/<path>.<extension>`
    pub fn target(&self, artifact: &Artifact) -> Result<PathBuf> {
        let relative = Path::new(&artifact.path);
        if artifact.path.is_empty()
            || !relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
        {
            anyhow::bail!("Refusing to write artifact outside the output directory: {:?}", artifact.path);
        }

        let mut target = self.root.join(relative);
        target.set_extension(&self.extension);
        Ok(target)
    }

    /// Write every artifact, returning the number of files written
    pub fn write_all(&self, artifacts: &[Artifact]) -> Result<usize> {
        // resolve every target before touching the disk
        let targets = artifacts
            .iter()
            .map(|artifact| self.target(artifact))
            .collect::<Result<Vec<_>>>()?;

        for (artifact, target) in artifacts.iter().zip(&targets) {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::write(target, &artifact.content)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            tracing::trace!(path = %target.display(), bytes = artifact.content.len(), "wrote artifact");
        }

        Ok(targets.len())
    }
}
