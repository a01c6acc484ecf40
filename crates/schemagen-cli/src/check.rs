//! Check command implementation

use crate::settings::{load_config, load_definition};
use anyhow::{Context, Result};
use schemagen_codegen::{Artifact, Generator};
use std::path::Path;

/// Artifact count per top-level directory, in first-seen order
///
/// Artifacts at the root (the top-level `index`) are counted under `.`.
pub fn summarize(artifacts: &[Artifact]) -> Vec<(String, usize)> {
    let mut summary: Vec<(String, usize)> = Vec::new();
    for artifact in artifacts {
        let dir = match artifact.path.split_once('/') {
            Some((dir, _)) => dir,
            None => ".",
        };
        match summary.iter_mut().find(|(name, _)| name == dir) {
            Some((_, count)) => *count += 1,
            None => summary.push((dir.to_string(), 1)),
        }
    }
    summary
}

pub fn run(definition_path: &Path, config_path: Option<&Path>) -> Result<()> {
    println!("Checking definition: {}", definition_path.display());

    let config = load_config(config_path)?;
    let definition = load_definition(definition_path)?;
    let generator = Generator::new(config).context("Failed to start worker pool")?;

    let artifacts = generator
        .generate(&definition)
        .with_context(|| format!("Generation failed for {}", definition_path.display()))?;

    if !definition.name.is_empty() {
        println!("✓ Integration: {}", definition.name);
    }
    for (dir, count) in summarize(&artifacts) {
        println!("✓ {}: {} file(s)", dir, count);
    }
    println!("\n{} artifact(s), definition is valid!", artifacts.len());

    Ok(())
}
