//! Generator config and definition loading

use anyhow::{Context, Result};
use schemagen_core::{Definition, GeneratorConfig, LogLevel};
use std::path::Path;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "schemagen.toml";

/// Load the generator config
///
/// An explicit path must exist. Without one, `schemagen.toml` in the working directory is
/// used if present, otherwise defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => config_from_file(path),
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            config_from_file(Path::new(DEFAULT_CONFIG_FILE))
        }
        None => Ok(GeneratorConfig::default()),
    }
}

fn config_from_file(path: &Path) -> Result<GeneratorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = config_from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded generator config");
    Ok(config)
}

/// Parse a TOML generator config and validate its values
pub fn config_from_str(content: &str) -> Result<GeneratorConfig> {
    let config: GeneratorConfig = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &GeneratorConfig) -> Result<()> {
    if config.workers == Some(0) {
        anyhow::bail!("`workers` must be at least 1");
    }
    if LogLevel::parse(&config.log_level).is_none() {
        anyhow::bail!("Unknown log level: {}", config.log_level);
    }
    if config.file_extension.is_empty() || config.file_extension.contains(['.', '/']) {
        anyhow::bail!(
            "`file_extension` must be a bare extension such as \"ts\", got {:?}",
            config.file_extension
        );
    }
    Ok(())
}

/// Read and parse a definition document
pub fn load_definition(path: &Path) -> Result<Definition> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read definition: {}", path.display()))?;
    Definition::from_json(&bytes)
        .with_context(|| format!("Failed to parse definition: {}", path.display()))
}
