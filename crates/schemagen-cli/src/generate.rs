//! Generate command implementation

use crate::emit::Emitter;
use crate::settings::{load_config, load_definition};
use anyhow::{Context, Result};
use schemagen_codegen::Generator;
use schemagen_core::{GeneratorConfig, LogLevel};
use schemagen_logging::ReloadHandle;
use std::path::PathBuf;

/// Options of `schemagen generate`
#[derive(Debug, Clone)]
pub struct Options {
    pub definition: PathBuf,
    pub out: PathBuf,
    pub config: Option<PathBuf>,
    pub workers: Option<usize>,
    pub verbose: bool,
}

/// Apply command-line overrides on top of the loaded config
pub fn apply_overrides(mut config: GeneratorConfig, options: &Options) -> GeneratorConfig {
    if let Some(workers) = options.workers {
        config = config.with_workers(workers);
    }
    if options.verbose {
        config = config.with_log_level(LogLevel::Debug.to_string());
    }
    config
}

pub fn run(options: &Options) -> Result<()> {
    let config = apply_overrides(load_config(options.config.as_deref())?, options);

    let handle = ReloadHandle::global();
    if handle.is_initialized() {
        handle
            .reload_level(config.level())
            .context("Failed to apply log level")?;
    }

    let definition = load_definition(&options.definition)?;
    let generator = Generator::new(config).context("Failed to start worker pool")?;
    tracing::debug!(workers = generator.config().worker_count(), "generator ready");

    let artifacts = generator
        .generate(&definition)
        .with_context(|| format!("Generation failed for {}", options.definition.display()))?;

    let emitter = Emitter::new(&options.out, generator.config().file_extension.clone());
    let written = emitter.write_all(&artifacts)?;

    println!("✓ Wrote {} file(s) to {}", written, options.out.display());

    Ok(())
}
