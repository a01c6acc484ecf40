//! schemagen CLI - Type declaration generator
//!
//! Commands:
//! - `schemagen generate` - Generate artifacts from a definition and write them to disk
//! - `schemagen check` - Run generation without writing and print a summary

use clap::{Parser, Subcommand};
use schemagen_logging::{LogLevel, init_logging};
use std::path::PathBuf;

mod check;
mod emit;
mod generate;
mod settings;

#[derive(Parser)]
#[command(name = "schemagen")]
#[command(author, version, about = "Generate typed module trees from integration definitions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate artifacts and write them under an output directory
    Generate {
        /// Path to the definition (JSON)
        #[arg(short, long)]
        definition: PathBuf,

        /// Output directory for generated files
        #[arg(short, long)]
        out: PathBuf,

        /// Path to a generator config (default: ./schemagen.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of translation workers
        #[arg(long)]
        workers: Option<usize>,

        /// Log at debug level
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a definition by generating without writing
    Check {
        /// Path to the definition (JSON)
        #[arg(short, long)]
        definition: PathBuf,

        /// Path to a generator config (default: ./schemagen.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            definition,
            out,
            config,
            workers,
            verbose,
        } => {
            init_logging(if verbose { LogLevel::Debug } else { LogLevel::Info });
            let options = generate::Options {
                definition,
                out,
                config,
                workers,
                verbose,
            };
            generate::run(&options)?;
        }
        Commands::Check { definition, config } => {
            init_logging(LogLevel::Warn);
            check::run(&definition, config.as_deref())?;
        }
    }

    Ok(())
}
