pub mod cli;
pub mod driver;
pub mod model;
pub mod parser;
pub mod writer;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Command;

pub fn run() -> anyhow::Result<()> {
    init_logging();
    let args = cli::Cli::parse();

    match args.command {
        // 1. ── Walk, parse, generate, concatenate ────────────────────────
        Command::Batch(batch) => {
            driver::run_batch(&batch.into()).with_context(|| "Batch generation aborted")?;
        }
        // 2. ── Single-file stages ───────────────────────────────────────
        Command::Parse(files) => {
            driver::parse_to_json(&files.file, &files.output)
                .with_context(|| format!("Parsing {}", files.file.display()))?;
        }
        Command::Generate(files) => {
            driver::generate_from_json(&files.file, &files.output)
                .with_context(|| format!("Generating from {}", files.file.display()))?;
        }
    }

    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "yarn_typings=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
