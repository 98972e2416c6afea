//! File-level glue around the parser and the declaration writer.
//!
//! The batch driver is fail-fast: the first file that cannot be parsed or
//! generated aborts the run, leaves a diagnostic dump behind and writes no
//! output at all.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use walkdir::WalkDir;

use crate::model::ClassRecord;
use crate::parser::parse_mappings;
use crate::writer::dts::generate_declarations;
use crate::writer::json::{from_json, to_pretty_json};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    /// Raw content of a file that could not be parsed.
    pub parse_dump: PathBuf,
    /// JSON tree of a file whose declarations could not be generated.
    pub tree_dump: PathBuf,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("yarn/mappings"),
            output_file: PathBuf::from("Minecraft.d.ts"),
            parse_dump: PathBuf::from("error.mappings"),
            tree_dump: PathBuf::from("error.mappings.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub files: usize,
    pub bytes: usize,
}

/// Convert every file under `input_dir` and write the concatenation to
/// `output_file`. Files are visited depth-first in file-name order.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary> {
    let mut combined = String::new();
    let mut files = 0;

    for entry in WalkDir::new(&config.input_dir).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Walking {}", config.input_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        combined.push_str(&process_file(entry.path(), config)?);
        files += 1;
    }

    fs::write(&config.output_file, &combined)
        .with_context(|| format!("Writing {}", config.output_file.display()))?;
    info!(
        files,
        output = %config.output_file.display(),
        "wrote declarations"
    );

    Ok(BatchSummary {
        files,
        bytes: combined.len(),
    })
}

fn process_file(path: &Path, config: &BatchConfig) -> Result<String> {
    info!("Processing {}", path.display());

    let bytes = fs::read(path).with_context(|| format!("Reading {}", path.display()))?;
    let source = match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(err) => {
            error!(
                "Failed to parse {} with content written to {}",
                path.display(),
                config.parse_dump.display()
            );
            dump(&config.parse_dump, err.as_bytes())?;
            return Err(anyhow::Error::new(err.utf8_error()).context(format!(
                "Parsing {} (content written to {})",
                path.display(),
                config.parse_dump.display()
            )));
        }
    };

    let tree = parse_mappings(&source);
    match generate_declarations(&tree) {
        Ok(declarations) => Ok(declarations),
        Err(err) => {
            error!(
                "Failed to generate typings for {} with content written to {}",
                path.display(),
                config.tree_dump.display()
            );
            dump(&config.tree_dump, to_pretty_json(&tree)?.as_bytes())?;
            Err(err.context(format!(
                "Generating typings for {} (tree written to {})",
                path.display(),
                config.tree_dump.display()
            )))
        }
    }
}

fn dump(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Writing diagnostic {}", path.display()))
}

/// Parse one mapping file and write its class tree as JSON.
pub fn parse_to_json(input: &Path, output: &Path) -> Result<ClassRecord> {
    let source =
        fs::read_to_string(input).with_context(|| format!("Reading {}", input.display()))?;
    let tree = parse_mappings(&source);
    fs::write(output, to_pretty_json(&tree)?)
        .with_context(|| format!("Writing {}", output.display()))?;
    Ok(tree)
}

/// Read one JSON class tree and write its declarations.
pub fn generate_from_json(input: &Path, output: &Path) -> Result<()> {
    let json = fs::read_to_string(input).with_context(|| format!("Reading {}", input.display()))?;
    let tree = from_json(&json).with_context(|| format!("Loading {}", input.display()))?;
    let declarations = generate_declarations(&tree)?;
    fs::write(output, declarations).with_context(|| format!("Writing {}", output.display()))?;
    Ok(())
}
