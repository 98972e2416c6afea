use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::driver::BatchConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate TypeScript declarations from Yarn mappings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert every mapping file under a directory into one declaration file
    Batch(BatchArgs),
    /// Parse one mapping file into its JSON class tree
    Parse(FileArgs),
    /// Generate declarations from one JSON class tree
    Generate(FileArgs),
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory searched recursively for mapping files
    #[arg(long, default_value = "yarn/mappings")]
    pub input: PathBuf,
    /// Combined declaration file
    #[arg(long, default_value = "Minecraft.d.ts")]
    pub output: PathBuf,
    /// Where the raw content of a file that failed to parse is written
    #[arg(long, default_value = "error.mappings")]
    pub parse_dump: PathBuf,
    /// Where the class tree of a file that failed to generate is written
    #[arg(long, default_value = "error.mappings.json")]
    pub tree_dump: PathBuf,
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Input file
    #[arg(long)]
    pub file: PathBuf,
    /// Output file
    #[arg(long)]
    pub output: PathBuf,
}

impl From<BatchArgs> for BatchConfig {
    fn from(args: BatchArgs) -> Self {
        BatchConfig {
            input_dir: args.input,
            output_file: args.output,
            parse_dump: args.parse_dump,
            tree_dump: args.tree_dump,
        }
    }
}
