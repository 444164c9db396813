pub mod check;
pub mod process;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sieve_core::{CanonicalField, NameParsingMode, Settings};

#[derive(Parser)]
#[command(
    name = "sieve",
    about = "Turn document extraction output into clean, deduplicated contact records",
    version
)]
pub struct Cli {
    /// Settings file (JSON); defaults are used when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a batch of extraction results through the pipeline
    Process {
        /// Extraction JSON files, or directories containing them
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Write the batch output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Records per output group
        #[arg(long)]
        group_size: Option<usize>,
        /// strict-two-part or lenient-multi-part
        #[arg(long)]
        name_mode: Option<NameParsingMode>,
        /// Concurrent extraction workers
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Run a single value through the sanitizer and a field validator
    Check {
        /// Canonical field (name, mobile, landline, address, email, date_of_birth, last_seen_date)
        field: CanonicalField,
        /// Raw value to check
        value: String,
    },
    /// Print the effective settings
    Config,
}

pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}
