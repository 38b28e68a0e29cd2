//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{self, RunConfig};
use crate::errors::{DocvetError, Result};
use crate::{pipeline, report};

// ============================================================================
// CLI ARGUMENTS - Command-line argument definitions
// ============================================================================

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "docvet",
    version,
    about = "Validates that code examples embedded in markdown documentation execute without error."
)]
pub struct DocvetArgs {
    #[command(subcommand)]
    pub command: ArgsCommand,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum ArgsCommand {
    /// Run every tagged snippet under the docs directory and report a summary.
    Check {
        /// Directory scanned (non-recursively) for markdown documentation.
        #[arg(default_value = config::DEFAULT_DOCS_ROOT)]
        docs_dir: PathBuf,
        /// Fence language tag that marks executable snippets.
        #[arg(long, default_value = config::DEFAULT_MARKER)]
        marker: String,
        /// JavaScript file evaluated ahead of every snippet, replacing the
        /// built-in bindings.
        #[arg(long)]
        preamble: Option<PathBuf>,
        /// Emit the outcome records as JSON after the transcript.
        #[arg(long)]
        json: bool,
    },
    /// List tagged snippets without executing them.
    List {
        /// Directory scanned (non-recursively) for markdown documentation.
        #[arg(default_value = config::DEFAULT_DOCS_ROOT)]
        docs_dir: PathBuf,
        /// Fence language tag that marks executable snippets.
        #[arg(long, default_value = config::DEFAULT_MARKER)]
        marker: String,
    },
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI. Returns the process exit status.
pub fn run() -> i32 {
    let args = DocvetArgs::parse();
    let result = match args.command {
        ArgsCommand::Check {
            docs_dir,
            marker,
            preamble,
            json,
        } => run_check_command(docs_dir, marker, preamble, json),
        ArgsCommand::List { docs_dir, marker } => run_list_command(docs_dir, marker),
    };
    result.unwrap_or_else(|err| {
        eprintln!("{:?}", miette::Report::new(err));
        1
    })
}

fn run_check_command(
    docs_dir: PathBuf,
    marker: String,
    preamble: Option<PathBuf>,
    json: bool,
) -> Result<i32> {
    let config = RunConfig {
        docs_root: docs_dir,
        marker,
        preamble: load_preamble(preamble)?,
        emit_json: json,
        ..RunConfig::default()
    };

    let outcomes = pipeline::run_check(&config)?;
    let (stats, summary) = report::render_stats(&outcomes);
    println!("{stats}");
    if config.emit_json {
        // Serializing plain records with derived impls does not fail.
        let rendered = serde_json::to_string_pretty(&outcomes)
            .unwrap_or_else(|_| "[]".to_string());
        println!("{rendered}");
    }
    report::print_verdict(&summary, config.use_colors);
    Ok(summary.exit_status())
}

fn run_list_command(docs_dir: PathBuf, marker: String) -> Result<i32> {
    let config = RunConfig {
        docs_root: docs_dir,
        marker,
        ..RunConfig::default()
    };
    let snippets = pipeline::list_snippets(&config)?;
    for snippet in &snippets {
        println!(
            "{}\t#{}\t{} lines",
            snippet.file_name,
            snippet.snippet_id,
            snippet.source.lines().count()
        );
    }
    println!("{} snippets", snippets.len());
    Ok(0)
}

/// Loads a replacement preamble, or falls back to the built-in bindings.
fn load_preamble(path: Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(&path).map_err(|e| DocvetError::UnreadableFile {
                path,
                source: e,
            })
        }
        None => Ok(config::DEFAULT_PREAMBLE.to_string()),
    }
}
