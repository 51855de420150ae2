//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, export::ExportArgs, import::ImportArgs, list::ListArgs,
    schema::SchemaCommands,
};

#[derive(Parser)]
#[command(name = "bizdesk")]
#[command(author, version, about = "Bizdesk business records toolkit")]
#[command(long_about = "Keep leads, contracts, agents, products and customers in a local \
store, with all-or-nothing CSV import and CSV/TSV/JSON export.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Record store database (default: config `store`, then the platform data dir)
    #[arg(long, global = true, env = "BIZDESK_STORE")]
    pub store: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import records from a CSV file (all rows or none)
    Import(ImportArgs),

    /// Export a collection as CSV, TSV or JSON
    Export(ExportArgs),

    /// List stored records as a table
    List(ListArgs),

    /// Show import schemas (fields, required columns, numeric columns)
    #[command(subcommand)]
    Schema(SchemaCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Parse an entity type argument
pub fn parse_entity_type(s: &str) -> Result<crate::core::EntityKind, String> {
    s.parse().map_err(|e: crate::core::IdParseError| e.to_string())
}
