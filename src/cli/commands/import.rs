//! `bizdesk import` command - Import records from CSV files

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io;
use std::path::PathBuf;

use crate::cli::args::parse_entity_type;
use crate::cli::helpers::{load_config, open_store};
use crate::cli::GlobalOpts;
use crate::core::EntityKind;
use crate::export::write_template;
use crate::import::{import_file, ErrorReport, ImportError, ImportOptions};

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Entity type to import (lead, contract, agent, product, customer)
    #[arg(value_parser = parse_entity_type)]
    pub entity_type: Option<EntityKind>,

    /// CSV file to import
    pub file: Option<PathBuf>,

    /// Print a CSV template (header plus example row) for the entity type
    #[arg(long)]
    pub template: bool,

    /// Validate the CSV without adding any records
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if args.template {
        let kind = args.entity_type.ok_or_else(|| {
            miette::miette!(
                "Entity type required for template generation. \
                 Usage: bizdesk import --template product"
            )
        })?;
        return generate_template(kind);
    }

    let kind = args.entity_type.ok_or_else(|| {
        miette::miette!("Entity type required. Usage: bizdesk import product data.csv")
    })?;

    let file_path = args.file.clone().ok_or_else(|| {
        miette::miette!("CSV file required. Usage: bizdesk import product data.csv")
    })?;

    let config = load_config(global);
    let mut store = open_store(&config)?;

    if !global.quiet {
        println!(
            "{} Importing {} records from {}{}",
            style("→").blue(),
            style(kind).cyan(),
            style(file_path.display()).yellow(),
            if args.dry_run {
                style(" (dry run)").dim().to_string()
            } else {
                String::new()
            }
        );
    }

    let options = ImportOptions {
        dry_run: args.dry_run,
    };

    match import_file(&mut store, kind, &file_path, options) {
        Ok(summary) => {
            if !global.quiet {
                println!(
                    "{} {} ({} {} record(s) in store)",
                    style("✓").green(),
                    capitalize(&summary.to_string()),
                    style(summary.total).cyan(),
                    kind
                );
                if summary.dry_run {
                    println!(
                        "{}",
                        style("Dry run complete. No records were added.").yellow()
                    );
                }
            }
            Ok(())
        }
        Err(err @ ImportError::Rejected { .. }) => {
            eprintln!("{} Validation failed:", style("✗").red());
            eprint!("{}", ErrorReport::new(err.row_errors(), config.error_limit()));
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

/// Write the CSV template to stdout (can be redirected to a file)
fn generate_template(kind: EntityKind) -> Result<()> {
    write_template(io::stdout().lock(), kind.schema()).into_diagnostic()?;

    // Usage hint on stderr so it doesn't interfere with redirected output
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: bizdesk import --template {} > {}.csv",
        style("→").blue(),
        kind,
        kind.store_key()
    );
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
