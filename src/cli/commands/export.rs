//! `bizdesk export` command - Write a collection as CSV, TSV or JSON

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::cli::args::parse_entity_type;
use crate::cli::helpers::{load_config, open_store};
use crate::cli::GlobalOpts;
use crate::core::{EntityKind, Record, Repository};
use crate::export::{write_delimited, write_json, DelimitedOptions};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Entity type to export
    #[arg(value_parser = parse_entity_type)]
    pub entity_type: EntityKind,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Write to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Include the record ID as the first column
    #[arg(long)]
    pub with_id: bool,

    /// Omit the UTF-8 byte-order mark from CSV output (TSV never has one)
    #[arg(long)]
    pub no_bom: bool,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let store = open_store(&config)?;
    let records = store.load(args.entity_type).into_diagnostic()?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            write_records(&mut writer, &args, &records, config.export_bom())?;
            writer.flush().into_diagnostic()?;
            if !global.quiet {
                eprintln!(
                    "{} Exported {} {} record(s) to {}",
                    style("✓").green(),
                    style(records.len()).cyan(),
                    args.entity_type,
                    style(path.display()).yellow()
                );
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_records(&mut writer, &args, &records, config.export_bom())?;
            writer.flush().into_diagnostic()?;
        }
    }

    tracing::info!(kind = %args.entity_type, count = records.len(), "export complete");
    Ok(())
}

fn write_records<W: Write>(
    out: W,
    args: &ExportArgs,
    records: &[Record],
    config_bom: bool,
) -> Result<()> {
    let schema = args.entity_type.schema();
    let bom = config_bom && !args.no_bom;

    match args.format {
        ExportFormat::Csv => {
            let opts = DelimitedOptions::csv().with_bom(bom).with_id(args.with_id);
            write_delimited(out, schema, records, opts).into_diagnostic()
        }
        ExportFormat::Tsv => {
            let opts = DelimitedOptions::tsv().with_id(args.with_id);
            write_delimited(out, schema, records, opts).into_diagnostic()
        }
        ExportFormat::Json => write_json(out, records).into_diagnostic(),
    }
}
