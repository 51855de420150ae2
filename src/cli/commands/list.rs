//! `bizdesk list` command - Show stored records as a table

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::args::parse_entity_type;
use crate::cli::helpers::{format_short_id, load_config, open_store, single_line, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::{EntityKind, Record, Repository};
use crate::schema::EntitySchema;

/// Most columns shown besides the ID
const MAX_COLUMNS: usize = 6;
const MAX_CELL_CHARS: usize = 24;

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Entity type to list
    #[arg(value_parser = parse_entity_type)]
    pub entity_type: EntityKind,

    /// Show at most N records
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let store = open_store(&config)?;
    let records = store.load(args.entity_type).into_diagnostic()?;

    if records.is_empty() {
        println!("No {} records found.", args.entity_type);
        return Ok(());
    }

    let shown = args.limit.unwrap_or(records.len()).min(records.len());
    let schema = args.entity_type.schema();
    println!("{}", render_table(schema, &records[..shown]));

    if !global.quiet {
        println!();
        if shown < records.len() {
            println!(
                "{} of {} {} record(s) shown",
                style(shown).cyan(),
                records.len(),
                args.entity_type
            );
        } else {
            println!("{} {} record(s) found", style(records.len()).cyan(), args.entity_type);
        }
    }
    Ok(())
}

/// Required fields first, then the rest in schema order
fn table_columns(schema: &EntitySchema) -> Vec<&'static str> {
    schema
        .required_fields()
        .chain(schema.fields.iter().filter(|f| !f.required))
        .map(|f| f.name)
        .take(MAX_COLUMNS)
        .collect()
}

fn render_table(schema: &EntitySchema, records: &[Record]) -> String {
    let columns = table_columns(schema);

    let mut builder = Builder::default();
    let mut header = vec!["ID".to_string()];
    header.extend(columns.iter().map(|c| c.to_uppercase()));
    builder.push_record(header);

    for record in records {
        let mut row = vec![format_short_id(&record.id.to_string())];
        row.extend(
            columns
                .iter()
                .map(|c| truncate_str(&single_line(&record.get_display(c)), MAX_CELL_CHARS)),
        );
        builder.push_record(row);
    }

    builder.build().with(Style::markdown()).to_string()
}
