//! Schema introspection
//!
//! Shows which columns each import expects, so a CSV can be prepared
//! without opening the source.

use clap::Subcommand;
use miette::Result;

use crate::cli::args::parse_entity_type;
use crate::core::EntityKind;
use crate::schema::SchemaRegistry;

#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    /// List all entity schemas
    List,

    /// Show the fields of one entity schema
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Entity type (lead, contract, agent, product, customer)
    #[arg(value_parser = parse_entity_type)]
    pub entity: EntityKind,
}

pub fn run(cmd: SchemaCommands) -> Result<()> {
    match cmd {
        SchemaCommands::List => list_schemas(),
        SchemaCommands::Show(args) => show_schema(args.entity),
    }
}

fn list_schemas() -> Result<()> {
    println!("Available entity schemas:\n");
    println!("{:<10} {:<12} {:<8} {}", "TYPE", "TITLE", "FIELDS", "REQUIRED");
    println!("{}", "-".repeat(60));

    for schema in SchemaRegistry::all() {
        let required: Vec<&str> = schema.required_fields().map(|f| f.name).collect();
        println!(
            "{:<10} {:<12} {:<8} {}",
            schema.kind.as_str(),
            schema.title,
            schema.fields.len(),
            required.join(", ")
        );
    }

    println!("\nUse 'bizdesk schema show <type>' for field details");
    Ok(())
}

fn show_schema(kind: EntityKind) -> Result<()> {
    let schema = kind.schema();

    println!("{}", schema.title);
    println!("{}", "=".repeat(schema.title.len()));
    println!("{}\n", schema.description);

    println!("Fields:");
    println!("{:<20} {:<8} {:<5} {}", "NAME", "TYPE", "REQ", "ALIASES");
    println!("{}", "-".repeat(60));

    for field in schema.fields {
        println!(
            "{:<20} {:<8} {:<5} {}",
            field.name,
            field.kind.as_str(),
            if field.required { "yes" } else { "" },
            field.aliases.join(", ")
        );
    }

    println!(
        "\nHeaders match case-insensitively. Use 'bizdesk import --template {}' for a sample file",
        kind
    );
    Ok(())
}
