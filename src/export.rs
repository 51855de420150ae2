//! Export collections back out as CSV, TSV, or JSON
//!
//! CSV output is the inverse of the import tokenizer: a field is wrapped in
//! double quotes only when it contains the delimiter, a quote, or a line
//! break, and embedded quotes are doubled. Headers are the canonical schema
//! field names, so an export imports back cleanly.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;
use thiserror::Error;

use crate::core::record::Record;
use crate::schema::EntitySchema;

const BOM: &str = "\u{feff}";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Options for delimited (CSV/TSV) output
#[derive(Debug, Clone, Copy)]
pub struct DelimitedOptions {
    pub delimiter: u8,
    /// Start the output with a UTF-8 byte-order mark
    pub bom: bool,
    /// Prepend an `id` column
    pub with_id: bool,
}

impl DelimitedOptions {
    pub fn csv() -> Self {
        Self {
            delimiter: b',',
            bom: false,
            with_id: false,
        }
    }

    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::csv()
        }
    }

    pub fn with_bom(mut self, bom: bool) -> Self {
        self.bom = bom;
        self
    }

    pub fn with_id(mut self, with_id: bool) -> Self {
        self.with_id = with_id;
        self
    }
}

fn writer<W: Write>(out: W, delimiter: u8) -> csv::Writer<W> {
    WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out)
}

/// Write records as delimited text, one row per record in collection order
pub fn write_delimited<W: Write>(
    mut out: W,
    schema: &EntitySchema,
    records: &[Record],
    options: DelimitedOptions,
) -> Result<(), ExportError> {
    if options.bom {
        out.write_all(BOM.as_bytes())?;
    }

    let mut wtr = writer(out, options.delimiter);

    let mut header: Vec<&str> = Vec::with_capacity(schema.fields.len() + 1);
    if options.with_id {
        header.push("id");
    }
    header.extend(schema.headers());
    wtr.write_record(&header)?;

    for record in records {
        let mut row: Vec<String> = Vec::with_capacity(header.len());
        if options.with_id {
            row.push(record.id.to_string());
        }
        row.extend(schema.fields.iter().map(|f| record.get_display(f.name)));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render records as a delimited string
pub fn to_delimited_string(
    schema: &EntitySchema,
    records: &[Record],
    options: DelimitedOptions,
) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_delimited(&mut buf, schema, records, options)?;
    Ok(String::from_utf8(buf)?)
}

/// Write records as a pretty-printed JSON array
pub fn write_json<W: Write>(mut out: W, records: &[Record]) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut out, records)?;
    writeln!(out)?;
    Ok(())
}

/// Write an import template: header row plus one example row
pub fn write_template<W: Write>(out: W, schema: &EntitySchema) -> Result<(), ExportError> {
    let mut wtr = writer(out, b',');
    wtr.write_record(schema.headers())?;
    if !schema.example.is_empty() {
        wtr.write_record(schema.example)?;
    }
    wtr.flush()?;
    Ok(())
}
