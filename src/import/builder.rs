//! Turn validated rows into records

use chrono::Utc;

use super::tokenizer::Row;
use super::validator::{parse_number, HeaderMap};
use crate::core::record::{FieldValue, Record};
use crate::schema::{EntitySchema, FieldKind};

/// Build one record per row, in row order
///
/// Every schema field is set on every record. A field whose column is
/// absent, or whose cell is empty, gets its default: `""` for text and
/// `Empty` for numbers. Rows must already have passed validation.
pub fn build_records(schema: &EntitySchema, header: &HeaderMap, rows: &[Row]) -> Vec<Record> {
    let created = Utc::now();
    rows.iter()
        .map(|row| {
            let mut record = Record::new(schema.kind);
            record.created = created;
            for field in schema.fields {
                let value = header.cell(row, field);
                record.set(field.name, field_value(field.kind, value));
            }
            record
        })
        .collect()
}

fn field_value(kind: FieldKind, value: &str) -> FieldValue {
    match kind {
        FieldKind::Text => FieldValue::Text(value.to_string()),
        FieldKind::Number if value.is_empty() => FieldValue::Empty,
        // Validation already rejected unparseable numbers; keep the raw text
        // rather than lose it if a caller skipped validation
        FieldKind::Number => parse_number(value)
            .map_or_else(|| FieldValue::Text(value.to_string()), FieldValue::Number),
    }
}
