//! Header resolution and row validation against an entity schema

use std::collections::HashMap;

use super::error::{RowError, RowProblem};
use super::tokenizer::Row;
use crate::schema::{EntitySchema, FieldSpec};

/// Row number of the first data row; the header is row 1
pub const FIRST_DATA_ROW: usize = 2;

/// Maps schema fields to their column position in the header row
#[derive(Debug, Clone)]
pub struct HeaderMap {
    columns: HashMap<&'static str, usize>,
    width: usize,
}

impl HeaderMap {
    /// Resolve header cells against the schema (trimmed, case-insensitive,
    /// aliases accepted). A field named twice maps to its last column.
    pub fn build(schema: &EntitySchema, header: &[String]) -> Self {
        let mut columns = HashMap::new();
        for (idx, cell) in header.iter().enumerate() {
            for field in schema.fields.iter().filter(|f| f.matches_header(cell)) {
                columns.insert(field.name, idx);
            }
        }
        Self {
            columns,
            width: header.len(),
        }
    }

    /// Column index of a field, if its header is present
    pub fn index(&self, field: &str) -> Option<usize> {
        self.columns.get(field).copied()
    }

    /// Number of cells in the header row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Trimmed cell for a field; absent columns read as empty
    pub fn cell<'r>(&self, row: &'r [String], field: &FieldSpec) -> &'r str {
        self.index(field.name)
            .and_then(|idx| row.get(idx))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    /// Required fields with no matching header, in schema order
    pub fn missing_required(&self, schema: &EntitySchema) -> Vec<&'static str> {
        schema
            .required_fields()
            .filter(|f| !self.columns.contains_key(f.name))
            .map(|f| f.name)
            .collect()
    }
}

/// Parse a trimmed cell as a finite number
///
/// Validation and record building share this function, so a value that
/// passed validation always parses when the record is built.
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Check every data row and collect all errors
///
/// Never stops early. A row whose cell count differs from the header gets a
/// single row-level error and its cells are not inspected further.
pub fn validate_rows(schema: &EntitySchema, header: &HeaderMap, rows: &[Row]) -> Vec<RowError> {
    let mut errors = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let row_num = idx + FIRST_DATA_ROW;

        if row.len() != header.width() {
            errors.push(RowError::row(
                row_num,
                RowProblem::FieldCount {
                    expected: header.width(),
                    found: row.len(),
                },
            ));
            continue;
        }

        for field in schema.fields {
            let value = header.cell(row, field);
            if field.required && value.is_empty() {
                errors.push(RowError::field(row_num, field.name, RowProblem::Required));
            }
            if field.is_numeric() && !value.is_empty() && parse_number(value).is_none() {
                errors.push(RowError::field(row_num, field.name, RowProblem::NotANumber));
            }
        }
    }

    errors
}
