//! Import errors and the row-level error report

use miette::Diagnostic;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::identity::EntityKind;
use crate::core::store::StoreError;

/// What went wrong with one cell or row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowProblem {
    /// Required field is empty after trimming
    Required,
    /// Numeric field holds text that is not a number
    NotANumber,
    /// Row has a different number of cells than the header
    FieldCount { expected: usize, found: usize },
}

impl fmt::Display for RowProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowProblem::Required => write!(f, "required field is empty"),
            RowProblem::NotANumber => write!(f, "must be a number"),
            RowProblem::FieldCount { expected, found } => {
                write!(f, "expected {} fields, found {}", expected, found)
            }
        }
    }
}

/// A validation error pinned to a row (header is row 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    /// Offending field; `None` for row-level problems
    pub field: Option<&'static str>,
    pub problem: RowProblem,
}

impl RowError {
    pub fn field(row: usize, field: &'static str, problem: RowProblem) -> Self {
        Self {
            row,
            field: Some(field),
            problem,
        }
    }

    pub fn row(row: usize, problem: RowProblem) -> Self {
        Self {
            row,
            field: None,
            problem,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "row {}: {} {}", self.row, field, self.problem),
            None => write!(f, "row {}: {}", self.row, self.problem),
        }
    }
}

/// Capped listing of row errors, one per line
///
/// ```text
/// - row 3: name required field is empty
/// - row 7: price must be a number
/// - ...and 4 more
/// ```
pub struct ErrorReport<'a> {
    errors: &'a [RowError],
    limit: usize,
}

impl<'a> ErrorReport<'a> {
    pub fn new(errors: &'a [RowError], limit: usize) -> Self {
        Self { errors, limit }
    }
}

impl fmt::Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in self.errors.iter().take(self.limit) {
            writeln!(f, "- {}", error)?;
        }
        if self.errors.len() > self.limit {
            writeln!(f, "- ...and {} more", self.errors.len() - self.limit)?;
        }
        Ok(())
    }
}

/// Why an import was refused; nothing is committed in any of these cases
#[derive(Debug, Error, Diagnostic)]
pub enum ImportError {
    #[error("cannot read {}: {source}", .path.display())]
    #[diagnostic(code(bizdesk::import::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not UTF-8 text", .path.display())]
    #[diagnostic(
        code(bizdesk::import::decode),
        help("save the file as \"CSV UTF-8\" and import it again")
    )]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("malformed CSV: {0}")]
    #[diagnostic(code(bizdesk::import::csv))]
    Csv(#[from] csv::Error),

    #[error("CSV needs a header row and at least one data row, found {rows} row(s)")]
    #[diagnostic(code(bizdesk::import::too_few_rows))]
    TooFewRows { rows: usize },

    #[error("CSV is missing required column(s) for {kind}: {}", .columns.join(", "))]
    #[diagnostic(
        code(bizdesk::import::missing_columns),
        help("run `bizdesk import --template <type>` to see the expected headers")
    )]
    MissingColumns {
        kind: EntityKind,
        columns: Vec<&'static str>,
    },

    #[error("found {} error(s) in {kind} CSV, import aborted", .errors.len())]
    #[diagnostic(
        code(bizdesk::import::rejected),
        help("fix the listed rows and import the whole file again; no records were added")
    )]
    Rejected {
        kind: EntityKind,
        errors: Vec<RowError>,
    },

    #[error(transparent)]
    #[diagnostic(code(bizdesk::store))]
    Store(#[from] StoreError),
}

impl ImportError {
    /// Row errors carried by a rejected import
    pub fn row_errors(&self) -> &[RowError] {
        match self {
            ImportError::Rejected { errors, .. } => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_display() {
        assert_eq!(
            RowError::field(3, "name", RowProblem::Required).to_string(),
            "row 3: name required field is empty"
        );
        assert_eq!(
            RowError::field(3, "price", RowProblem::NotANumber).to_string(),
            "row 3: price must be a number"
        );
        assert_eq!(
            RowError::row(4, RowProblem::FieldCount { expected: 2, found: 3 }).to_string(),
            "row 4: expected 2 fields, found 3"
        );
    }

    #[test]
    fn test_report_caps_entries() {
        let errors: Vec<RowError> = (2..=14)
            .map(|row| RowError::field(row, "name", RowProblem::Required))
            .collect();
        let report = ErrorReport::new(&errors, 10).to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "- row 2: name required field is empty");
        assert_eq!(lines[10], "- ...and 3 more");
    }

    #[test]
    fn test_report_without_overflow() {
        let errors = vec![RowError::field(3, "price", RowProblem::NotANumber)];
        assert_eq!(
            ErrorReport::new(&errors, 10).to_string(),
            "- row 3: price must be a number\n"
        );
    }

    #[test]
    fn test_rejected_message_counts_errors() {
        let err = ImportError::Rejected {
            kind: EntityKind::Customer,
            errors: vec![
                RowError::field(3, "name", RowProblem::Required),
                RowError::field(5, "name", RowProblem::Required),
            ],
        };
        assert_eq!(err.to_string(), "found 2 error(s) in customer CSV, import aborted");
        assert_eq!(err.row_errors().len(), 2);
    }

    #[test]
    fn test_missing_columns_message() {
        let err = ImportError::MissingColumns {
            kind: EntityKind::Product,
            columns: vec!["name", "price"],
        };
        assert_eq!(
            err.to_string(),
            "CSV is missing required column(s) for product: name, price"
        );
    }
}
