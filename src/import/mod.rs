//! CSV import pipeline
//!
//! `text → tokenize → header check → validate all rows → build → append`.
//! An import is all-or-nothing: any structural problem or any row error
//! anywhere in the file aborts before the store is touched.

mod builder;
mod error;
mod tokenizer;
mod validator;

pub use builder::build_records;
pub use error::{ErrorReport, ImportError, RowError, RowProblem};
pub use tokenizer::{tokenize, Row};
pub use validator::{parse_number, validate_rows, HeaderMap, FIRST_DATA_ROW};

use std::fmt;
use std::fs;
use std::path::Path;

use crate::core::identity::EntityKind;
use crate::core::record::Record;
use crate::core::store::Repository;

/// Import options
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Run the whole pipeline but leave the store untouched
    pub dry_run: bool,
}

/// Outcome of a successful import
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub kind: EntityKind,
    /// Records appended (or that would be, on a dry run)
    pub added: usize,
    /// Collection size after the import
    pub total: usize,
    pub dry_run: bool,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            write!(f, "{} {} record(s) would be added", self.added, self.kind)
        } else {
            write!(f, "added {} {} record(s)", self.added, self.kind)
        }
    }
}

/// Parse and validate CSV text into records without touching any store
pub fn parse_records(kind: EntityKind, text: &str) -> Result<Vec<Record>, ImportError> {
    let schema = kind.schema();

    let mut rows = tokenize(text)?;
    if rows.len() < 2 {
        return Err(ImportError::TooFewRows { rows: rows.len() });
    }
    let data = rows.split_off(1);
    let header = HeaderMap::build(schema, &rows[0]);
    tracing::debug!(%kind, rows = data.len(), columns = header.width(), "tokenized csv");

    let missing = header.missing_required(schema);
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns {
            kind,
            columns: missing,
        });
    }

    let errors = validate_rows(schema, &header, &data);
    if !errors.is_empty() {
        tracing::warn!(%kind, errors = errors.len(), "csv rejected");
        return Err(ImportError::Rejected { kind, errors });
    }

    Ok(build_records(schema, &header, &data))
}

/// Import CSV text into the collection for `kind`
#[tracing::instrument(level = "debug", skip(repo, text), fields(bytes = text.len()))]
pub fn import_text<R>(
    repo: &mut R,
    kind: EntityKind,
    text: &str,
    options: ImportOptions,
) -> Result<ImportSummary, ImportError>
where
    R: Repository + ?Sized,
{
    let records = parse_records(kind, text)?;
    let added = records.len();

    let total = if options.dry_run {
        repo.count(kind)? + added
    } else {
        repo.append(kind, records)?
    };

    if !options.dry_run {
        tracing::info!(%kind, added, total, "import committed");
    }

    Ok(ImportSummary {
        kind,
        added,
        total,
        dry_run: options.dry_run,
    })
}

/// Read a CSV file and import it into the collection for `kind`
pub fn import_file<R>(
    repo: &mut R,
    kind: EntityKind,
    path: &Path,
    options: ImportOptions,
) -> Result<ImportSummary, ImportError>
where
    R: Repository + ?Sized,
{
    let bytes = fs::read(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| ImportError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    import_text(repo, kind, &text, options)
}
