//! Record store: persisted collections keyed by entity kind
//!
//! The import pipeline only talks to the [`Repository`] trait. Two
//! backends exist:
//! - [`MemoryStore`] keeps collections in a map
//! - [`SqliteStore`] keeps each collection as one JSON document in a
//!   local SQLite key-value table, surviving across sessions

mod sqlite;

pub use sqlite::SqliteStore;

use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::identity::EntityKind;
use crate::core::record::Record;

/// Errors raised by record stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("stored '{key}' collection is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode '{key}' collection: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot create store directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Access to the collection of each entity kind
pub trait Repository {
    /// Load the whole collection; a kind never written yields an empty list
    fn load(&self, kind: EntityKind) -> Result<Vec<Record>, StoreError>;

    /// Replace the whole collection
    fn save(&mut self, kind: EntityKind, records: &[Record]) -> Result<(), StoreError>;

    /// Append a batch after the existing records, returning the new total
    fn append(&mut self, kind: EntityKind, batch: Vec<Record>) -> Result<usize, StoreError> {
        let mut records = self.load(kind)?;
        records.extend(batch);
        self.save(kind, &records)?;
        Ok(records.len())
    }

    /// Number of records currently held for a kind
    fn count(&self, kind: EntityKind) -> Result<usize, StoreError> {
        Ok(self.load(kind)?.len())
    }
}

/// In-process store backed by a map
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    collections: HashMap<EntityKind, Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryStore {
    fn load(&self, kind: EntityKind) -> Result<Vec<Record>, StoreError> {
        Ok(self.collections.get(&kind).cloned().unwrap_or_default())
    }

    fn save(&mut self, kind: EntityKind, records: &[Record]) -> Result<(), StoreError> {
        self.collections.insert(kind, records.to_vec());
        Ok(())
    }

    fn append(&mut self, kind: EntityKind, batch: Vec<Record>) -> Result<usize, StoreError> {
        let records = self.collections.entry(kind).or_default();
        records.extend(batch);
        Ok(records.len())
    }

    fn count(&self, kind: EntityKind) -> Result<usize, StoreError> {
        Ok(self.collections.get(&kind).map_or(0, Vec::len))
    }
}
