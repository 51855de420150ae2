//! SQLite-backed key-value record store
//!
//! One row per entity kind, keyed by the kind's store key ("products",
//! "customers", ...) with the whole collection as a JSON array.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::fs;
use std::path::{Path, PathBuf};

use super::{Repository, StoreError};
use crate::core::identity::EntityKind;
use crate::core::record::Record;

/// Current schema version - the table layout is created if missing
const SCHEMA_VERSION: i32 = 1;

pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open or create a store file, creating parent directories as needed
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Open a throwaway in-memory database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Location of the database file, if file-backed
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- One JSON-encoded collection per entity kind
            CREATE TABLE IF NOT EXISTS collections (
                key TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                updated TEXT NOT NULL
            );
            "#,
        )?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }

    fn read(conn: &Connection, kind: EntityKind) -> Result<Vec<Record>, StoreError> {
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload FROM collections WHERE key = ?1",
                params![kind.store_key()],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(json) => serde_json::from_str(&json).map_err(|source| StoreError::Corrupt {
                key: kind.store_key().to_string(),
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    fn write(conn: &Connection, kind: EntityKind, records: &[Record]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(records).map_err(|source| StoreError::Encode {
            key: kind.store_key().to_string(),
            source,
        })?;
        conn.execute(
            "INSERT INTO collections (key, payload, updated) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET payload = excluded.payload, updated = excluded.updated",
            params![kind.store_key(), payload, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl Repository for SqliteStore {
    fn load(&self, kind: EntityKind) -> Result<Vec<Record>, StoreError> {
        Self::read(&self.conn, kind)
    }

    fn save(&mut self, kind: EntityKind, records: &[Record]) -> Result<(), StoreError> {
        Self::write(&self.conn, kind, records)
    }

    /// Read-modify-write under an IMMEDIATE transaction, so two processes
    /// appending to the same collection queue instead of losing a batch
    fn append(&mut self, kind: EntityKind, batch: Vec<Record>) -> Result<usize, StoreError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut records = Self::read(&tx, kind)?;
        records.extend(batch);
        Self::write(&tx, kind, &records)?;
        tx.commit()?;
        Ok(records.len())
    }
}
