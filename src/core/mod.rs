//! Core module - fundamental types and utilities

pub mod config;
pub mod identity;
pub mod record;
pub mod store;

pub use config::Config;
pub use identity::{EntityKind, IdParseError, RecordId};
pub use record::{FieldValue, Record};
pub use store::{MemoryStore, Repository, SqliteStore, StoreError};
