//! Schema system - per-entity field declarations used by import and export

pub mod registry;

pub use registry::{EntitySchema, FieldKind, FieldSpec, SchemaRegistry};
