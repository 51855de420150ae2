//! CLI command implementations

pub mod completions;
pub mod export;
pub mod import;
pub mod list;
pub mod schema;
