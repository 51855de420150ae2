//! Bizdesk: business records toolkit
//!
//! Keeps leads, contracts, agents, products and customers in a local store.
//! Records come in through an all-or-nothing CSV import that validates every
//! row against the entity schema before anything is committed, and go back
//! out as CSV, TSV or JSON.

pub mod cli;
pub mod core;
pub mod export;
pub mod import;
pub mod schema;
