//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::{Config, SqliteStore};

/// Load config, letting `--store` override the configured store path
pub fn load_config(global: &GlobalOpts) -> Config {
    let mut config = Config::load();
    if let Some(ref store) = global.store {
        config.store = Some(store.clone());
    }
    config
}

/// Open the record store named by the config
pub fn open_store(config: &Config) -> Result<SqliteStore> {
    let path = config.store_path();
    tracing::debug!(path = %path.display(), "opening record store");
    SqliteStore::open(&path).into_diagnostic()
}

/// Truncate a string to `max_chars` characters, adding "..." if truncated
///
/// Counts chars rather than bytes so CJK text never splits mid-character.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Collapse line breaks so multi-line values fit on one table row
pub fn single_line(s: &str) -> String {
    s.split(|c| c == '\r' || c == '\n')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a record ID for display, keeping the prefix and the ULID head
pub fn format_short_id(id: &str) -> String {
    truncate_str(id, 16)
}
