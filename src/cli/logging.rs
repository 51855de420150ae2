//! Logging setup using `tracing` and `tracing-subscriber`
//!
//! Diagnostics go to stderr so they never mix with exported data on stdout.
//!
//! - no flag: warnings only
//! - `-v`: info (commits, store location)
//! - `-vv`: debug (pipeline phases)
//! - `-vvv`: trace
//!
//! `RUST_LOG` overrides the flag-derived level.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map `-v` count and `--quiet` to a level
pub fn level_for(verbosity: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Our crate at the requested level, dependencies stay at warn
        let level = level.as_str().to_lowercase();
        EnvFilter::new(format!("warn,bizdesk={level}"))
    })
}

/// Install the global subscriber; later calls are no-ops
pub fn init_logging(verbosity: u8, quiet: bool) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(level_for(verbosity, quiet)))
        .with(layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0, false), Level::WARN);
        assert_eq!(level_for(1, false), Level::INFO);
        assert_eq!(level_for(2, false), Level::DEBUG);
        assert_eq!(level_for(7, false), Level::TRACE);
        assert_eq!(level_for(3, true), Level::ERROR);
    }
}
