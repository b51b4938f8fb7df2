//! Logger setup for the CLI.
//!
//! Log records always go to standard error so they never mix with a
//! document written to standard output.

use std::str::FromStr;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Parse a `--log-level` value.
///
/// Returns `None` for anything `log` does not recognise.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(level.trim()).ok()
}

/// Install the global logger at the requested level.
///
/// An unrecognised level falls back to `warn` with a notice on stderr.
/// `RUST_LOG` style filters from the environment are still honoured for
/// module-level overrides.
pub fn init(level: &str) -> LevelFilter {
    let filter = parse_level(level).unwrap_or_else(|| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    Builder::from_env(Env::default())
        .filter_level(filter)
        .target(Target::Stderr)
        .init();

    filter
}
