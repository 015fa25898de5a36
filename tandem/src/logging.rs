//! Logging setup.
//!
//! The library itself only emits `tracing` events. [`init`] installs a subscriber filtered by the
//! verbosity requested on the command line; `RUST_LOG` still takes precedence when it is set.

use crate::level::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// The `EnvFilter` directive for `level`
pub fn directive(level: Level) -> String {
    let filter = LevelFilter::from(level);
    format!("tandem={}", filter.to_string().to_lowercase())
}

/// Install a global subscriber at `level`. Returns false if a subscriber was already installed,
/// e.g. by a test harness or a second run in the same process.
pub fn init(level: Level) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .is_ok()
}
