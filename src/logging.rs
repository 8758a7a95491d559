//! Process-wide logger set-up for the command-line harness.
//!
//! The library only talks to the `log` facade. The binary installs an
//! `env_logger` backend whose filter comes from settings unless `RUST_LOG`
//! is set.

use env_logger::{Builder, Env};

/// Filter used when neither settings nor the environment name one.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the logger. Calling it again is a no-op.
pub fn initialize(filter: Option<&str>) {
    let filter = filter
        .map(str::trim)
        .filter(|filter| !filter.is_empty())
        .unwrap_or(DEFAULT_FILTER);

    let _ = Builder::from_env(Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .try_init();
}
