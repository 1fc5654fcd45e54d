//! Logging utility functions
//!
//! This module provides helpers for initializing the logging system.

use once_cell::sync::OnceCell;

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize the logging system
///
/// Reads the `RUST_LOG` environment variable, falling back to the given
/// level. Safe to call more than once; only the first call takes effect.
///
/// # Parameters
///
/// * `level` - Default log level
pub fn init_logger(level: &str) {
    LOGGER_INIT.get_or_init(|| {
        let env = env_logger::Env::default()
            .filter_or("RUST_LOG", level);

        env_logger::Builder::from_env(env)
            .try_init()
            .ok();
    });
}
