//! Logging configuration using env_logger.
//!
//! Diagnostics (unreadable subtrees, run summaries) go to stderr so stdout
//! stays reserved for result lines.

use anyhow::Result;
use env_logger::Env;
use log::info;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize env_logger-based logging with stderr output.
///
/// The filter defaults to `info` and can be overridden through `RUST_LOG`.
/// Safe to call more than once; only the first call installs the logger.
///
/// # Returns
///
/// A Result indicating success or failure of the initialization
pub fn init() -> Result<()> {
    INIT.call_once(|| {
        env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .format_timestamp(None)
            .format_target(true)
            .format_module_path(false)
            .init();
        info!("logging initialized with stderr output");
    });

    Ok(())
}
