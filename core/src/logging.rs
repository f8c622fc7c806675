//! Logger setup for test runs.

use log::{LevelFilter, SetLoggerError};

/// Initialize `env_logger` from `RUST_LOG`, overriding the level with
/// `level`. ureq and its HTTP stack are capped at `info`.
///
/// # Errors
///
/// Returns `SetLoggerError` when a logger is already installed, which is
/// the case for every call after the first in a process. Tests that each
/// call this can ignore the error.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("ureq", LevelFilter::Info);
    builder.filter_module("ureq_proto", LevelFilter::Info);
    builder.filter_module("rustls", LevelFilter::Warn);
    builder.is_test(true);
    builder.try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_installed_logger() {
        // Another test may have installed the logger first.
        let _ = init_logger(LevelFilter::Debug);
        assert!(init_logger(LevelFilter::Info).is_err());
        log::info!("logger already installed");
    }
}
