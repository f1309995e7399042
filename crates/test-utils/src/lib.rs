//! Shared helpers for the `makedag` integration tests.
//!
//! - [`builders`]: fluent construction of task files without TOML.
//! - [`fake_action`]: actions that write into a mock file system and record
//!   that they ran.

pub mod builders;
pub mod fake_action;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests, once per test binary.
///
/// Logs go through the test writer, so they only show up for failing tests
/// (or with `-- --nocapture`). The filter is read from `MAKEDAG_LOG`, e.g.
/// `MAKEDAG_LOG=makedag=debug cargo test`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("MAKEDAG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}
