//! Test harness helpers.

use tracing_subscriber::EnvFilter;

/// Install a test-writer tracing subscriber with the given filter.
///
/// Only the first call in a test binary takes effect.
///
/// # Example
///
/// ```rust
/// use herald_test::setup_test_logging;
///
/// setup_test_logging("herald_events=trace");
/// ```
pub fn setup_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// Set up test logging with default filter (warn level).
pub fn setup_test_logging_default() {
    setup_test_logging("warn");
}
