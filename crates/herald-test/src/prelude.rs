//! Prelude module - commonly used test helpers.
//!
//! Use `use herald_test::prelude::*;` in test modules.

// Fixtures
pub use crate::{BASE, Numbered, SIDE, TICK, TOCK, labelled};

// Mocks
pub use crate::{CountingReceiver, Recorder, failing_handler, panicking_handler};

// Harness
pub use crate::{setup_test_logging, setup_test_logging_default};
