//! Test fixtures: a small kind hierarchy and event constructors.
//!
//! ```text
//! Base
//! ├── Tick
//! │   └── Tock
//! └── Side
//! ```

use herald_core::{BasicEvent, Event, EventKind, KindedEvent, declare_kind};

declare_kind! {
    /// Root of the test hierarchy.
    pub static BASE = "Base";
    /// Child of [`BASE`].
    pub static TICK = "Tick" : BASE;
    /// Child of [`TICK`].
    pub static TOCK = "Tock" : TICK;
    /// Second child of [`BASE`], unrelated to [`TICK`].
    pub static SIDE = "Side" : BASE;
}

/// A payload-free event of `kind` with `label`.
#[must_use]
pub fn labelled(kind: &'static EventKind, label: &str) -> BasicEvent {
    BasicEvent::new(kind).with_label(label).with_source("herald-test")
}

/// A [`TOCK`] event carrying a sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numbered {
    /// Sequence number.
    pub seq: u64,
}

impl Numbered {
    /// Create event number `seq`.
    #[must_use]
    pub fn new(seq: u64) -> Self {
        Self { seq }
    }
}

impl Event for Numbered {
    fn kind(&self) -> &'static EventKind {
        &TOCK
    }

    fn label(&self) -> &str {
        "Numbered"
    }
}

impl KindedEvent for Numbered {
    fn event_kind() -> &'static EventKind {
        &TOCK
    }
}
