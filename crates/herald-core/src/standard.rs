//! Standard event kinds shared by applications built on Herald.
//!
//! ```text
//! Generic Event
//! ├── Trigger
//! │   └── Tick
//! └── Quit
//! ```

use crate::declare_kind;
use crate::event::{Event, EventMetadata, KindedEvent};
use crate::kind::EventKind;

declare_kind! {
    /// Root of the standard family.
    pub static EVENT = "Generic Event";
    /// Events that drive work forward, such as loop ticks.
    pub static TRIGGER = "Trigger" : EVENT;
    /// One iteration of an application-level loop.
    pub static TICK = "Tick" : TRIGGER;
    /// Request to leave an application-level loop.
    pub static QUIT = "Quit" : EVENT;
}

/// Every standard kind, root first.
#[must_use]
pub fn standard_kinds() -> [&'static EventKind; 4] {
    [&EVENT, &TRIGGER, &TICK, &QUIT]
}

/// Raised once per iteration of an application event loop.
#[derive(Debug, Clone)]
pub struct TickEvent {
    /// Zero-based iteration number.
    pub seq: u64,
    metadata: EventMetadata,
}

impl TickEvent {
    /// Create the tick for iteration `seq`.
    #[must_use]
    pub fn new(seq: u64) -> Self {
        Self {
            seq,
            metadata: EventMetadata::new(),
        }
    }
}

impl Event for TickEvent {
    fn kind(&self) -> &'static EventKind {
        &TICK
    }

    fn label(&self) -> &str {
        "Tick Event"
    }

    fn metadata(&self) -> Option<&EventMetadata> {
        Some(&self.metadata)
    }
}

impl KindedEvent for TickEvent {
    fn event_kind() -> &'static EventKind {
        &TICK
    }
}

/// Raised to stop an application event loop.
#[derive(Debug, Clone, Default)]
pub struct QuitEvent {
    /// Why the loop should stop.
    pub reason: Option<String>,
    metadata: EventMetadata,
}

impl QuitEvent {
    /// Create a quit request without a reason.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl Event for QuitEvent {
    fn kind(&self) -> &'static EventKind {
        &QUIT
    }

    fn label(&self) -> &str {
        "Quit Event"
    }

    fn metadata(&self) -> Option<&EventMetadata> {
        Some(&self.metadata)
    }
}

impl KindedEvent for QuitEvent {
    fn event_kind() -> &'static EventKind {
        &QUIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_family_shares_one_root() {
        for kind in standard_kinds() {
            assert_eq!(kind.root_kind(), &EVENT);
        }
    }

    #[test]
    fn test_tick_lineage() {
        let names: Vec<_> = TICK.lineage().iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["Tick", "Trigger", "Generic Event"]);
    }

    #[test]
    fn test_quit_is_not_a_trigger() {
        assert!(!QUIT.descends_from(&TRIGGER));
        assert!(QUIT.descends_from(&EVENT));
    }

    #[test]
    fn test_standard_labels() {
        assert_eq!(TickEvent::new(0).label(), "Tick Event");
        assert_eq!(QuitEvent::new().label(), "Quit Event");
    }

    #[test]
    fn test_quit_reason() {
        let quit = QuitEvent::new().with_reason("eof");
        assert_eq!(quit.reason.as_deref(), Some("eof"));
        assert_eq!(quit.kind(), QuitEvent::event_kind());
    }
}
