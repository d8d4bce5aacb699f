//! Mock handlers and receivers for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use herald_core::{Event, EventKind, HandlerError, HandlerResult};
use herald_events::HandlerRef;

/// Shared, ordered log of handler invocations.
///
/// Each entry is `"<handler>:<kind>"`. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A strong handler named `name` that appends to this log.
    ///
    /// Each call returns a distinct handler, even for the same name.
    #[must_use]
    pub fn handler(&self, name: &str) -> HandlerRef {
        let entries = Arc::clone(&self.entries);
        let tag = name.to_owned();
        HandlerRef::observer(name, move |event| {
            if let Ok(mut guard) = entries.lock() {
                guard.push(format!("{tag}:{}", event.kind()));
            }
        })
    }

    /// Append an entry by hand, e.g. from inside another handler.
    pub fn record(&self, entry: impl Into<String>) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(entry.into());
        }
    }

    /// Snapshot of the log.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Number of entries recorded by handler `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        let prefix = format!("{name}:");
        self.entries().iter().filter(|e| e.starts_with(&prefix)).count()
    }

    /// Forget every entry.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.clear();
        }
    }
}

/// A receiver for bound-method handlers that counts invocations.
#[derive(Debug, Default)]
pub struct CountingReceiver {
    hits: AtomicUsize,
    kinds: Mutex<Vec<&'static EventKind>>,
}

impl CountingReceiver {
    /// Create a shared receiver.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Bound method: counts the call and records the event kind.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn on_event(&self, event: &dyn Event) -> HandlerResult {
        self.hits.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.kinds.lock() {
            guard.push(event.kind());
        }
        Ok(())
    }

    /// A weak handler reference to [`on_event`](Self::on_event).
    #[must_use]
    pub fn handler(self: &Arc<Self>) -> HandlerRef {
        HandlerRef::bound("counting-receiver", self, Self::on_event)
    }

    /// Number of invocations so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Kinds seen, in delivery order.
    #[must_use]
    pub fn kinds(&self) -> Vec<&'static EventKind> {
        self.kinds.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

/// A handler that rejects every event with `message`.
#[must_use]
pub fn failing_handler(name: &str, message: &str) -> HandlerRef {
    let message = message.to_owned();
    HandlerRef::new(name, move |_| Err(HandlerError::rejected(message.clone())))
}

/// A handler that panics with `message` on every event.
#[must_use]
pub fn panicking_handler(name: &str, message: &str) -> HandlerRef {
    let message = message.to_owned();
    HandlerRef::observer(name, move |_| panic!("{message}"))
}
