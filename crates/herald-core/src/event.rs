//! Event instances.

use std::any::Any;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::kind::EventKind;

/// Label used when an event does not provide its own.
pub const GENERIC_LABEL: &str = "Generic Event";

/// An instance of some [`EventKind`].
///
/// Events are immutable once constructed. The dispatcher owns a sent event
/// until every handler for it has run, then drops it.
///
/// The explicit `'static` bound makes a bare `&dyn Event` mean
/// `&(dyn Event + 'static)`, so [`downcast_ref`](#method.downcast_ref) is
/// available on every handler argument.
pub trait Event: Any + Send + Sync + fmt::Debug + 'static {
    /// Exact runtime kind of this event.
    fn kind(&self) -> &'static EventKind;

    /// Human-readable label.
    fn label(&self) -> &str {
        GENERIC_LABEL
    }

    /// Creation metadata, if the event carries any.
    fn metadata(&self) -> Option<&EventMetadata> {
        None
    }
}

impl dyn Event {
    /// Whether the concrete event type is `T`.
    #[must_use]
    pub fn is<T: Event>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Recover the concrete event type.
    #[must_use]
    pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

/// A Rust event type bound to a single static kind.
///
/// Lets callers subscribe by type (`subscribe_to::<TickEvent>`) instead of
/// naming the kind static.
pub trait KindedEvent: Event + Sized {
    /// The kind every value of this type reports from [`Event::kind`].
    fn event_kind() -> &'static EventKind;
}

/// Metadata attached to an event at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// When the event was created.
    pub timestamp: DateTime<Utc>,
    /// Component that produced the event.
    pub source: Option<String>,
}

impl EventMetadata {
    /// Create metadata stamped with a fresh id and the current time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: None,
        }
    }

    /// Set the producing component.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Payload-free event of any kind.
///
/// This is what [`EventKind`]-level factories build when the caller has no
/// dedicated event type.
#[derive(Debug, Clone)]
pub struct BasicEvent {
    kind: &'static EventKind,
    label: String,
    metadata: EventMetadata,
}

impl BasicEvent {
    /// Create an event of `kind` labelled with the generic label.
    #[must_use]
    pub fn new(kind: &'static EventKind) -> Self {
        Self {
            kind,
            label: GENERIC_LABEL.to_owned(),
            metadata: EventMetadata::new(),
        }
    }

    /// Replace the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Record the producing component.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.metadata = self.metadata.with_source(source);
        self
    }
}

impl Event for BasicEvent {
    fn kind(&self) -> &'static EventKind {
        self.kind
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn metadata(&self) -> Option<&EventMetadata> {
        Some(&self.metadata)
    }
}

impl fmt::Display for dyn Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} \"{}\">", self.kind(), self.label())
    }
}
