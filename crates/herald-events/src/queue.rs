//! Pending action queues.
//!
//! Any thread may push at any time. Only the drain owner pops.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use herald_core::{Event, EventKind};

use crate::handler::HandlerRef;

/// A queued request against the manager.
///
/// Queues are the only path by which the registry is mutated or a
/// notification is delivered.
pub enum PendingAction {
    /// Add a handler to a kind and its ancestors.
    Subscribe {
        /// Kind named by the caller.
        kind: &'static EventKind,
        /// Handler to add.
        handler: HandlerRef,
    },
    /// Remove a handler from a kind and its ancestors.
    Unsubscribe {
        /// Kind named by the caller.
        kind: &'static EventKind,
        /// Handler to remove.
        handler: HandlerRef,
    },
    /// Deliver an event to the handlers of its exact kind.
    Notify {
        /// Exact runtime kind of `event`.
        kind: &'static EventKind,
        /// The event, owned until dispatched.
        event: Box<dyn Event>,
    },
}

impl PendingAction {
    /// Kind the action targets.
    #[must_use]
    pub fn kind(&self) -> &'static EventKind {
        match self {
            Self::Subscribe { kind, .. }
            | Self::Unsubscribe { kind, .. }
            | Self::Notify { kind, .. } => *kind,
        }
    }
}

impl fmt::Debug for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subscribe { kind, handler } => f
                .debug_struct("Subscribe")
                .field("kind", &kind.name())
                .field("handler", &handler.name())
                .finish(),
            Self::Unsubscribe { kind, handler } => f
                .debug_struct("Unsubscribe")
                .field("kind", &kind.name())
                .field("handler", &handler.name())
                .finish(),
            Self::Notify { kind, event } => f
                .debug_struct("Notify")
                .field("kind", &kind.name())
                .field("label", &event.label())
                .finish(),
        }
    }
}

/// A queued (un)subscription: the kind named by the caller and the handler.
pub(crate) type Registration = (&'static EventKind, HandlerRef);

/// A queued notification: the event's exact kind and the event.
pub(crate) type Notification = (&'static EventKind, Box<dyn Event>);

/// FIFO safe for concurrent push.
#[derive(Debug)]
pub(crate) struct ActionQueue<T> {
    items: Mutex<VecDeque<T>>,
}

impl<T> Default for ActionQueue<T> {
    fn default() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
        }
    }
}

impl<T> ActionQueue<T> {
    // Handlers never run while this lock is held, so a poisoned lock still
    // guards a consistent deque.
    fn items(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn push(&self, item: T) {
        self.items().push_back(item);
    }

    pub(crate) fn pop(&self) -> Option<T> {
        self.items().pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.items().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Number of actions waiting in each queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingCounts {
    /// Queued subscriptions.
    pub subscriptions: usize,
    /// Queued unsubscriptions.
    pub unsubscriptions: usize,
    /// Queued notifications.
    pub notifications: usize,
}

impl PendingCounts {
    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions == 0 && self.unsubscriptions == 0 && self.notifications == 0
    }
}

/// The three pending queues of a manager.
#[derive(Debug, Default)]
pub(crate) struct PendingQueues {
    pub(crate) subscriptions: ActionQueue<Registration>,
    pub(crate) unsubscriptions: ActionQueue<Registration>,
    pub(crate) notifications: ActionQueue<Notification>,
}

impl PendingQueues {
    /// Route `action` to the queue for its variant.
    pub(crate) fn push(&self, action: PendingAction) {
        match action {
            PendingAction::Subscribe { kind, handler } => self.subscriptions.push((kind, handler)),
            PendingAction::Unsubscribe { kind, handler } => self.unsubscriptions.push((kind, handler)),
            PendingAction::Notify { kind, event } => self.notifications.push((kind, event)),
        }
    }

    pub(crate) fn has_work(&self) -> bool {
        !(self.subscriptions.is_empty()
            && self.unsubscriptions.is_empty()
            && self.notifications.is_empty())
    }

    pub(crate) fn counts(&self) -> PendingCounts {
        PendingCounts {
            subscriptions: self.subscriptions.len(),
            unsubscriptions: self.unsubscriptions.len(),
            notifications: self.notifications.len(),
        }
    }
}
