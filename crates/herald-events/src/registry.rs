//! Subscriber registry: one insertion-ordered set of handlers per kind.

use std::collections::HashMap;

use herald_core::EventKind;

use crate::handler::HandlerRef;

/// Insertion-ordered set of handlers for one kind.
///
/// Order is first-subscription order and governs fan-out order.
#[derive(Debug, Clone, Default)]
pub struct SubscriberSet {
    handlers: Vec<HandlerRef>,
}

impl SubscriberSet {
    /// Insert `handler` unless an equal reference is already present.
    ///
    /// Returns `true` if the handler was added.
    pub fn insert(&mut self, handler: HandlerRef) -> bool {
        if self.contains(&handler) {
            return false;
        }
        self.handlers.push(handler);
        true
    }

    /// Remove the reference equal to `handler`, if present.
    pub fn remove(&mut self, handler: &HandlerRef) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|existing| existing != handler);
        self.handlers.len() != before
    }

    /// Drop every expired reference. Returns how many were removed.
    pub fn prune_expired(&mut self) -> usize {
        let before = self.handlers.len();
        self.handlers.retain(|existing| !existing.is_expired());
        before.saturating_sub(self.handlers.len())
    }

    /// Whether an equal reference is present.
    #[must_use]
    pub fn contains(&self, handler: &HandlerRef) -> bool {
        self.handlers.iter().any(|existing| existing == handler)
    }

    /// Ordered copy of the handlers.
    #[must_use]
    pub fn snapshot(&self) -> Vec<HandlerRef> {
        self.handlers.clone()
    }

    /// Number of handlers, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// What applying one subscribe or unsubscribe changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RegistryChange {
    /// Sets the handler was added to or removed from.
    pub(crate) touched: usize,
    /// Expired references dropped along the way.
    pub(crate) pruned: usize,
}

/// Per-kind subscriber sets.
///
/// Only the drain owner mutates the registry.
#[derive(Debug, Default)]
pub(crate) struct SubscriberRegistry {
    sets: HashMap<&'static EventKind, SubscriberSet>,
}

impl SubscriberRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add `handler` to the set of `kind` and of every ancestor of `kind`.
    pub(crate) fn subscribe(&mut self, kind: &'static EventKind, handler: &HandlerRef) -> RegistryChange {
        let mut change = RegistryChange::default();
        for ancestor in kind.lineage() {
            let set = self.sets.entry(*ancestor).or_default();
            change.pruned = change.pruned.saturating_add(set.prune_expired());
            if set.insert(handler.clone()) {
                change.touched = change.touched.saturating_add(1);
            }
        }
        change
    }

    /// Remove `handler` from the set of `kind` and of every ancestor.
    pub(crate) fn unsubscribe(&mut self, kind: &'static EventKind, handler: &HandlerRef) -> RegistryChange {
        let mut change = RegistryChange::default();
        for ancestor in kind.lineage() {
            let Some(set) = self.sets.get_mut(*ancestor) else {
                continue;
            };
            change.pruned = change.pruned.saturating_add(set.prune_expired());
            if set.remove(handler) {
                change.touched = change.touched.saturating_add(1);
            }
        }
        change
    }

    /// Ordered snapshot of the handlers registered for exactly `kind`.
    pub(crate) fn snapshot(&self, kind: &'static EventKind) -> Vec<HandlerRef> {
        self.sets.get(kind).map(SubscriberSet::snapshot).unwrap_or_default()
    }

    pub(crate) fn contains(&self, kind: &'static EventKind, handler: &HandlerRef) -> bool {
        self.sets.get(kind).is_some_and(|set| set.contains(handler))
    }
}
