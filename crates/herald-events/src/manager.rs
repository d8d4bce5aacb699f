//! The event manager: deferred registry mutation and single-flight drain.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};

use herald_core::{BasicEvent, Event, EventKind, KindedEvent};
use tracing::{debug, debug_span, trace, warn};

use crate::config::{FaultPolicy, ManagerConfig};
use crate::error::{DispatchError, DispatchResult};
use crate::gate::{DrainGate, DrainPermit};
use crate::handler::HandlerRef;
use crate::queue::{PendingAction, PendingCounts, PendingQueues};
use crate::registry::SubscriberRegistry;

/// In-process publish/subscribe dispatcher.
///
/// Every mutation goes through a queue. `subscribe` and `unsubscribe` only
/// enqueue; `send` enqueues and then tries to become the drain owner. The
/// owner applies queued subscriptions, then queued unsubscriptions, then
/// delivers one notification, and repeats until every queue is empty. A
/// `send` that cannot take ownership returns at once and its notification
/// is delivered by the current owner.
///
/// Handlers run synchronously on the owner's thread and may call back into
/// the manager. Anything they enqueue is drained before the outermost
/// `send` returns.
///
/// Subscribing to a kind registers the handler on the kind and every
/// ancestor, while delivery looks only at the event's exact kind. A handler
/// subscribed to `Tick` therefore also receives events sent directly as
/// `Trigger` or `Generic Event`.
///
/// **WARNING:** the manager holds strong references to closure handlers. A
/// closure that captures an `Arc<EventManager>` forms a reference cycle; capture
/// a `Weak<EventManager>` instead, or use a bound handler.
#[derive(Debug)]
pub struct EventManager {
    config: ManagerConfig,
    registry: Mutex<SubscriberRegistry>,
    queues: PendingQueues,
    gate: DrainGate,
}

impl EventManager {
    /// Create a manager.
    #[must_use]
    pub fn new(config: ManagerConfig) -> Self {
        Self {
            config,
            registry: Mutex::new(SubscriberRegistry::new()),
            queues: PendingQueues::default(),
            gate: DrainGate::default(),
        }
    }

    /// Manager name, as recorded on drain spans.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Queue `handler` for subscription to `kind` and all of its ancestors.
    ///
    /// Has no effect on delivery until the next drain.
    pub fn subscribe(&self, kind: &'static EventKind, handler: HandlerRef) {
        trace!(kind = %kind, handler = handler.name(), "Queueing subscription");
        self.queues.push(PendingAction::Subscribe { kind, handler });
    }

    /// Queue removal of `handler` from `kind` and all of its ancestors.
    ///
    /// Removing a handler that was never subscribed is a no-op.
    pub fn unsubscribe(&self, kind: &'static EventKind, handler: &HandlerRef) {
        trace!(kind = %kind, handler = handler.name(), "Queueing unsubscription");
        self.queues.push(PendingAction::Unsubscribe {
            kind,
            handler: handler.clone(),
        });
    }

    /// Subscribe to the kind bound to event type `E`.
    pub fn subscribe_to<E: KindedEvent>(&self, handler: HandlerRef) {
        self.subscribe(E::event_kind(), handler);
    }

    /// Unsubscribe from the kind bound to event type `E`.
    pub fn unsubscribe_from<E: KindedEvent>(&self, handler: &HandlerRef) {
        self.unsubscribe(E::event_kind(), handler);
    }

    /// Queue `event` for delivery and drain if no one else is draining.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when this call owned the drain and a
    /// handler faulted. Calls that do not win ownership always return `Ok`.
    pub fn send<E: Event>(&self, event: E) -> DispatchResult {
        self.send_boxed(Box::new(event))
    }

    /// [`send`](Self::send) for an already boxed event.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub fn send_boxed(&self, event: Box<dyn Event>) -> DispatchResult {
        let kind = event.kind();
        trace!(kind = %kind, label = event.label(), "Queueing notification");
        self.queues.push(PendingAction::Notify { kind, event });
        self.try_drain().map(|_| ())
    }

    /// Build a payload-free event of `kind` and send it.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub fn emit(&self, kind: &'static EventKind) -> DispatchResult {
        self.send(BasicEvent::new(kind))
    }

    /// Drain pending actions without queueing anything.
    ///
    /// Returns `Ok(false)` if another caller currently owns the drain,
    /// including a caller further up the current stack.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub fn flush(&self) -> DispatchResult<bool> {
        self.try_drain()
    }

    /// Ordered snapshot of the handlers registered for exactly `kind`.
    ///
    /// Expired entries that have not yet been pruned are included.
    #[must_use]
    pub fn subscribers(&self, kind: &'static EventKind) -> Vec<HandlerRef> {
        self.registry().snapshot(kind)
    }

    /// Whether `handler` is currently registered for exactly `kind`.
    #[must_use]
    pub fn is_subscribed(&self, kind: &'static EventKind, handler: &HandlerRef) -> bool {
        self.registry().contains(kind, handler)
    }

    /// Number of actions waiting in each queue.
    #[must_use]
    pub fn pending(&self) -> PendingCounts {
        self.queues.counts()
    }

    /// Whether some caller currently owns the drain.
    #[must_use]
    pub fn is_draining(&self) -> bool {
        self.gate.is_held()
    }

    // No user code runs while this lock is held.
    fn registry(&self) -> MutexGuard<'_, SubscriberRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquire the gate and drain. Returns whether this call drained at all.
    fn try_drain(&self) -> DispatchResult<bool> {
        let Some(permit) = self.gate.try_acquire() else {
            return Ok(false);
        };
        let result = self.drain();
        self.settle(permit, result).map(|()| true)
    }

    /// Release the gate after a drain, draining again while work is left
    /// that arrived after the owner's last check.
    ///
    /// A sender that lost the gate race returns at once, so whoever released
    /// last must pick up its notification. Isolated faults are collected
    /// across rounds; a halting fault returns immediately and leaves the
    /// queues for the next drain.
    fn settle<'a>(&'a self, mut permit: DrainPermit<'a>, mut result: DispatchResult) -> DispatchResult {
        let mut faults = Vec::new();
        loop {
            drop(permit);
            match result {
                Ok(()) => {},
                Err(DispatchError::Isolated { faults: round }) => faults.extend(round),
                Err(fault) => return Err(fault),
            }
            if !self.queues.has_work() {
                break;
            }
            let Some(next) = self.gate.try_acquire() else {
                break;
            };
            permit = next;
            result = self.drain();
        }

        if faults.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::Isolated { faults })
        }
    }

    fn drain(&self) -> DispatchResult {
        let span = debug_span!("drain", manager = %self.config.name);
        let _guard = span.enter();

        let mut faults = Vec::new();
        loop {
            self.apply_subscriptions();
            self.apply_unsubscriptions();

            match self.queues.notifications.pop() {
                Some((kind, event)) => self.deliver(kind, event.as_ref(), &mut faults)?,
                None if self.queues.has_work() => {},
                None => break,
            }
        }

        if faults.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::Isolated { faults })
        }
    }

    fn apply_subscriptions(&self) {
        while let Some((kind, handler)) = self.queues.subscriptions.pop() {
            let change = self.registry().subscribe(kind, &handler);
            debug!(
                kind = %kind,
                handler = handler.name(),
                lineage = kind.depth().saturating_add(1),
                added = change.touched,
                "Subscription applied"
            );
            if change.pruned > 0 {
                debug!(pruned = change.pruned, "Pruned expired handlers");
            }
        }
    }

    fn apply_unsubscriptions(&self) {
        while let Some((kind, handler)) = self.queues.unsubscriptions.pop() {
            let change = self.registry().unsubscribe(kind, &handler);
            debug!(
                kind = %kind,
                handler = handler.name(),
                removed = change.touched,
                "Unsubscription applied"
            );
            if change.pruned > 0 {
                debug!(pruned = change.pruned, "Pruned expired handlers");
            }
        }
    }

    /// Invoke every live handler registered for exactly `kind`.
    ///
    /// The handler list is snapshotted before the first call, so handlers
    /// queued during delivery do not see this event.
    fn deliver(
        &self,
        kind: &'static EventKind,
        event: &dyn Event,
        faults: &mut Vec<DispatchError>,
    ) -> DispatchResult {
        let handlers = self.subscribers(kind);
        trace!(kind = %kind, handlers = handlers.len(), "Delivering event");

        for handler in &handlers {
            let Some(live) = handler.resolve() else {
                debug!(kind = %kind, handler = handler.name(), "Skipping expired handler");
                continue;
            };

            trace!(kind = %kind, handler = handler.name(), "Invoking handler");
            let fault = match panic::catch_unwind(AssertUnwindSafe(|| live.invoke(event))) {
                Ok(Ok(())) => continue,
                Ok(Err(source)) => DispatchError::HandlerFailed {
                    handler: handler.name().to_owned(),
                    kind,
                    source,
                },
                Err(payload) => DispatchError::HandlerPanicked {
                    handler: handler.name().to_owned(),
                    kind,
                    message: panic_message(payload.as_ref()),
                },
            };

            warn!(
                kind = %kind,
                handler = handler.name(),
                policy = %self.config.fault_policy,
                error = %fault,
                "Handler fault"
            );
            match self.config.fault_policy {
                FaultPolicy::Halt => return Err(fault),
                FaultPolicy::Isolate => faults.push(fault),
            }
        }
        Ok(())
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
