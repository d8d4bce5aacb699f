//! Turning binding tables into subscriptions.

use std::ops::Deref;
use std::sync::Arc;

use herald_events::EventManager;
use tracing::debug;

use crate::binding::Listener;

/// Subscribe every binding of `receiver`. Returns the number of bindings.
///
/// Subscriptions are queued and take effect at the manager's next drain.
/// The manager never keeps `receiver` alive.
pub fn attach<R: Listener>(manager: &EventManager, receiver: &Arc<R>) -> usize {
    let bindings = R::bindings();
    for binding in &bindings {
        debug!(
            kind = %binding.kind(),
            method = binding.name(),
            manager = manager.name(),
            "Attaching listener binding"
        );
        manager.subscribe(binding.kind(), binding.handler(receiver));
    }
    bindings.len()
}

/// Unsubscribe every binding of `receiver`. Returns the number of bindings.
pub fn detach<R: Listener>(manager: &EventManager, receiver: &Arc<R>) -> usize {
    let bindings = R::bindings();
    for binding in &bindings {
        debug!(kind = %binding.kind(), method = binding.name(), "Detaching listener binding");
        manager.unsubscribe(binding.kind(), &binding.handler(receiver));
    }
    bindings.len()
}

/// A listener wired to a manager for as long as this value lives.
///
/// Construction attaches every binding; dropping detaches them. Other
/// clones of the inner [`Arc`] keep the receiver alive but not subscribed.
#[derive(Debug)]
pub struct Listening<R: Listener> {
    receiver: Arc<R>,
    manager: Arc<EventManager>,
}

impl<R: Listener> Listening<R> {
    /// Wrap `receiver` and attach it to `manager`.
    pub fn new(manager: &Arc<EventManager>, receiver: R) -> Self {
        Self::from_arc(manager, Arc::new(receiver))
    }

    /// Attach an already shared receiver.
    pub fn from_arc(manager: &Arc<EventManager>, receiver: Arc<R>) -> Self {
        attach(manager, &receiver);
        Self {
            receiver,
            manager: Arc::clone(manager),
        }
    }

    /// The shared receiver.
    #[must_use]
    pub fn receiver(&self) -> &Arc<R> {
        &self.receiver
    }

    /// The manager this listener is attached to.
    #[must_use]
    pub fn manager(&self) -> &Arc<EventManager> {
        &self.manager
    }
}

impl<R: Listener> Deref for Listening<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.receiver
    }
}

impl<R: Listener> Drop for Listening<R> {
    fn drop(&mut self) {
        detach(&self.manager, &self.receiver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Binding;
    use herald_core::{Event, HandlerResult, QUIT, QuitEvent, TICK, TickEvent};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Journal {
        seen: Mutex<Vec<String>>,
    }

    impl Journal {
        fn on_tick(&self, event: &dyn Event) -> HandlerResult {
            self.seen.lock().unwrap().push(format!("tick:{}", event.kind()));
            Ok(())
        }

        fn on_quit(&self, event: &dyn Event) -> HandlerResult {
            self.seen.lock().unwrap().push(format!("quit:{}", event.kind()));
            Ok(())
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Listener for Journal {
        fn bindings() -> Vec<Binding<Self>> {
            crate::bindings![TICK => Self::on_tick, QUIT => Self::on_quit]
        }
    }

    #[test]
    fn test_attach_subscribes_each_binding() {
        let manager = EventManager::default();
        let journal = Arc::new(Journal::default());

        assert_eq!(attach(&manager, &journal), 2);
        manager.send(TickEvent::new(0)).unwrap();
        manager.send(QuitEvent::new()).unwrap();

        assert_eq!(journal.seen(), vec!["tick:Tick", "quit:Quit"]);
        assert_eq!(Arc::strong_count(&journal), 1);
    }

    #[test]
    fn test_attach_twice_is_idempotent() {
        let manager = EventManager::default();
        let journal = Arc::new(Journal::default());

        attach(&manager, &journal);
        attach(&manager, &journal);
        manager.send(TickEvent::new(0)).unwrap();

        assert_eq!(journal.seen().len(), 1);
    }

    #[test]
    fn test_detach_stops_delivery() {
        let manager = EventManager::default();
        let journal = Arc::new(Journal::default());

        attach(&manager, &journal);
        detach(&manager, &journal);
        manager.send(TickEvent::new(0)).unwrap();

        assert!(journal.seen().is_empty());
    }

    #[test]
    fn test_listening_wires_on_construction_and_unwires_on_drop() {
        let manager = Arc::new(EventManager::default());
        let listening = Listening::new(&manager, Journal::default());
        let journal = Arc::clone(listening.receiver());

        manager.send(TickEvent::new(0)).unwrap();
        assert_eq!(listening.seen(), vec!["tick:Tick"]);

        drop(listening);
        manager.send(TickEvent::new(1)).unwrap();
        assert_eq!(journal.seen(), vec!["tick:Tick"]);
        assert!(manager.subscribers(&TICK).is_empty());
    }
}
