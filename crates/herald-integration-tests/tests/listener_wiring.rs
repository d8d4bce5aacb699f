//! Listener types attach their binding tables on construction.

use std::sync::{Arc, Mutex};

use herald_core::standard::{QUIT, QuitEvent, TICK, TickEvent};
use herald_core::{Event, HandlerResult};
use herald_events::EventManager;
use herald_listen::{Binding, Listener, Listening, attach, bindings, detach};

#[derive(Debug, Default)]
struct Clock {
    seen: Mutex<Vec<String>>,
}

impl Clock {
    fn on_tick(&self, event: &dyn Event) -> HandlerResult {
        let seq = event.downcast_ref::<TickEvent>().map_or(0, |tick| tick.seq);
        self.seen.lock().unwrap().push(format!("tick {seq}"));
        Ok(())
    }

    fn on_quit(&self, event: &dyn Event) -> HandlerResult {
        let reason = event
            .downcast_ref::<QuitEvent>()
            .and_then(|quit| quit.reason.clone())
            .unwrap_or_default();
        self.seen.lock().unwrap().push(format!("quit {reason}"));
        Ok(())
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Listener for Clock {
    fn bindings() -> Vec<Binding<Self>> {
        bindings![TICK => Self::on_tick, QUIT => Self::on_quit]
    }
}

#[test]
fn test_listening_attaches_and_detaches() {
    let manager = Arc::new(EventManager::default());
    let clock = Listening::new(&manager, Clock::default());

    manager.send(TickEvent::new(3)).unwrap();
    manager.send(QuitEvent::new().with_reason("done")).unwrap();
    assert_eq!(clock.seen(), vec!["tick 3", "quit done"]);

    let receiver = Arc::clone(clock.receiver());
    drop(clock);
    manager.send(TickEvent::new(4)).unwrap();
    assert_eq!(receiver.seen(), vec!["tick 3", "quit done"]);
}

#[test]
fn test_dropping_receiver_without_detach_is_harmless() {
    let manager = Arc::new(EventManager::default());
    let clock = Arc::new(Clock::default());
    assert_eq!(attach(&manager, &clock), 2);
    manager.send(TickEvent::new(1)).unwrap();

    drop(clock);
    assert!(manager.send(TickEvent::new(2)).is_ok());
}

#[test]
fn test_explicit_detach_stops_delivery() {
    let manager = EventManager::default();
    let clock = Arc::new(Clock::default());
    attach(&manager, &clock);
    detach(&manager, &clock);

    manager.send(TickEvent::new(1)).unwrap();
    assert!(clock.seen().is_empty());
}
