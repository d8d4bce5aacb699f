//! Weak and bound handlers never extend the life of what they point at.

use std::sync::Arc;

use herald_core::{Event, HandlerResult};
use herald_events::{EventManager, HandlerFn, HandlerRef};
use herald_test::{BASE, CountingReceiver, Recorder, TICK, TOCK};

#[test]
fn test_dropped_receiver_is_skipped_silently() {
    let manager = EventManager::default();
    let receiver = CountingReceiver::new();
    manager.subscribe(&TICK, receiver.handler());

    manager.emit(&TICK).unwrap();
    assert_eq!(receiver.count(), 1);

    drop(receiver);
    assert!(manager.emit(&TICK).is_ok());
    assert!(manager.emit(&BASE).is_ok());
}

#[test]
fn test_weak_callable_expires_with_its_owner() {
    let manager = EventManager::default();
    let recorder = Recorder::new();
    let log = recorder.clone();
    let callback: Arc<HandlerFn> = Arc::new(move |event: &dyn Event| -> HandlerResult {
        log.record(format!("weak:{}", event.kind()));
        Ok(())
    });

    manager.subscribe(&TICK, HandlerRef::weak("weak", &callback));
    manager.emit(&TICK).unwrap();
    drop(callback);
    manager.emit(&TICK).unwrap();

    assert_eq!(recorder.entries(), vec!["weak:Tick"]);
}

#[test]
fn test_expired_entries_pruned_on_next_subscribe() {
    let manager = EventManager::default();
    let receiver = CountingReceiver::new();
    manager.subscribe(&TOCK, receiver.handler());
    manager.flush().unwrap();
    assert_eq!(manager.subscribers(&BASE).len(), 1);

    drop(receiver);
    let recorder = Recorder::new();
    manager.subscribe(&TOCK, recorder.handler("fresh"));
    manager.flush().unwrap();

    // Every set on the new subscription's lineage was pruned.
    for kind in [&TOCK, &TICK, &BASE] {
        let names: Vec<_> = manager
            .subscribers(kind)
            .iter()
            .map(|h| h.name().to_owned())
            .collect();
        assert_eq!(names, vec!["fresh"], "kind {kind}");
    }
}

#[test]
fn test_bound_handler_identity_is_stable() {
    let manager = EventManager::default();
    let receiver = CountingReceiver::new();

    manager.subscribe(&TICK, receiver.handler());
    manager.subscribe(&TICK, receiver.handler());
    manager.emit(&TICK).unwrap();
    assert_eq!(receiver.count(), 1);

    manager.unsubscribe(&TICK, &receiver.handler());
    manager.emit(&TICK).unwrap();
    assert_eq!(receiver.count(), 1);
    assert_eq!(Arc::strong_count(&receiver), 1);
}
