//! Subscription walks the lineage; delivery looks up the exact kind only.

use herald_events::EventManager;
use herald_test::{BASE, Numbered, Recorder, SIDE, TICK, TOCK, labelled};

#[test]
fn test_subclass_handler_receives_direct_ancestor_sends() {
    let manager = EventManager::default();
    let recorder = Recorder::new();
    let h = recorder.handler("h");

    manager.subscribe(&TICK, h.clone());
    manager.emit(&BASE).unwrap();
    manager.emit(&TICK).unwrap();
    assert_eq!(recorder.entries(), vec!["h:Base", "h:Tick"]);

    manager.unsubscribe(&TICK, &h);
    manager.emit(&BASE).unwrap();
    assert_eq!(recorder.entries(), vec!["h:Base", "h:Tick"]);
}

#[test]
fn test_registration_covers_every_ancestor() {
    let manager = EventManager::default();
    let recorder = Recorder::new();
    let h = recorder.handler("h");

    manager.subscribe(&TOCK, h.clone());
    manager.flush().unwrap();

    assert!(manager.is_subscribed(&TOCK, &h));
    assert!(manager.is_subscribed(&TICK, &h));
    assert!(manager.is_subscribed(&BASE, &h));
    assert!(!manager.is_subscribed(&SIDE, &h));
}

#[test]
fn test_ancestor_handler_does_not_see_descendant_sends() {
    let manager = EventManager::default();
    let recorder = Recorder::new();

    manager.subscribe(&BASE, recorder.handler("root"));
    manager.send(labelled(&TICK, "t")).unwrap();
    manager.send(Numbered::new(1)).unwrap();
    manager.emit(&BASE).unwrap();

    assert_eq!(recorder.entries(), vec!["root:Base"]);
}

#[test]
fn test_siblings_are_isolated() {
    let manager = EventManager::default();
    let recorder = Recorder::new();

    manager.subscribe(&TICK, recorder.handler("tick"));
    manager.subscribe(&SIDE, recorder.handler("side"));
    manager.emit(&SIDE).unwrap();
    manager.emit(&TICK).unwrap();

    assert_eq!(recorder.entries(), vec!["side:Side", "tick:Tick"]);
}

#[test]
fn test_delivery_follows_subscription_order() {
    let manager = EventManager::default();
    let recorder = Recorder::new();

    for name in ["a", "b", "c"] {
        manager.subscribe(&TOCK, recorder.handler(name));
    }
    manager.send(Numbered::new(7)).unwrap();

    assert_eq!(recorder.entries(), vec!["a:Tock", "b:Tock", "c:Tock"]);
}

#[test]
fn test_unsubscribe_through_ancestor_removes_only_upward() {
    let manager = EventManager::default();
    let recorder = Recorder::new();
    let h = recorder.handler("h");

    manager.subscribe(&TOCK, h.clone());
    manager.unsubscribe(&TICK, &h);
    manager.flush().unwrap();

    // Unsubscribing from TICK walks TICK's lineage, leaving TOCK intact.
    assert!(manager.is_subscribed(&TOCK, &h));
    assert!(!manager.is_subscribed(&TICK, &h));
    assert!(!manager.is_subscribed(&BASE, &h));
}
