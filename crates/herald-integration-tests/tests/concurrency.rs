//! Many threads sending at once: one drains, nothing is lost.

use std::sync::{Arc, Barrier};
use std::thread;

use herald_events::{EventManager, HandlerRef};
use herald_test::{BASE, CountingReceiver, Recorder, SIDE, TICK};

const THREADS: usize = 8;
const PER_THREAD: usize = 250;

fn spawn_all<F>(f: F)
where
    F: Fn(usize) + Send + Sync + 'static,
{
    let f = Arc::new(f);
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|id| {
            let (f, barrier) = (Arc::clone(&f), Arc::clone(&barrier));
            thread::spawn(move || {
                barrier.wait();
                f(id);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_no_notification_is_stranded() {
    let manager = Arc::new(EventManager::default());
    let receiver = CountingReceiver::new();
    manager.subscribe(&TICK, receiver.handler());
    manager.flush().unwrap();

    let sender = Arc::clone(&manager);
    spawn_all(move |_| {
        for _ in 0..PER_THREAD {
            sender.emit(&TICK).unwrap();
        }
    });

    assert_eq!(receiver.count(), THREADS * PER_THREAD);
    assert!(manager.pending().is_empty());
    assert!(!manager.is_draining());
}

#[test]
fn test_chained_sends_across_threads() {
    let manager = Arc::new(EventManager::default());
    let recorder = Recorder::new();

    let weak = Arc::downgrade(&manager);
    manager.subscribe(
        &TICK,
        HandlerRef::observer("relay", move |_| {
            if let Some(manager) = weak.upgrade() {
                let _ = manager.emit(&SIDE);
            }
        }),
    );
    manager.subscribe(&SIDE, recorder.handler("side"));
    manager.flush().unwrap();

    let sender = Arc::clone(&manager);
    spawn_all(move |_| {
        for _ in 0..PER_THREAD {
            sender.emit(&TICK).unwrap();
        }
    });

    assert_eq!(recorder.count("side"), THREADS * PER_THREAD);
    assert!(manager.pending().is_empty());
}

#[test]
fn test_concurrent_subscribe_and_unsubscribe_settle() {
    let manager = Arc::new(EventManager::default());
    let receivers: Vec<_> = (0..THREADS).map(|_| CountingReceiver::new()).collect();
    let handlers: Arc<Vec<HandlerRef>> =
        Arc::new(receivers.iter().map(CountingReceiver::handler).collect());

    let (shared, list) = (Arc::clone(&manager), Arc::clone(&handlers));
    spawn_all(move |id| {
        for _ in 0..PER_THREAD {
            shared.subscribe(&TICK, list[id].clone());
            shared.emit(&BASE).unwrap();
            shared.unsubscribe(&TICK, &list[id]);
        }
    });
    manager.flush().unwrap();
    assert!(manager.pending().is_empty());
    assert!(manager.subscribers(&TICK).len() <= THREADS);

    // Re-subscribing is idempotent whatever state the race left behind.
    for handler in handlers.iter() {
        manager.subscribe(&TICK, handler.clone());
    }
    manager.flush().unwrap();
    assert_eq!(manager.subscribers(&TICK).len(), THREADS);
    assert_eq!(manager.subscribers(&BASE).len(), THREADS);
}
