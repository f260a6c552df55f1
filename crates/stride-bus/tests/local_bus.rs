//! Integration tests for `LocalBus` dispatch semantics.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use stride_bus::{Handler, LocalBus, NotificationBus, SubscriptionId, Topic};

// =========================================================================
// Helpers
// =========================================================================

fn recording(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> Handler {
    let log = Arc::clone(log);
    Arc::new(move |_| log.lock().unwrap().push(name))
}

// =========================================================================
// Ordering
// =========================================================================

#[test]
fn test_publish_runs_handlers_in_subscription_order() {
    let bus = LocalBus::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    bus.subscribe(Topic::StorageChanged, recording(&log, "first"));
    bus.subscribe(Topic::StorageChanged, recording(&log, "second"));
    bus.subscribe(Topic::StorageChanged, recording(&log, "third"));

    bus.publish(Topic::StorageChanged);

    assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn test_publish_completes_all_handlers_before_returning() {
    let bus = LocalBus::new();
    let hits = Arc::new(AtomicUsize::new(0));
    for _ in 0..5 {
        let hits = Arc::clone(&hits);
        bus.subscribe(
            Topic::Logout,
            Arc::new(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            }),
        );
    }

    bus.publish(Topic::Logout);

    assert_eq!(hits.load(Ordering::SeqCst), 5);
}

// =========================================================================
// Re-entrancy
// =========================================================================

#[test]
fn test_handler_can_unsubscribe_itself_during_publish() {
    let bus = Arc::new(LocalBus::new());
    let own_id: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));
    let hits = Arc::new(AtomicUsize::new(0));

    let handler: Handler = {
        let bus = Arc::clone(&bus);
        let own_id = Arc::clone(&own_id);
        let hits = Arc::clone(&hits);
        Arc::new(move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
            if let Some(id) = own_id.lock().unwrap().take() {
                bus.unsubscribe(id);
            }
        })
    };
    let id = bus.subscribe(Topic::Logout, handler);
    *own_id.lock().unwrap() = Some(id);

    bus.publish(Topic::Logout);
    bus.publish(Topic::Logout);

    assert_eq!(hits.load(Ordering::SeqCst), 1, "second publish must not reach it");
    assert_eq!(bus.subscriber_count(Topic::Logout), 0);
}

#[test]
fn test_handler_can_publish_another_topic() {
    let bus = Arc::new(LocalBus::new());
    let log = Arc::new(Mutex::new(Vec::new()));

    let relay: Handler = {
        let bus = Arc::clone(&bus);
        let log = Arc::clone(&log);
        Arc::new(move |_| {
            log.lock().unwrap().push("relay");
            bus.publish(Topic::StorageChanged);
        })
    };
    bus.subscribe(Topic::Logout, relay);
    bus.subscribe(Topic::StorageChanged, recording(&log, "storage"));

    bus.publish(Topic::Logout);

    assert_eq!(*log.lock().unwrap(), vec!["relay", "storage"]);
}

#[test]
fn test_subscriber_count_tracks_each_topic() {
    let bus = LocalBus::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let a = bus.subscribe(Topic::StorageChanged, recording(&log, "a"));
    bus.subscribe(Topic::StorageChanged, recording(&log, "b"));
    bus.subscribe(Topic::Logout, recording(&log, "c"));

    assert_eq!(bus.subscriber_count(Topic::StorageChanged), 2);
    assert_eq!(bus.subscriber_count(Topic::Logout), 1);

    bus.unsubscribe(a);

    assert_eq!(bus.subscriber_count(Topic::StorageChanged), 1);
}
