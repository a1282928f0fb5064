//! Integration tests for global subscriptions and dispatch safety.
//!
//! These tests cover subscribe/unsubscribe bookkeeping, duplicate
//! registrations, handlers that mutate the registry while being dispatched,
//! panicking handlers, and concurrent use from several threads.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;

use logger::{EventHandler, HandlerId, LogEvent, Logger, Severity};

type Records = Arc<Mutex<Vec<String>>>;

fn tagged(records: &Records, tag: &'static str) -> impl Fn(&LogEvent) + Send + Sync + use<> {
    let sink = Arc::clone(records);
    move |event: &LogEvent| {
        sink.lock()
            .unwrap()
            .push(format!("{tag}:{}:{}", event.level(), event.message()));
    }
}

fn recorded(records: &Records) -> Vec<String> {
    records.lock().unwrap().clone()
}

// ============================================================================
// Subscribe / Unsubscribe
// ============================================================================

/// Verifies unsubscribing the first of two subscribers before a warn call.
#[test]
fn unsubscribed_handler_misses_later_events() {
    let logger = Logger::new();
    let records = Records::default();
    let first = logger.subscribe(tagged(&records, "first"));
    logger.subscribe(tagged(&records, "second"));

    assert!(logger.unsubscribe(first));
    logger.log(Severity::Warn, "x");

    assert_eq!(recorded(&records), vec!["second:warn:x"]);
}

/// Verifies unsubscribing does not disturb level handlers.
#[test]
fn unsubscribe_leaves_level_handlers() {
    let logger = Logger::new();
    let records = Records::default();
    let sink = Arc::clone(&records);
    logger.add_level_handler(Severity::Warn, move |message| {
        sink.lock().unwrap().push(format!("level:{message}"));
    });
    let id = logger.subscribe(tagged(&records, "global"));

    logger.log(Severity::Warn, "a");
    logger.unsubscribe(id);
    logger.log(Severity::Warn, "b");

    assert_eq!(
        recorded(&records),
        vec!["level:a", "global:warn:a", "level:b"]
    );
}

/// Verifies unsubscribing an unknown id changes nothing.
#[test]
fn unsubscribe_unknown_is_noop() {
    let logger = Logger::new();
    let records = Records::default();
    let id = logger.subscribe(tagged(&records, "only"));

    assert!(logger.unsubscribe(id));
    assert!(!logger.unsubscribe(id));

    let kept = logger.subscribe(tagged(&records, "kept"));
    assert_ne!(kept, id);
    assert!(!logger.unsubscribe(id));
    assert_eq!(logger.subscriber_count(), 1);

    logger.log(Severity::Info, "m");
    assert_eq!(recorded(&records), vec!["kept:info:m"]);
}

/// Verifies a shared subscriber registered twice fires twice and is removed once per call.
#[test]
fn duplicate_subscription_fires_per_registration() {
    let logger = Logger::new();
    let records = Records::default();
    let handler: Arc<EventHandler> = Arc::new(tagged(&records, "dup"));

    let first = logger.subscribe_shared(Arc::clone(&handler));
    let _second = logger.subscribe_shared(handler);
    assert_eq!(logger.subscriber_count(), 2);

    logger.log(Severity::Info, "one");
    assert_eq!(recorded(&records), vec!["dup:info:one", "dup:info:one"]);

    assert!(logger.unsubscribe(first));
    logger.log(Severity::Info, "two");
    assert_eq!(
        recorded(&records),
        vec!["dup:info:one", "dup:info:one", "dup:info:two"]
    );
}

/// Verifies subscribers run in registration order.
#[test]
fn subscribers_run_in_registration_order() {
    let logger = Logger::new();
    let records = Records::default();
    for tag in ["a", "b", "c"] {
        logger.subscribe(tagged(&records, tag));
    }

    logger.log(Severity::Critical, "z");

    assert_eq!(
        recorded(&records),
        vec!["a:critical:z", "b:critical:z", "c:critical:z"]
    );
}

// ============================================================================
// Registry Changes During Dispatch
// ============================================================================

/// Verifies a subscriber that removes itself does not make others skip or repeat.
#[test]
fn self_unsubscribe_during_dispatch() {
    let logger = Arc::new(Logger::new());
    let records = Records::default();
    let own_id: Arc<OnceLock<HandlerId>> = Arc::new(OnceLock::new());

    logger.subscribe(tagged(&records, "before"));
    let id = {
        let weak = Arc::downgrade(&logger);
        let own_id = Arc::clone(&own_id);
        let sink = Arc::clone(&records);
        logger.subscribe(move |event: &LogEvent| {
            sink.lock().unwrap().push(format!("once:{}", event.message()));
            if let (Some(logger), Some(id)) = (weak.upgrade(), own_id.get()) {
                logger.unsubscribe(*id);
            }
        })
    };
    own_id.set(id).unwrap();
    logger.subscribe(tagged(&records, "after"));

    logger.log(Severity::Info, "1");
    logger.log(Severity::Info, "2");

    assert_eq!(
        recorded(&records),
        vec![
            "before:info:1",
            "once:1",
            "after:info:1",
            "before:info:2",
            "after:info:2",
        ]
    );
}

/// Verifies a handler removing a later handler only takes effect on the next call.
#[test]
fn removing_other_handler_during_dispatch() {
    let logger = Arc::new(Logger::new());
    let records = Records::default();
    let victim: Arc<OnceLock<HandlerId>> = Arc::new(OnceLock::new());

    {
        let weak = Arc::downgrade(&logger);
        let victim = Arc::clone(&victim);
        logger.add_level_handler(Severity::Info, move |_| {
            if let (Some(logger), Some(id)) = (weak.upgrade(), victim.get()) {
                logger.remove_level_handler(Severity::Info, *id);
            }
        });
    }
    let sink = Arc::clone(&records);
    let id = logger.add_level_handler(Severity::Info, move |message| {
        sink.lock().unwrap().push(message.to_owned());
    });
    victim.set(id).unwrap();

    logger.log(Severity::Info, "first");
    logger.log(Severity::Info, "second");

    assert_eq!(recorded(&records), vec!["first"]);
    assert_eq!(logger.level_handler_count(Severity::Info), 1);
}

/// Verifies handlers added during dispatch start with the next call.
#[test]
fn subscribe_during_dispatch_applies_next_call() {
    let logger = Arc::new(Logger::new());
    let records = Records::default();
    {
        let weak = Arc::downgrade(&logger);
        let records = Arc::clone(&records);
        logger.add_level_handler(Severity::Warn, move |_| {
            if let Some(logger) = weak.upgrade() {
                logger.subscribe(tagged(&records, "late"));
            }
        });
    }

    logger.log(Severity::Warn, "1");
    assert!(recorded(&records).is_empty());

    logger.log(Severity::Warn, "2");
    assert_eq!(recorded(&records), vec!["late:warn:2"]);
}

/// Verifies a handler may log re-entrantly without deadlocking.
#[test]
fn reentrant_logging_from_handler() {
    let logger = Arc::new(Logger::new());
    let records = Records::default();
    logger.subscribe(tagged(&records, "global"));
    {
        let weak = Arc::downgrade(&logger);
        logger.add_level_handler(Severity::Critical, move |message| {
            if let Some(logger) = weak.upgrade() {
                logger.log(Severity::Warn, &format!("escalated {message}"));
            }
        });
    }

    logger.log(Severity::Critical, "outage");

    assert_eq!(
        recorded(&records),
        vec!["global:warn:escalated outage", "global:critical:outage"]
    );
}

// ============================================================================
// Panicking Handlers
// ============================================================================

/// Verifies a panicking subscriber propagates after earlier ones ran and skips later ones.
#[test]
fn panicking_subscriber_propagates() {
    let logger = Logger::new();
    let records = Records::default();
    logger.subscribe(tagged(&records, "before"));
    logger.subscribe(|_| panic!("subscriber failure"));
    logger.subscribe(tagged(&records, "after"));

    let outcome = catch_unwind(AssertUnwindSafe(|| logger.log(Severity::Info, "boom")));

    assert!(outcome.is_err());
    assert_eq!(recorded(&records), vec!["before:info:boom"]);
}

/// Verifies a panicking level handler prevents subscribers for that call.
#[test]
fn panicking_level_handler_skips_subscribers() {
    let logger = Logger::new();
    let records = Records::default();
    logger.add_level_handler(Severity::Warn, |_| panic!("level failure"));
    logger.subscribe(tagged(&records, "global"));

    let outcome = catch_unwind(AssertUnwindSafe(|| logger.log(Severity::Warn, "w")));

    assert!(outcome.is_err());
    assert!(recorded(&records).is_empty());
}

/// Verifies the registry stays usable after a handler panicked.
#[test]
fn registry_survives_handler_panic() {
    let logger = Logger::new();
    let records = Records::default();
    let faulty = logger.subscribe(|_| panic!("subscriber failure"));
    logger.subscribe(tagged(&records, "healthy"));

    let _ = catch_unwind(AssertUnwindSafe(|| logger.log(Severity::Info, "first")));

    assert_eq!(logger.subscriber_count(), 2);
    assert!(logger.unsubscribe(faulty));
    logger.log(Severity::Info, "second");

    assert_eq!(recorded(&records), vec!["healthy:info:second"]);
}

// ============================================================================
// Concurrency
// ============================================================================

/// Verifies concurrent logging reaches every subscriber exactly once per call.
#[test]
fn concurrent_logging_delivers_every_event() {
    let logger = Logger::new();
    let count = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&count);
    logger.subscribe(move |_| *sink.lock().unwrap() += 1);

    thread::scope(|scope| {
        for worker in 0..4 {
            let logger = &logger;
            scope.spawn(move || {
                for i in 0..250 {
                    logger.log(Severity::Info, &format!("{worker}-{i}"));
                }
            });
        }
    });

    assert_eq!(*count.lock().unwrap(), 1000);
}

/// Verifies registrations from several threads are all kept and uniquely identified.
#[test]
fn concurrent_registration_is_not_lost() {
    let logger = Logger::new();

    let ids: Vec<HandlerId> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let logger = &logger;
                scope.spawn(move || {
                    (0..50)
                        .map(|_| logger.subscribe(|_| {}))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(logger.subscriber_count(), 400);
    let mut unique = ids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

/// Verifies dispatch order matches id order under concurrent registration.
#[test]
fn concurrent_registration_keeps_ids_in_dispatch_order() {
    let logger = Logger::new();
    let fired: Arc<Mutex<Vec<HandlerId>>> = Arc::default();

    thread::scope(|scope| {
        for _ in 0..8 {
            let logger = &logger;
            let fired = &fired;
            scope.spawn(move || {
                for _ in 0..50 {
                    let own_id: Arc<OnceLock<HandlerId>> = Arc::new(OnceLock::new());
                    let cell = Arc::clone(&own_id);
                    let sink = Arc::clone(fired);
                    let id = logger.subscribe(move |_| {
                        sink.lock().unwrap().push(*cell.get().unwrap());
                    });
                    own_id.set(id).unwrap();
                }
            });
        }
    });

    logger.log(Severity::Info, "ordered");

    let fired = fired.lock().unwrap();
    assert_eq!(fired.len(), 400);
    assert!(fired.windows(2).all(|pair| pair[0] < pair[1]));
}

/// Verifies logging while another thread churns registrations completes.
#[test]
fn logging_while_registering_does_not_deadlock() {
    let logger = Logger::new();
    let delivered = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&delivered);
    logger.add_level_handler(Severity::Debug, move |_| *sink.lock().unwrap() += 1);

    thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..500 {
                let id = logger.subscribe(|_| {});
                logger.unsubscribe(id);
            }
        });
        scope.spawn(|| {
            for _ in 0..500 {
                logger.log(Severity::Debug, "tick");
            }
        });
    });

    assert_eq!(*delivered.lock().unwrap(), 500);
    assert_eq!(logger.subscriber_count(), 0);
}
