//! # Consent Store Flow Tests
//!
//! End-to-end behavior of the store against the in-memory cookie jar and
//! data layer: persistence, signaling, subscriptions, expiry, and the
//! analytics gate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use parking_lot::Mutex;
use proptest::prelude::*;

use consent_core::{
    ConsentChoices, ConsentConfig, ConsentRecord, ConsentSignal, ConsentState, ManualClock,
    MeasurementId,
};
use consent_store::{AnalyticsGate, ConsentStore, DataLayer, GateDecision, MemoryCookieJar};

struct Harness {
    store: ConsentStore,
    jar: Arc<MemoryCookieJar>,
    layer: Arc<DataLayer>,
    clock: Arc<ManualClock>,
}

fn harness() -> Harness {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
    ));
    let jar = Arc::new(MemoryCookieJar::with_clock(clock.clone()));
    let layer = Arc::new(DataLayer::new());
    let store = ConsentStore::builder(ConsentConfig::default())
        .storage(jar.clone())
        .signals(layer.clone())
        .clock(clock.clone())
        .build();
    Harness {
        store,
        jar,
        layer,
        clock,
    }
}

fn counter(store: &ConsentStore) -> (Arc<AtomicUsize>, consent_store::Subscription) {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_cb = Arc::clone(&hits);
    let sub = store.subscribe(move |_: &ConsentRecord| {
        hits_cb.fetch_add(1, Ordering::SeqCst);
    });
    (hits, sub)
}

// ---------------------------------------------------------------------------
// read after write
// ---------------------------------------------------------------------------

#[test]
fn read_after_write_returns_written_choices() {
    let store = ConsentStore::builder(ConsentConfig::default()).build();
    let choices = ConsentChoices {
        analytics: true,
        marketing: false,
        preferences: true,
    };
    let before = Utc::now().timestamp_millis();
    store.write(choices);
    let record = store.read().unwrap();

    assert!(record.necessary());
    assert_eq!(record.choices(), choices);
    assert!(record.timestamp_millis() >= before);
}

#[test]
fn reject_all_reads_back_all_denied() {
    let h = harness();
    h.store.reject_all();
    let record = h.store.read().unwrap();
    assert!(record.necessary());
    assert!(!record.analytics());
    assert!(!record.marketing());
    assert!(!record.preferences());
    assert_eq!(record.timestamp_millis(), h.clock_now_millis());
}

#[test]
fn each_write_replaces_the_record() {
    let h = harness();
    h.store.accept_all();
    let first = h.store.read().unwrap();
    h.clock.advance(Duration::minutes(5));
    h.store.write(first.choices().with(consent_core::ConsentCategory::Marketing, false));
    let second = h.store.read().unwrap();

    assert!(second.analytics());
    assert!(!second.marketing());
    assert_eq!(
        second.timestamp_millis() - first.timestamp_millis(),
        Duration::minutes(5).num_milliseconds()
    );
}

// ---------------------------------------------------------------------------
// subscriptions
// ---------------------------------------------------------------------------

#[test]
fn subscriber_receives_each_write_once() {
    let h = harness();
    let received = Arc::new(Mutex::new(Vec::new()));
    let received_cb = Arc::clone(&received);
    h.store
        .subscribe(move |r: &ConsentRecord| received_cb.lock().push(*r));

    let written = h.store.accept_all().unwrap();
    assert_eq!(received.lock().as_slice(), &[written]);
}

#[test]
fn unsubscribed_callback_is_not_invoked() {
    let h = harness();
    let (hits, sub) = counter(&h.store);
    let (other_hits, _other) = counter(&h.store);

    h.store.accept_all();
    sub.unsubscribe();
    sub.unsubscribe();
    h.store.reject_all();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(other_hits.load(Ordering::SeqCst), 2);
    assert!(!sub.is_active());
    assert_eq!(h.store.subscriber_count(), 1);
}

#[test]
fn dropping_handle_keeps_subscription() {
    let h = harness();
    let (hits, sub) = counter(&h.store);
    drop(sub);
    h.store.accept_all();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn panicking_subscriber_does_not_block_signal_or_others() {
    let h = harness();
    h.store
        .subscribe(|_: &ConsentRecord| panic!("banner island crashed"));
    let (hits, _sub) = counter(&h.store);

    assert!(h.store.accept_all().is_some());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(h.layer.len(), 1);
    assert!(h.store.has_consent());
}

#[test]
fn subscriber_can_read_store_during_delivery() {
    let h = Arc::new(harness());
    let seen = Arc::new(Mutex::new(None));
    let (h_cb, seen_cb) = (Arc::clone(&h), Arc::clone(&seen));
    h.store.subscribe(move |_: &ConsentRecord| {
        *seen_cb.lock() = Some(h_cb.store.has_marketing_consent());
    });
    h.store.accept_all();
    assert_eq!(*seen.lock(), Some(true));
}

// ---------------------------------------------------------------------------
// signaling
// ---------------------------------------------------------------------------

#[test]
fn default_signal_denies_everything_but_security() {
    let h = harness();
    h.store.emit_default_signal();
    let events = h.layer.events();
    assert_eq!(events.len(), 1);
    let ConsentSignal::ConsentDefault(payload) = events[0] else {
        panic!("expected consent_default, got {:?}", events[0]);
    };
    for (name, state) in payload.channels() {
        let expected = if name == "security_storage" {
            ConsentState::Granted
        } else {
            ConsentState::Denied
        };
        assert_eq!(state, expected, "{name}");
    }
}

#[test]
fn update_signal_projects_mixed_choices() {
    let h = harness();
    h.store.write(ConsentChoices {
        analytics: true,
        marketing: false,
        preferences: true,
    });
    let payload = *h.layer.last().unwrap().payload();
    assert_eq!(payload.analytics_storage, ConsentState::Granted);
    assert_eq!(payload.ad_storage, ConsentState::Denied);
    assert_eq!(payload.functionality_storage, ConsentState::Granted);
    assert_eq!(payload.personalization_storage, ConsentState::Granted);
    assert_eq!(payload.security_storage, ConsentState::Granted);
}

#[test]
fn fresh_visit_accept_all_scenario() {
    let h = harness();
    h.store.emit_default_signal();
    assert!(!h.store.has_consent());

    h.store.accept_all();

    assert!(h.store.has_analytics_consent());
    let updates: Vec<_> = h
        .layer
        .events()
        .into_iter()
        .filter(|e| matches!(e, ConsentSignal::ConsentUpdate(_)))
        .collect();
    assert_eq!(updates.len(), 1);
    assert!(updates[0]
        .payload()
        .channels()
        .iter()
        .all(|(_, state)| state.is_granted()));
}

// ---------------------------------------------------------------------------
// persistence lifetime
// ---------------------------------------------------------------------------

#[test]
fn consent_expires_after_configured_lifetime() {
    let h = harness();
    h.store.accept_all();
    h.clock.advance(Duration::days(364));
    assert!(h.store.has_consent());
    h.clock.advance(Duration::days(1));
    assert!(!h.store.has_consent());
}

#[test]
fn set_cookie_header_is_what_a_server_would_send() {
    let h = harness();
    h.store.reject_all();
    let headers = h.jar.set_cookie_headers();
    assert_eq!(headers.len(), 1);
    assert!(headers[0].starts_with("user_consent=%7B%22necessary%22%3Atrue"));
    assert!(headers[0].contains("; Expires=Mon, 01 Mar 2027 09:30:00 GMT"));
    assert!(headers[0].ends_with("; Path=/; SameSite=Lax"));
}

#[test]
fn cookie_from_request_header_is_readable() {
    let h = harness();
    h.store.accept_all();
    let value = h.jar.cookie("user_consent").unwrap().value;

    let request_jar = Arc::new(MemoryCookieJar::from_cookie_header(&format!(
        "geo-needs-consent=0; user_consent={value}"
    )));
    let store = ConsentStore::builder(ConsentConfig::default())
        .storage(request_jar)
        .build();
    assert!(store.has_marketing_consent());
    assert!(!store.needs_consent());
}

// ---------------------------------------------------------------------------
// analytics gate
// ---------------------------------------------------------------------------

#[test]
fn gate_loads_script_once_on_grant() {
    let h = harness();
    let gate = AnalyticsGate::new(MeasurementId::new("G-FLOW42").unwrap());
    let loads = Arc::new(Mutex::new(Vec::<String>::new()));
    let loads_cb = Arc::clone(&loads);
    let _watch = gate.watch(&h.store, move |src| loads_cb.lock().push(src.to_string()));

    assert_eq!(gate.evaluate(&h.store), GateDecision::Blocked);
    h.store.reject_all();
    assert!(loads.lock().is_empty());

    h.store.accept_all();
    h.store.reject_all();
    h.store.accept_all();
    assert_eq!(
        loads.lock().as_slice(),
        &["https://www.googletagmanager.com/gtag/js?id=G-FLOW42".to_string()]
    );
}

#[test]
fn gate_loads_immediately_when_already_granted() {
    let h = harness();
    h.store.accept_all();
    let gate = AnalyticsGate::new(MeasurementId::new("G-EARLY").unwrap());
    let loads = Arc::new(AtomicUsize::new(0));
    let loads_cb = Arc::clone(&loads);
    let _watch = gate.watch(&h.store, move |_| {
        loads_cb.fetch_add(1, Ordering::SeqCst);
    });
    h.store.accept_all();
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn stored_record_always_necessary(analytics: bool, marketing: bool, preferences: bool) {
        let h = harness();
        let choices = ConsentChoices { analytics, marketing, preferences };
        h.store.write(choices);
        let record = h.store.read().unwrap();
        prop_assert!(record.necessary());
        prop_assert_eq!(record.choices(), choices);
        prop_assert_eq!(h.layer.len(), 1);
    }
}

impl Harness {
    fn clock_now_millis(&self) -> i64 {
        use consent_core::Clock;
        self.clock.now_millis()
    }
}
