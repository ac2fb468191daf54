//! # Consent Store
//!
//! The single authority for the visitor's current consent. It reads and
//! writes the persisted record through a [`ConsentStorage`], appends
//! Consent-Mode signals to a [`SignalSink`], and notifies subscribers.
//!
//! ## Write Sequence
//!
//! ```text
//! write(choices)
//!   ├─ record = choices + necessary=true + timestamp=now
//!   ├─ persist        (failure logged, not returned)
//!   ├─ push consent_update(payload(record))
//!   └─ notify subscribers (each isolated)
//! ```
//!
//! ## Failure Semantics
//!
//! No operation returns an error. A stored value that does not decode reads
//! as "no consent". A storage write that fails is logged and the rest of the
//! sequence still runs. In [`ExecutionContext::Server`] every operation is a
//! no-op.
//!
//! ## Concurrency
//!
//! The store is `Send + Sync`. Concurrent writers are not serialized against
//! each other: the last persisted record wins, and each writer's signal and
//! notifications describe its own record.

use std::sync::Arc;

use consent_core::{
    decode_record, Clock, ConsentChoices, ConsentConfig, ConsentRecord, ConsentSignal,
    SignalingPayload, SystemClock,
};
use consent_geo::needs_consent_from_signal;

use crate::channel::{DataLayer, SignalSink};
use crate::context::ExecutionContext;
use crate::cookie::Cookie;
use crate::storage::{ConsentStorage, MemoryCookieJar};
use crate::subscribers::{ConsentCallback, SubscriberRegistry, Subscription};

/// The consent store.
///
/// Construct one per page (or per request on the server) with
/// [`ConsentStore::builder`] and share it by reference or `Arc`.
pub struct ConsentStore {
    config: ConsentConfig,
    context: ExecutionContext,
    storage: Arc<dyn ConsentStorage>,
    signals: Arc<dyn SignalSink>,
    clock: Arc<dyn Clock>,
    subscribers: Arc<SubscriberRegistry>,
}

impl std::fmt::Debug for ConsentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsentStore")
            .field("config", &self.config)
            .field("context", &self.context)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

impl ConsentStore {
    /// Start building a store with `config`.
    pub fn builder(config: ConsentConfig) -> ConsentStoreBuilder {
        ConsentStoreBuilder::new(config)
    }

    /// The resolved configuration.
    pub fn config(&self) -> &ConsentConfig {
        &self.config
    }

    /// The execution context the store was built for.
    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    /// The last-written record, or `None` if there is none or it does not
    /// decode.
    pub fn read(&self) -> Option<ConsentRecord> {
        if !self.context.is_client() {
            return None;
        }
        let cookie = &self.config.consent_cookie_name;
        let raw = self.storage.get(cookie)?;
        match decode_record(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, cookie = %cookie, "discarding malformed consent cookie");
                None
            }
        }
    }

    /// Persist `choices` as the new consent, signal it and notify
    /// subscribers. Returns the record written, or `None` on the server.
    pub fn write(&self, choices: ConsentChoices) -> Option<ConsentRecord> {
        if !self.context.is_client() {
            tracing::debug!("consent write ignored outside client context");
            return None;
        }

        let now = self.clock.now();
        let record = ConsentRecord::new(choices, now.timestamp_millis());
        self.persist(&record, now);

        self.signals
            .push(ConsentSignal::ConsentUpdate(SignalingPayload::from(&record)));

        let report = self.subscribers.notify(&record);
        tracing::info!(
            analytics = record.analytics(),
            marketing = record.marketing(),
            preferences = record.preferences(),
            delivered = report.delivered,
            failed = report.failed,
            "consent updated"
        );
        Some(record)
    }

    /// Grant every optional category.
    pub fn accept_all(&self) -> Option<ConsentRecord> {
        self.write(ConsentChoices::ALL_GRANTED)
    }

    /// Deny every optional category.
    pub fn reject_all(&self) -> Option<ConsentRecord> {
        self.write(ConsentChoices::ALL_DENIED)
    }

    /// Whether the visitor has made any decision.
    pub fn has_consent(&self) -> bool {
        self.read().is_some()
    }

    /// Whether analytics was granted.
    pub fn has_analytics_consent(&self) -> bool {
        self.read().is_some_and(|r| r.analytics())
    }

    /// Whether marketing was granted.
    pub fn has_marketing_consent(&self) -> bool {
        self.read().is_some_and(|r| r.marketing())
    }

    /// Whether preferences was granted.
    pub fn has_preferences_consent(&self) -> bool {
        self.read().is_some_and(|r| r.preferences())
    }

    /// The signaling payload for the current record, if any.
    pub fn current_payload(&self) -> Option<SignalingPayload> {
        self.read().as_ref().map(SignalingPayload::from)
    }

    /// Register `callback` for every future write.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ConsentRecord) + Send + Sync + 'static,
    {
        let callback: Arc<ConsentCallback> = Arc::new(callback);
        let id = self.subscribers.register(callback);
        tracing::debug!(subscription = %id, "consent subscriber added");
        Subscription::new(id, &self.subscribers)
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Append the deny-by-default baseline. Run once, before any
    /// third-party script observes the signaling channel.
    pub fn emit_default_signal(&self) {
        if !self.context.is_client() {
            return;
        }
        self.signals
            .push(ConsentSignal::ConsentDefault(SignalingPayload::deny_all()));
        tracing::debug!("consent default signal emitted");
    }

    /// Whether the edge layer decided this visitor must be asked for
    /// consent. Absent signal means yes.
    pub fn needs_consent(&self) -> bool {
        if !self.context.is_client() {
            return needs_consent_from_signal(None);
        }
        let signal = self.storage.get(&self.config.geo_cookie_name);
        needs_consent_from_signal(signal.as_deref())
    }

    fn persist(&self, record: &ConsentRecord, now: chrono::DateTime<chrono::Utc>) {
        let cookie = match Cookie::consent(&self.config, record, now) {
            Ok(cookie) => cookie,
            Err(e) => {
                tracing::warn!(error = %e, cookie = %self.config.consent_cookie_name, "failed to build consent cookie; not persisted");
                return;
            }
        };
        if let Err(e) = self.storage.set(cookie) {
            tracing::warn!(error = %e, cookie = %self.config.consent_cookie_name, "failed to persist consent");
        }
    }
}

/// Builder for [`ConsentStore`].
///
/// Unset collaborators default to an in-memory cookie jar, an in-memory
/// data layer, the system clock and the client context.
pub struct ConsentStoreBuilder {
    config: ConsentConfig,
    context: ExecutionContext,
    storage: Option<Arc<dyn ConsentStorage>>,
    signals: Option<Arc<dyn SignalSink>>,
    clock: Option<Arc<dyn Clock>>,
}

impl ConsentStoreBuilder {
    fn new(config: ConsentConfig) -> Self {
        Self {
            config,
            context: ExecutionContext::Client,
            storage: None,
            signals: None,
            clock: None,
        }
    }

    /// Persistence medium.
    pub fn storage(mut self, storage: Arc<dyn ConsentStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Signaling channel.
    pub fn signals(mut self, signals: Arc<dyn SignalSink>) -> Self {
        self.signals = Some(signals);
        self
    }

    /// Time source for record timestamps and cookie expiry.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Execution context.
    pub fn context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    pub fn build(self) -> ConsentStore {
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        let storage: Arc<dyn ConsentStorage> = match self.storage {
            Some(storage) => storage,
            None => Arc::new(MemoryCookieJar::with_clock(Arc::clone(&clock))),
        };
        let signals: Arc<dyn SignalSink> = match self.signals {
            Some(signals) => signals,
            None => Arc::new(DataLayer::new()),
        };
        ConsentStore {
            config: self.config,
            context: self.context,
            storage,
            signals,
            clock,
            subscribers: Arc::new(SubscriberRegistry::default()),
        }
    }
}
