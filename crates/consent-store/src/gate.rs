//! # Analytics Script Gate
//!
//! The third-party analytics loader is only injected once the visitor has
//! granted analytics consent. [`AnalyticsGate::evaluate`] answers the
//! question for the current record; [`AnalyticsGate::watch`] answers it on
//! every consent change and fires the loader callback at most once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};

use consent_core::{ConsentConfig, ConsentRecord, MeasurementId};

use crate::store::ConsentStore;
use crate::subscribers::Subscription;

/// Base URL of the analytics loader script.
pub const GTAG_LOADER_URL: &str = "https://www.googletagmanager.com/gtag/js";

/// Whether the loader may be injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Analytics consent is granted; inject the script at `src`.
    Load {
        /// Loader URL.
        src: String,
    },
    /// No analytics consent (or no decision yet).
    Blocked,
}

impl GateDecision {
    pub fn is_load(&self) -> bool {
        matches!(self, Self::Load { .. })
    }
}

/// Consent gate for one analytics property.
#[derive(Debug, Clone)]
pub struct AnalyticsGate {
    measurement_id: MeasurementId,
}

impl AnalyticsGate {
    pub fn new(measurement_id: MeasurementId) -> Self {
        Self { measurement_id }
    }

    /// A gate for the configured property, if one is configured.
    pub fn from_config(config: &ConsentConfig) -> Option<Self> {
        config.measurement_id.clone().map(Self::new)
    }

    pub fn measurement_id(&self) -> &MeasurementId {
        &self.measurement_id
    }

    /// Loader URL for this property.
    pub fn script_src(&self) -> String {
        format!("{GTAG_LOADER_URL}?id={}", self.measurement_id)
    }

    /// The config object the loader is initialized with after injection.
    pub fn bootstrap_config(&self, config: &ConsentConfig) -> Value {
        let mut flags = format!("SameSite={}", config.same_site);
        if config.secure {
            flags.push_str(";Secure");
        }
        json!({
            "measurement_id": self.measurement_id.as_str(),
            "anonymize_ip": true,
            "cookie_flags": flags,
        })
    }

    /// Decision for an explicit record.
    pub fn decide(&self, record: Option<&ConsentRecord>) -> GateDecision {
        match record {
            Some(r) if r.analytics() => GateDecision::Load {
                src: self.script_src(),
            },
            _ => GateDecision::Blocked,
        }
    }

    /// Decision for the store's current record.
    pub fn evaluate(&self, store: &ConsentStore) -> GateDecision {
        self.decide(store.read().as_ref())
    }

    /// Call `on_load` with the loader URL the first time analytics consent
    /// is granted: immediately if it already is, otherwise on the write
    /// that grants it. Later revocation does not unload the script.
    pub fn watch<F>(&self, store: &ConsentStore, on_load: F) -> Subscription
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let loaded = Arc::new(AtomicBool::new(false));
        let src = self.script_src();

        if let GateDecision::Load { src } = self.evaluate(store) {
            loaded.store(true, Ordering::SeqCst);
            tracing::info!(measurement_id = %self.measurement_id, "analytics consent present; loading script");
            on_load(&src);
        }

        let measurement_id = self.measurement_id.clone();
        store.subscribe(move |record: &ConsentRecord| {
            if record.analytics() && !loaded.swap(true, Ordering::SeqCst) {
                tracing::info!(measurement_id = %measurement_id, "analytics consent granted; loading script");
                on_load(&src);
            }
        })
    }
}
