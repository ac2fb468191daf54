//! # consent-store — The Consent Store
//!
//! Owns the visitor's consent: persists it as a cookie, maps it onto the
//! Consent-Mode signaling schema, and notifies observers.
//!
//! ## Components
//!
//! - **Store** (`store.rs`): `ConsentStore` — read, write, accept/reject all,
//!   consent queries, subscribe, default signal.
//! - **Storage** (`storage.rs`, `cookie.rs`): the `ConsentStorage` medium
//!   trait, `Cookie` values and the in-memory `MemoryCookieJar`.
//! - **Channel** (`channel.rs`): the `SignalSink` trait and the in-memory
//!   `DataLayer`.
//! - **Subscribers** (`subscribers.rs`): registration handles and
//!   failure-isolated delivery.
//! - **Gate** (`gate.rs`): consent-gated loading of the analytics script.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use consent_core::ConsentConfig;
//! use consent_store::{ConsentStore, DataLayer};
//!
//! let layer = Arc::new(DataLayer::new());
//! let store = ConsentStore::builder(ConsentConfig::default())
//!     .signals(layer.clone())
//!     .build();
//!
//! store.emit_default_signal();
//! assert!(!store.has_consent());
//! store.accept_all();
//! assert!(store.has_analytics_consent());
//! assert_eq!(layer.len(), 2);
//! ```
//!
//! ## Crate Policy
//!
//! - No public operation returns an error; failures degrade to "no consent".
//! - No ambient singleton. Callers construct and share the store explicitly.

pub mod channel;
pub mod context;
pub mod cookie;
pub mod error;
pub mod gate;
pub mod storage;
pub mod store;
pub mod subscribers;

pub use channel::{DataLayer, SignalSink};
pub use context::ExecutionContext;
pub use cookie::{parse_cookie_header, Cookie, MAX_COOKIE_BYTES};
pub use error::{CookieError, StorageError};
pub use gate::{AnalyticsGate, GateDecision, GTAG_LOADER_URL};
pub use storage::{ConsentStorage, MemoryCookieJar};
pub use store::{ConsentStore, ConsentStoreBuilder};
pub use subscribers::{ConsentCallback, Subscription, SubscriptionId};
