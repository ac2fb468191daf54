//! # consent-core — Foundational Types for Consent Gating
//!
//! This crate defines the data model shared by the consent store, the
//! region policy lookup, and the CLI. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`necessary` cannot be unset.** `ConsentRecord` has no constructor
//!    taking it, and decoding a stored record forces it to `true`.
//!
//! 2. **Single `ConsentCategory` enum.** Exhaustive matches everywhere, so a
//!    new category forces the signaling projection to handle it.
//!
//! 3. **Signals are derived, never stored.** `SignalingPayload` is a pure
//!    projection of a record; `ConsentSignal` is the only event shape that
//!    reaches the signaling channel.
//!
//! 4. **Layered configuration.** `ConsentConfigOverlay` layers over
//!    `ConsentConfig::default()` with explicit precedence instead of
//!    ad-hoc merging.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `consent-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod category;
pub mod codec;
pub mod config;
pub mod error;
pub mod identity;
pub mod record;
pub mod signal;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use category::ConsentCategory;
pub use codec::{decode_record, encode_record};
pub use config::{
    ConsentConfig, ConsentConfigOverlay, SameSite, DEFAULT_CONSENT_COOKIE, DEFAULT_GEO_COOKIE,
    DEFAULT_LIFETIME_DAYS, MAX_LIFETIME_DAYS,
};
pub use error::{CodecError, ConfigError, ConsentError, ValidationError};
pub use identity::MeasurementId;
pub use record::{ConsentChoices, ConsentRecord};
pub use signal::{ConsentSignal, ConsentState, SignalingPayload};
pub use temporal::{Clock, ManualClock, SystemClock};
