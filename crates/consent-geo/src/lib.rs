//! # consent-geo — Region Policy Lookup
//!
//! Decides whether a visitor's location requires consent to be solicited
//! before analytics defaults to "granted".
//!
//! - **Tables** (`tables.rs`): static jurisdiction data, national and
//!   sub-national, plus their union.
//! - **Policy** (`policy.rs`): `classify` / `is_regulated`, a pure total
//!   function over `(country, region)`.
//! - **Signal** (`signal.rs`): the `"1"`/`"0"` value an edge layer hands to
//!   the page, and its privacy-first reader.
//!
//! ## Crate Policy
//!
//! - No I/O and no side effects; every function here is deterministic.
//! - Missing data always resolves toward "consent required".

pub mod policy;
pub mod signal;
pub mod tables;

pub use policy::{classify, is_regulated, RegionDecision};
pub use signal::{geo_signal_value, needs_consent_from_signal, NEEDS_CONSENT, NO_CONSENT_NEEDED};
pub use tables::{
    all_rules, country_level_codes, regulated_countries, RegionRule, CA_PRIVACY_PROVINCES,
    COUNTRY_LEVEL_RULES, EEA_EXTRA_COUNTRIES, EU_COUNTRIES, GDPR_EQUIVALENT_COUNTRIES,
    SUBNATIONAL_RULES, US_PRIVACY_STATES,
};
