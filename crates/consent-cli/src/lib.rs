//! # consent-cli — Consent Gate Command-Line Interface
//!
//! Operator tooling around the consent store and region policy.
//!
//! ## Subcommands
//!
//! - `region` — classify a country/region and show the geo cookie an edge
//!   layer would set
//! - `payload` — print the `consent_update` signal for a set of choices
//! - `default` — print the deny-by-default `consent_default` signal
//! - `decode` — decode a persisted consent cookie value
//! - `simulate` — run a visit against an in-memory store and print the
//!   resulting signals and cookies
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from handlers; handlers return JSON
//!   values and never print.
//! - Handlers delegate to the domain crates and hold no consent logic.

pub mod config;
pub mod decode;
pub mod payload;
pub mod region;
pub mod simulate;
