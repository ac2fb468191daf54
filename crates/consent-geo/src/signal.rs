//! # Region-Decision Signal
//!
//! An edge layer classifies the request location once and hands the result
//! to the page as a one-character cookie value. Reading it back is
//! privacy-first: only the explicit "no" sentinel turns consent off.

use crate::policy::is_regulated;

/// Signal value meaning "consent must be solicited".
pub const NEEDS_CONSENT: &str = "1";

/// Signal value meaning "no consent regime applies".
pub const NO_CONSENT_NEEDED: &str = "0";

/// Interpret the region-decision signal.
///
/// Absent ⇒ `true`; exactly [`NO_CONSENT_NEEDED`] ⇒ `false`; anything else
/// (including `"1"`, `""`, `" 0"`, `"false"`) ⇒ `true`.
pub fn needs_consent_from_signal(signal: Option<&str>) -> bool {
    signal != Some(NO_CONSENT_NEEDED)
}

/// The signal value an edge layer writes for a location.
pub fn geo_signal_value(country: Option<&str>, region: Option<&str>) -> &'static str {
    if is_regulated(country, region) {
        NEEDS_CONSENT
    } else {
        NO_CONSENT_NEEDED
    }
}
