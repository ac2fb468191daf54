//! # Region Classification
//!
//! Classifies a `(country, region)` pair as regulated or not. The function
//! is total and privacy-first: when the country is unknown the answer is
//! "regulated", so consent is asked for rather than assumed.
//!
//! ## Decision Order
//!
//! ```text
//! country absent or blank      ─▶ regulated (MissingCountry)
//! country in a national rule   ─▶ regulated (CountryLevel)
//! (country, region) in a
//!   sub-national rule          ─▶ regulated (Subnational)
//! otherwise                    ─▶ not regulated
//! ```
//!
//! Inputs are trimmed and upper-cased. A region given in full ISO 3166-2
//! form (`"US-CA"`) is reduced to its subdivision part when the prefix
//! matches the country. An absent region is treated as `""`.

use serde::Serialize;

use crate::tables::{all_rules, RegionRule};

/// Why a location was classified the way it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "rule", rename_all = "snake_case")]
pub enum RegionDecision {
    /// No country was supplied; consent is required.
    MissingCountry,
    /// The country regulates nationally.
    CountryLevel(&'static RegionRule),
    /// The country regulates in this subdivision.
    Subnational(&'static RegionRule),
    /// No rule applies.
    Unregulated,
}

impl RegionDecision {
    /// Whether consent must be solicited.
    pub fn is_regulated(&self) -> bool {
        !matches!(self, Self::Unregulated)
    }

    /// The matching rule, if any.
    pub fn rule(&self) -> Option<&'static RegionRule> {
        match self {
            Self::CountryLevel(rule) | Self::Subnational(rule) => Some(*rule),
            Self::MissingCountry | Self::Unregulated => None,
        }
    }
}

/// Classify a location against the jurisdiction tables.
pub fn classify(country: Option<&str>, region: Option<&str>) -> RegionDecision {
    let country = match country.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => c.to_ascii_uppercase(),
        None => return RegionDecision::MissingCountry,
    };
    let region = normalize_region(&country, region.unwrap_or(""));

    for rule in all_rules() {
        if rule.matches(&country, &region) {
            return if rule.is_country_level() {
                RegionDecision::CountryLevel(rule)
            } else {
                RegionDecision::Subnational(rule)
            };
        }
    }
    RegionDecision::Unregulated
}

/// Whether consent must be solicited before analytics may run.
pub fn is_regulated(country: Option<&str>, region: Option<&str>) -> bool {
    classify(country, region).is_regulated()
}

fn normalize_region(country: &str, region: &str) -> String {
    let region = region.trim().to_ascii_uppercase();
    let subdivision = region
        .strip_prefix(country)
        .and_then(|r| r.strip_prefix('-'))
        .map(str::to_string);
    subdivision.unwrap_or(region)
}
