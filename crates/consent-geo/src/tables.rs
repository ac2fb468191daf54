//! # Jurisdiction Tables
//!
//! Static reference data: which countries regulate storage consent
//! nationally, and which countries regulate it only in some subdivisions.
//!
//! Codes are ISO 3166-1 alpha-2 for countries and the subdivision part of
//! ISO 3166-2 for regions (`"CA"` for California, not `"US-CA"`).
//!
//! These tables are compiled in and never mutated.

use std::collections::BTreeSet;

use serde::Serialize;

/// European Union member states.
pub const EU_COUNTRIES: &[&str] = &[
    "AT", "BE", "BG", "HR", "CY", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IE", "IT",
    "LV", "LT", "LU", "MT", "NL", "PL", "PT", "RO", "SK", "SI", "ES", "SE",
];

/// EEA members outside the EU.
pub const EEA_EXTRA_COUNTRIES: &[&str] = &["IS", "LI", "NO"];

/// Non-EEA countries with GDPR-equivalent consent requirements.
pub const GDPR_EQUIVALENT_COUNTRIES: &[&str] = &["GB", "CH"];

/// US states with comprehensive consumer privacy statutes in scope.
pub const US_PRIVACY_STATES: &[&str] = &["CA", "CO", "CT", "UT", "VA"];

/// Canadian provinces with opt-in consent regimes.
pub const CA_PRIVACY_PROVINCES: &[&str] = &["QC"];

/// A regulated jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionRule {
    /// Every listed country regulates nationally.
    Countries {
        /// Name of the regime, for diagnostics.
        regime: &'static str,
        /// Regulated country codes.
        codes: &'static [&'static str],
    },
    /// Only the listed subdivisions of `country` are regulated.
    Subdivisions {
        /// Name of the regime, for diagnostics.
        regime: &'static str,
        /// Country code.
        country: &'static str,
        /// Regulated subdivision codes.
        regions: &'static [&'static str],
    },
}

impl RegionRule {
    /// The regime name.
    pub fn regime(&self) -> &'static str {
        match self {
            Self::Countries { regime, .. } | Self::Subdivisions { regime, .. } => *regime,
        }
    }

    /// Whether this rule covers `country` / `region`.
    ///
    /// Both inputs must already be normalized (trimmed, upper case, region
    /// without a country prefix).
    pub fn matches(&self, country: &str, region: &str) -> bool {
        match self {
            Self::Countries { codes, .. } => codes.iter().any(|code| *code == country),
            Self::Subdivisions {
                country: rule_country,
                regions,
                ..
            } => *rule_country == country && regions.iter().any(|r| *r == region),
        }
    }

    /// Whether this is a country-level rule.
    pub fn is_country_level(&self) -> bool {
        matches!(self, Self::Countries { .. })
    }
}

/// Country-level rules.
pub const COUNTRY_LEVEL_RULES: &[RegionRule] = &[
    RegionRule::Countries {
        regime: "GDPR (EU)",
        codes: EU_COUNTRIES,
    },
    RegionRule::Countries {
        regime: "GDPR (EEA)",
        codes: EEA_EXTRA_COUNTRIES,
    },
    RegionRule::Countries {
        regime: "UK GDPR / revFADP",
        codes: GDPR_EQUIVALENT_COUNTRIES,
    },
];

/// Sub-national rules.
pub const SUBNATIONAL_RULES: &[RegionRule] = &[
    RegionRule::Subdivisions {
        regime: "US state privacy",
        country: "US",
        regions: US_PRIVACY_STATES,
    },
    RegionRule::Subdivisions {
        regime: "Quebec Law 25",
        country: "CA",
        regions: CA_PRIVACY_PROVINCES,
    },
];

/// Country-level rules followed by sub-national rules.
pub fn all_rules() -> impl Iterator<Item = &'static RegionRule> {
    COUNTRY_LEVEL_RULES.iter().chain(SUBNATIONAL_RULES.iter())
}

/// Every country code regulated nationally.
pub fn country_level_codes() -> BTreeSet<&'static str> {
    COUNTRY_LEVEL_RULES
        .iter()
        .filter_map(|rule| match rule {
            RegionRule::Countries { codes, .. } => Some(codes.iter().copied()),
            RegionRule::Subdivisions { .. } => None,
        })
        .flatten()
        .collect()
}

/// Every country that appears in any rule, national or sub-national.
pub fn regulated_countries() -> BTreeSet<&'static str> {
    let mut countries = country_level_codes();
    countries.extend(SUBNATIONAL_RULES.iter().filter_map(|rule| match rule {
        RegionRule::Subdivisions { country, .. } => Some(*country),
        RegionRule::Countries { .. } => None,
    }));
    countries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eu_has_27_members() {
        assert_eq!(EU_COUNTRIES.len(), 27);
        let unique: BTreeSet<_> = EU_COUNTRIES.iter().collect();
        assert_eq!(unique.len(), 27);
    }

    #[test]
    fn country_tables_do_not_overlap() {
        let total = EU_COUNTRIES.len() + EEA_EXTRA_COUNTRIES.len() + GDPR_EQUIVALENT_COUNTRIES.len();
        assert_eq!(country_level_codes().len(), total);
    }

    #[test]
    fn codes_are_two_letter_upper_case() {
        for rule in all_rules() {
            let codes: Vec<&str> = match rule {
                RegionRule::Countries { codes, .. } => codes.to_vec(),
                RegionRule::Subdivisions {
                    country, regions, ..
                } => {
                    let mut v = vec![*country];
                    v.extend_from_slice(regions);
                    v
                }
            };
            for code in codes {
                assert_eq!(code.len(), 2, "{code} in {}", rule.regime());
                assert!(code.chars().all(|c| c.is_ascii_uppercase()), "{code}");
            }
        }
    }

    #[test]
    fn subnational_countries_are_not_country_level() {
        let national = country_level_codes();
        for rule in SUBNATIONAL_RULES {
            if let RegionRule::Subdivisions { country, .. } = rule {
                assert!(!national.contains(country));
            }
        }
    }

    #[test]
    fn union_contains_both_kinds() {
        let union = regulated_countries();
        assert!(union.contains("DE"));
        assert!(union.contains("US"));
        assert!(union.contains("CA"));
        assert!(!union.contains("JP"));
    }

    #[test]
    fn rule_serializes_with_kind_tag() {
        let json = serde_json::to_value(SUBNATIONAL_RULES[0]).unwrap();
        assert_eq!(json["kind"], "subdivisions");
        assert_eq!(json["country"], "US");
    }
}
