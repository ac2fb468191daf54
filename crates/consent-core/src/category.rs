//! # Consent Category — Single Source of Truth
//!
//! Defines the `ConsentCategory` enum with the four consent categories a
//! visitor can be asked about. Every `match` on `ConsentCategory` is
//! exhaustive, so adding a category forces every consumer (signaling
//! projection, record accessors, CLI parsing) to handle it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// The consent categories tracked by a [`crate::ConsentRecord`].
///
/// | Category | Optional | Feeds signaling channels |
/// |----------|----------|--------------------------|
/// | Necessary | no | `security_storage` (always granted) |
/// | Analytics | yes | `analytics_storage` |
/// | Marketing | yes | `ad_storage`, `ad_user_data`, `ad_personalization` |
/// | Preferences | yes | `functionality_storage`, `personalization_storage` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentCategory {
    /// Strictly necessary storage. Cannot be declined.
    Necessary,
    /// Measurement and analytics.
    Analytics,
    /// Advertising, ad measurement and ad personalization.
    Marketing,
    /// Functional and personalization preferences.
    Preferences,
}

impl ConsentCategory {
    /// All categories in canonical order.
    pub fn all() -> &'static [ConsentCategory] {
        &[
            Self::Necessary,
            Self::Analytics,
            Self::Marketing,
            Self::Preferences,
        ]
    }

    /// The categories a visitor can grant or deny.
    pub fn optional() -> &'static [ConsentCategory] {
        &[Self::Analytics, Self::Marketing, Self::Preferences]
    }

    /// Whether the visitor may decline this category.
    pub fn is_optional(&self) -> bool {
        !matches!(self, Self::Necessary)
    }

    /// The snake_case name used in the persisted record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Necessary => "necessary",
            Self::Analytics => "analytics",
            Self::Marketing => "marketing",
            Self::Preferences => "preferences",
        }
    }
}

impl std::fmt::Display for ConsentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsentCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "necessary" => Ok(Self::Necessary),
            "analytics" => Ok(Self::Analytics),
            "marketing" => Ok(Self::Marketing),
            "preferences" => Ok(Self::Preferences),
            _ => Err(ValidationError::UnknownCategory(s.to_string())),
        }
    }
}
