//! # Consent Record
//!
//! The persisted unit of consent and the caller-supplied choices it is
//! built from.
//!
//! ## Invariant
//!
//! `necessary` is `true` in every `ConsentRecord` that exists. There is no
//! constructor that takes it as a parameter, and deserialization overwrites
//! whatever the stored document says. A tampered or legacy cookie with
//! `"necessary": false` therefore still decodes to `necessary == true`.
//!
//! Records are never mutated in place: each write produces a full
//! replacement with a fresh timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::ConsentCategory;

/// The visitor's decision for each optional category.
///
/// This is the input to a consent write. It is always fully specified; the
/// store does not merge it with a previous record. Callers that want to
/// change a single category start from [`ConsentChoices::from_record`] and
/// apply [`ConsentChoices::with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ConsentChoices {
    /// Measurement and analytics.
    pub analytics: bool,
    /// Advertising and ad personalization.
    pub marketing: bool,
    /// Functional and personalization preferences.
    pub preferences: bool,
}

impl ConsentChoices {
    /// Every optional category granted.
    pub const ALL_GRANTED: Self = Self {
        analytics: true,
        marketing: true,
        preferences: true,
    };

    /// Every optional category denied.
    pub const ALL_DENIED: Self = Self {
        analytics: false,
        marketing: false,
        preferences: false,
    };

    /// Start from the choices captured in an existing record.
    pub fn from_record(record: &ConsentRecord) -> Self {
        Self {
            analytics: record.analytics,
            marketing: record.marketing,
            preferences: record.preferences,
        }
    }

    /// Return a copy with `category` set to `granted`.
    ///
    /// Setting [`ConsentCategory::Necessary`] has no effect.
    pub fn with(mut self, category: ConsentCategory, granted: bool) -> Self {
        match category {
            ConsentCategory::Necessary => {}
            ConsentCategory::Analytics => self.analytics = granted,
            ConsentCategory::Marketing => self.marketing = granted,
            ConsentCategory::Preferences => self.preferences = granted,
        }
        self
    }
}

/// A complete consent decision as persisted and as delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct ConsentRecord {
    necessary: bool,
    analytics: bool,
    marketing: bool,
    preferences: bool,
    timestamp: i64,
}

impl ConsentRecord {
    /// Build a record from choices, stamped with `timestamp_ms`
    /// (milliseconds since the Unix epoch).
    pub fn new(choices: ConsentChoices, timestamp_ms: i64) -> Self {
        Self {
            necessary: true,
            analytics: choices.analytics,
            marketing: choices.marketing,
            preferences: choices.preferences,
            timestamp: timestamp_ms,
        }
    }

    /// Always `true`.
    pub fn necessary(&self) -> bool {
        self.necessary
    }

    /// Whether analytics was granted.
    pub fn analytics(&self) -> bool {
        self.analytics
    }

    /// Whether marketing was granted.
    pub fn marketing(&self) -> bool {
        self.marketing
    }

    /// Whether preferences was granted.
    pub fn preferences(&self) -> bool {
        self.preferences
    }

    /// Write time in milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp
    }

    /// Write time as a UTC datetime, if the stored millisecond value is in range.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Whether `category` was granted.
    pub fn allows(&self, category: ConsentCategory) -> bool {
        match category {
            ConsentCategory::Necessary => self.necessary,
            ConsentCategory::Analytics => self.analytics,
            ConsentCategory::Marketing => self.marketing,
            ConsentCategory::Preferences => self.preferences,
        }
    }

    /// The optional-category choices this record captures.
    pub fn choices(&self) -> ConsentChoices {
        ConsentChoices::from_record(self)
    }
}

/// Wire shape of a persisted record. `necessary` is accepted and discarded.
#[derive(Deserialize)]
struct StoredRecord {
    #[serde(default, rename = "necessary")]
    _necessary: Option<bool>,
    analytics: bool,
    marketing: bool,
    preferences: bool,
    timestamp: i64,
}

impl From<StoredRecord> for ConsentRecord {
    fn from(raw: StoredRecord) -> Self {
        Self {
            necessary: true,
            analytics: raw.analytics,
            marketing: raw.marketing,
            preferences: raw.preferences,
            timestamp: raw.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_forces_necessary() {
        let record = ConsentRecord::new(ConsentChoices::ALL_DENIED, 1_700_000_000_000);
        assert!(record.necessary());
        assert!(record.allows(ConsentCategory::Necessary));
        assert!(!record.analytics());
        assert_eq!(record.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn deserialize_overrides_stored_necessary_false() {
        let json = r#"{"necessary":false,"analytics":true,"marketing":false,"preferences":true,"timestamp":5}"#;
        let record: ConsentRecord = serde_json::from_str(json).unwrap();
        assert!(record.necessary());
        assert!(record.analytics());
        assert!(!record.marketing());
        assert!(record.preferences());
    }

    #[test]
    fn deserialize_accepts_missing_necessary() {
        let json = r#"{"analytics":false,"marketing":true,"preferences":false,"timestamp":5}"#;
        let record: ConsentRecord = serde_json::from_str(json).unwrap();
        assert!(record.necessary());
        assert!(record.marketing());
    }

    #[test]
    fn deserialize_rejects_missing_category() {
        let json = r#"{"necessary":true,"analytics":true,"timestamp":5}"#;
        assert!(serde_json::from_str::<ConsentRecord>(json).is_err());
    }

    #[test]
    fn serialize_field_order_matches_cookie_shape() {
        let record = ConsentRecord::new(
            ConsentChoices {
                analytics: true,
                marketing: false,
                preferences: true,
            },
            42,
        );
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"necessary":true,"analytics":true,"marketing":false,"preferences":true,"timestamp":42}"#
        );
    }

    #[test]
    fn with_toggles_single_category() {
        let choices = ConsentChoices::ALL_DENIED.with(ConsentCategory::Marketing, true);
        assert_eq!(
            choices,
            ConsentChoices {
                analytics: false,
                marketing: true,
                preferences: false,
            }
        );
    }

    #[test]
    fn with_necessary_is_noop() {
        let choices = ConsentChoices::ALL_GRANTED.with(ConsentCategory::Necessary, false);
        assert_eq!(choices, ConsentChoices::ALL_GRANTED);
    }

    #[test]
    fn recorded_at_converts_millis() {
        let record = ConsentRecord::new(ConsentChoices::ALL_GRANTED, 1_767_225_600_000);
        let dt = record.recorded_at().unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-01-01T00:00:00+00:00");
    }

    #[test]
    fn choices_round_trip_through_record() {
        let choices = ConsentChoices {
            analytics: true,
            marketing: true,
            preferences: false,
        };
        assert_eq!(ConsentRecord::new(choices, 0).choices(), choices);
    }
}
