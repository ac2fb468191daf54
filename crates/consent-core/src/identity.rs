//! # Identifier Newtypes
//!
//! Validated identifiers that cross the configuration boundary.
//!
//! [`MeasurementId`] is validated at construction and on deserialization,
//! so a bad id in a config file fails at load time rather than producing a
//! broken script URL later.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// -- Validating Deserialize for MeasurementId ---------------------------------

impl<'de> Deserialize<'de> for MeasurementId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// An analytics property measurement id, e.g. `G-ABC123XYZ9`.
///
/// # Validation
///
/// `G-` prefix followed by one or more ASCII alphanumerics. The suffix is
/// upper-cased; the prefix must already be upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MeasurementId(String);

impl MeasurementId {
    /// Validate and normalize a measurement id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidMeasurementId`] if the prefix is
    /// missing or the suffix is empty or non-alphanumeric.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        let suffix = trimmed
            .strip_prefix("G-")
            .ok_or_else(|| ValidationError::InvalidMeasurementId(value.clone()))?;
        if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidMeasurementId(value));
        }
        Ok(Self(format!("G-{}", suffix.to_ascii_uppercase())))
    }

    /// Access the normalized id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for MeasurementId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
