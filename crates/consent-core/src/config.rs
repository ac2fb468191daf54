//! # Layered Configuration
//!
//! [`ConsentConfig`] holds the resolved settings. [`ConsentConfigOverlay`]
//! holds the same fields as `Option`s and is what configuration files and
//! callers supply. Resolution is a fixed precedence:
//!
//! ```text
//! overlay (caller / file)  >  ConsentConfig::default()
//! ```
//!
//! Overlays compose: `base.with_overlay(&a).with_overlay(&b)` lets `b` win
//! over `a` field by field.
//!
//! ## YAML
//!
//! ```yaml
//! consent_cookie_name: user_consent
//! lifetime_days: 365
//! cookie_path: /
//! same_site: lax
//! secure: false
//! geo_cookie_name: geo-needs-consent
//! measurement_id: G-ABC123
//! ```
//!
//! Every key is optional.

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::identity::MeasurementId;

/// Default name of the persisted consent cookie.
pub const DEFAULT_CONSENT_COOKIE: &str = "user_consent";

/// Default name of the cookie the edge layer writes with the region decision.
pub const DEFAULT_GEO_COOKIE: &str = "geo-needs-consent";

/// Default consent lifetime.
pub const DEFAULT_LIFETIME_DAYS: i64 = 365;

/// Longest accepted consent lifetime (one hundred years).
pub const MAX_LIFETIME_DAYS: i64 = 36_500;

/// `SameSite` attribute for written cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl std::fmt::Display for SameSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        };
        f.write_str(s)
    }
}

/// Resolved consent settings.
///
/// Deserializing goes through [`ConsentConfigOverlay`] and
/// [`ConsentConfig::validate`], so missing keys take their defaults and an
/// invalid document is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConsentConfigOverlay")]
pub struct ConsentConfig {
    /// Name of the persisted consent cookie.
    pub consent_cookie_name: String,
    /// Days the consent cookie lives after each write.
    pub lifetime_days: i64,
    /// `Path` attribute for written cookies.
    pub cookie_path: String,
    /// `SameSite` attribute for written cookies.
    pub same_site: SameSite,
    /// Whether to set the `Secure` attribute.
    pub secure: bool,
    /// Name of the region-decision cookie.
    pub geo_cookie_name: String,
    /// Analytics property to load once analytics consent is granted.
    pub measurement_id: Option<MeasurementId>,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            consent_cookie_name: DEFAULT_CONSENT_COOKIE.to_string(),
            lifetime_days: DEFAULT_LIFETIME_DAYS,
            cookie_path: "/".to_string(),
            same_site: SameSite::Lax,
            secure: false,
            geo_cookie_name: DEFAULT_GEO_COOKIE.to_string(),
            measurement_id: None,
        }
    }
}

/// Partial settings. `None` means "inherit from the layer below".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsentConfigOverlay {
    pub consent_cookie_name: Option<String>,
    pub lifetime_days: Option<i64>,
    pub cookie_path: Option<String>,
    pub same_site: Option<SameSite>,
    pub secure: Option<bool>,
    pub geo_cookie_name: Option<String>,
    pub measurement_id: Option<MeasurementId>,
}

impl ConsentConfig {
    /// Apply `overlay` on top of `self`. Fields set in the overlay win.
    pub fn with_overlay(mut self, overlay: &ConsentConfigOverlay) -> Self {
        if let Some(name) = &overlay.consent_cookie_name {
            self.consent_cookie_name = name.clone();
        }
        if let Some(days) = overlay.lifetime_days {
            self.lifetime_days = days;
        }
        if let Some(path) = &overlay.cookie_path {
            self.cookie_path = path.clone();
        }
        if let Some(same_site) = overlay.same_site {
            self.same_site = same_site;
        }
        if let Some(secure) = overlay.secure {
            self.secure = secure;
        }
        if let Some(name) = &overlay.geo_cookie_name {
            self.geo_cookie_name = name.clone();
        }
        if let Some(id) = &overlay.measurement_id {
            self.measurement_id = Some(id.clone());
        }
        self
    }

    /// Parse a YAML overlay, apply it to the defaults and validate.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let overlay: ConsentConfigOverlay = if yaml.trim().is_empty() {
            ConsentConfigOverlay::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        Self::try_from(overlay)
    }

    /// Read and resolve a YAML configuration file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Check cookie names, lifetime and path.
    ///
    /// `SameSite=None` without `Secure` is accepted; browsers drop such
    /// cookies, which is the caller's deployment concern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_cookie_name("consent_cookie_name", &self.consent_cookie_name)?;
        validate_cookie_name("geo_cookie_name", &self.geo_cookie_name)?;
        if !(1..=MAX_LIFETIME_DAYS).contains(&self.lifetime_days) {
            return Err(ConfigError::InvalidLifetime(self.lifetime_days));
        }
        if !self.cookie_path.starts_with('/') {
            return Err(ConfigError::InvalidPath(self.cookie_path.clone()));
        }
        Ok(())
    }

    /// Consent cookie lifetime as a duration, or `None` when
    /// `lifetime_days` is beyond what a duration can hold.
    pub fn lifetime(&self) -> Option<Duration> {
        Duration::try_days(self.lifetime_days)
    }
}

impl TryFrom<ConsentConfigOverlay> for ConsentConfig {
    type Error = ConfigError;

    fn try_from(overlay: ConsentConfigOverlay) -> Result<Self, Self::Error> {
        let config = Self::default().with_overlay(&overlay);
        config.validate()?;
        Ok(config)
    }
}

/// RFC 6265 token check, restricted to printable ASCII without separators.
fn validate_cookie_name(field: &'static str, value: &str) -> Result<(), ConfigError> {
    const SEPARATORS: &[char] = &[
        '(', ')', '<', '>', '@', ',', ';', ':', '\\', '"', '/', '[', ']', '?', '=', '{', '}',
    ];
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_graphic() && !SEPARATORS.contains(&c));
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidCookieName {
            field,
            value: value.to_string(),
        })
    }
}
