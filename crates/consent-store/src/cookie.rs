//! # Cookies
//!
//! The value type written to a [`crate::ConsentStorage`], its `Set-Cookie`
//! rendering, and `Cookie:` header parsing for server-side reads.

use chrono::{DateTime, Utc};

use consent_core::{encode_record, ConsentConfig, ConsentRecord, SameSite};
use consent_geo::geo_signal_value;

use crate::error::CookieError;

/// Largest `name=value` pair browsers are required to store.
pub const MAX_COOKIE_BYTES: usize = 4096;

/// A cookie and the attributes it is written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// `None` for a session cookie.
    pub expires: Option<DateTime<Utc>>,
    pub path: String,
    pub same_site: SameSite,
    pub secure: bool,
}

impl Cookie {
    /// A session cookie with default attributes (`Path=/`, `SameSite=Lax`).
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: None,
            path: "/".to_string(),
            same_site: SameSite::Lax,
            secure: false,
        }
    }

    /// The persisted consent entry for `record`, expiring one configured
    /// lifetime after `now`.
    pub fn consent(
        config: &ConsentConfig,
        record: &ConsentRecord,
        now: DateTime<Utc>,
    ) -> Result<Self, CookieError> {
        let expires = config
            .lifetime()
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(CookieError::ExpiryOutOfRange {
                lifetime_days: config.lifetime_days,
            })?;
        Ok(Self {
            name: config.consent_cookie_name.clone(),
            value: encode_record(record)?,
            expires: Some(expires),
            path: config.cookie_path.clone(),
            same_site: config.same_site,
            secure: config.secure,
        })
    }

    /// The region-decision session cookie an edge layer would write for a
    /// visitor located at `country` / `region`.
    pub fn geo_decision(config: &ConsentConfig, country: Option<&str>, region: Option<&str>) -> Self {
        Self {
            name: config.geo_cookie_name.clone(),
            value: geo_signal_value(country, region).to_string(),
            expires: None,
            path: config.cookie_path.clone(),
            same_site: config.same_site,
            secure: config.secure,
        }
    }

    /// Whether the cookie has expired at `now`. Session cookies never do.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }

    /// Size of the `name=value` pair, the part browsers limit.
    pub fn pair_len(&self) -> usize {
        self.name.len() + 1 + self.value.len()
    }

    /// Render as a `Set-Cookie` header value.
    pub fn to_set_cookie_header(&self) -> String {
        let mut header = format!("{}={}", self.name, self.value);
        if let Some(expires) = self.expires {
            header.push_str("; Expires=");
            header.push_str(&expires.format("%a, %d %b %Y %H:%M:%S GMT").to_string());
        }
        header.push_str("; Path=");
        header.push_str(&self.path);
        header.push_str("; SameSite=");
        header.push_str(&self.same_site.to_string());
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }
}

/// Split a `Cookie:` request header into `(name, value)` pairs.
///
/// Pairs without `=` are skipped. Values are returned verbatim (still
/// percent-encoded where the writer encoded them).
pub fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}
