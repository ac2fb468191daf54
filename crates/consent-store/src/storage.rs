//! # Persistence Medium
//!
//! The consent store reads and writes named cookie slots through the
//! [`ConsentStorage`] trait. Production bindings wrap the host's cookie
//! API; [`MemoryCookieJar`] is the in-process implementation used by
//! server-side rendering, the CLI simulator, and tests.
//!
//! Expired cookies read as absent, which is how a consent decision reaches
//! its natural end of life.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use consent_core::{Clock, SystemClock};

use crate::cookie::{parse_cookie_header, Cookie, MAX_COOKIE_BYTES};
use crate::error::StorageError;

/// A named-slot persistence medium.
pub trait ConsentStorage: Send + Sync {
    /// Current value of the cookie `name`, if present and unexpired.
    fn get(&self, name: &str) -> Option<String>;

    /// Write `cookie`, replacing any cookie with the same name.
    fn set(&self, cookie: Cookie) -> Result<(), StorageError>;

    /// Delete the cookie `name`. Missing cookies are ignored.
    fn remove(&self, name: &str);
}

/// Thread-safe in-memory cookie jar.
pub struct MemoryCookieJar {
    cookies: RwLock<HashMap<String, Cookie>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for MemoryCookieJar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCookieJar")
            .field("cookies", &self.cookies.read().len())
            .finish()
    }
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCookieJar {
    /// An empty jar on wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// An empty jar that evaluates expiry against `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            cookies: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// A jar seeded from a `Cookie:` request header, on wall-clock time.
    pub fn from_cookie_header(header: &str) -> Self {
        Self::from_cookie_header_with_clock(header, Arc::new(SystemClock))
    }

    /// A jar seeded from a `Cookie:` request header that evaluates expiry
    /// against `clock`. Seeded entries are session cookies. When a name
    /// repeats, the first pair wins, matching browsers' most-specific-first
    /// ordering.
    pub fn from_cookie_header_with_clock(header: &str, clock: Arc<dyn Clock>) -> Self {
        let jar = Self::with_clock(clock);
        {
            let mut cookies = jar.cookies.write();
            for (name, value) in parse_cookie_header(header) {
                cookies
                    .entry(name.clone())
                    .or_insert_with(|| Cookie::new(name, value));
            }
        }
        jar
    }

    /// `Set-Cookie` header values for every unexpired cookie, sorted by name.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        let now = self.clock.now();
        let cookies = self.cookies.read();
        let mut live: Vec<&Cookie> = cookies.values().filter(|c| !c.is_expired(now)).collect();
        live.sort_by(|a, b| a.name.cmp(&b.name));
        live.iter().map(|c| c.to_set_cookie_header()).collect()
    }

    /// The full cookie, attributes included, if present and unexpired.
    pub fn cookie(&self, name: &str) -> Option<Cookie> {
        let now = self.clock.now();
        self.cookies
            .read()
            .get(name)
            .filter(|c| !c.is_expired(now))
            .cloned()
    }

    /// Number of stored cookies, expired ones included.
    pub fn len(&self) -> usize {
        self.cookies.read().len()
    }

    /// Whether the jar holds no cookies at all.
    pub fn is_empty(&self) -> bool {
        self.cookies.read().is_empty()
    }
}

impl ConsentStorage for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookie(name).map(|c| c.value)
    }

    fn set(&self, cookie: Cookie) -> Result<(), StorageError> {
        let size = cookie.pair_len();
        if size > MAX_COOKIE_BYTES {
            return Err(StorageError::TooLarge {
                name: cookie.name,
                size,
                limit: MAX_COOKIE_BYTES,
            });
        }
        self.cookies.write().insert(cookie.name.clone(), cookie);
        Ok(())
    }

    fn remove(&self, name: &str) {
        self.cookies.write().remove(name);
    }
}
