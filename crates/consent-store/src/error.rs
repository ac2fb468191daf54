//! # Storage Errors
//!
//! Failures of the persistence medium. The store treats every one of these
//! as fire-and-forget: it logs and carries on with signaling and
//! notification, because consent that could not be persisted is still the
//! visitor's current decision for this page.

use thiserror::Error;

use consent_core::CodecError;

/// Error returned by a [`crate::ConsentStorage`] write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The medium is not available (no document, storage disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The serialized cookie exceeds the per-cookie size limit.
    #[error("cookie {name} is {size} bytes, limit is {limit}")]
    TooLarge {
        /// Cookie name.
        name: String,
        /// Serialized `name=value` size in bytes.
        size: usize,
        /// Size limit in bytes.
        limit: usize,
    },
}

/// Error building the persisted consent cookie.
#[derive(Error, Debug)]
pub enum CookieError {
    /// The record could not be encoded as a cookie value.
    #[error(transparent)]
    Encode(#[from] CodecError),

    /// `now + lifetime` is not a representable timestamp.
    #[error("consent cookie expiry out of range for a {lifetime_days}-day lifetime")]
    ExpiryOutOfRange {
        /// Configured lifetime.
        lifetime_days: i64,
    },
}
