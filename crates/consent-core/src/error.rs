//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the consent workspace. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Decode errors carry the stage that failed (percent-decoding or JSON).
//! - Configuration errors name the offending field.
//! - None of these ever escape the consent store's public read/write
//!   operations; the store degrades to "no consent" and logs instead.

use thiserror::Error;

/// Top-level error type for the consent workspace.
#[derive(Error, Debug)]
pub enum ConsentError {
    /// The persisted consent entry could not be decoded.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A domain identifier failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Error while encoding or decoding the persisted consent entry.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The stored value is not valid percent-encoded UTF-8.
    #[error("cookie value is not valid percent-encoded UTF-8: {0}")]
    PercentDecoding(#[from] std::string::FromUtf8Error),

    /// The decoded value is not a well-formed consent record.
    #[error("cookie value is not a valid consent record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error while loading or validating [`crate::ConsentConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration document is not valid YAML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A cookie name is empty or contains characters forbidden in cookie names.
    #[error("invalid cookie name for {field}: {value:?}")]
    InvalidCookieName {
        /// Configuration field holding the name.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Cookie lifetime must be between one day and
    /// [`crate::MAX_LIFETIME_DAYS`].
    #[error("cookie lifetime must be between 1 and 36500 days, got {0}")]
    InvalidLifetime(i64),

    /// Cookie path must start with `/`.
    #[error("cookie path must start with '/', got {0:?}")]
    InvalidPath(String),

    /// A nested identifier failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Validation errors for domain identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Analytics measurement id is not of the form `G-XXXXXXX`.
    #[error("invalid measurement id {0:?}: expected 'G-' followed by alphanumerics")]
    InvalidMeasurementId(String),

    /// Consent category name not recognized.
    #[error("unknown consent category: {0:?}")]
    UnknownCategory(String),
}
