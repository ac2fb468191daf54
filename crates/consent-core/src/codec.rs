//! # Persisted Entry Codec
//!
//! The consent cookie value is compact JSON, percent-encoded with
//! `encodeURIComponent` semantics so it survives `;`, `,` and `"` in
//! cookie headers:
//!
//! ```text
//! %7B%22necessary%22%3Atrue%2C%22analytics%22%3Afalse%2C...%7D
//! ```
//!
//! Decoding is strict. Anything that is not a complete record is an error;
//! the store turns that error into "no consent".

use crate::error::CodecError;
use crate::record::ConsentRecord;

/// Encode a record as a cookie value.
pub fn encode_record(record: &ConsentRecord) -> Result<String, CodecError> {
    let json = serde_json::to_string(record)?;
    Ok(urlencoding::encode(&json).into_owned())
}

/// Decode a cookie value produced by [`encode_record`].
///
/// Plain (unencoded) JSON is accepted too, since percent-decoding leaves it
/// unchanged.
pub fn decode_record(value: &str) -> Result<ConsentRecord, CodecError> {
    let json = urlencoding::decode(value)?;
    Ok(serde_json::from_str(&json)?)
}
