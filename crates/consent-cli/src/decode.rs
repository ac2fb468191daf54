//! # Decode Subcommand
//!
//! Decodes a persisted consent cookie value, either the bare value or a full
//! `Cookie:` request header.

use anyhow::Context;
use clap::Args;
use serde_json::{json, Value};

use consent_core::{decode_record, ConsentConfig, SignalingPayload};
use consent_store::parse_cookie_header;

/// Arguments for the decode subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Percent-encoded cookie value, or a whole request header with `--header`.
    pub value: String,

    /// Treat the input as a `Cookie:` request header and pick out the
    /// configured consent cookie.
    #[arg(long)]
    pub header: bool,
}

pub fn run(args: &DecodeArgs, config: &ConsentConfig) -> anyhow::Result<Value> {
    let raw = if args.header {
        parse_cookie_header(&args.value)
            .into_iter()
            // First pair wins, as in `MemoryCookieJar::from_cookie_header`.
            .find(|(name, _)| name == &config.consent_cookie_name)
            .map(|(_, value)| value)
            .with_context(|| {
                format!("no `{}` cookie in header", config.consent_cookie_name)
            })?
    } else {
        args.value.clone()
    };

    let record = decode_record(&raw).context("decoding consent cookie")?;
    Ok(json!({
        "record": record,
        "recorded_at": record.recorded_at().map(|at| at.to_rfc3339()),
        "signal": SignalingPayload::from(&record),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use consent_core::{encode_record, ConsentChoices, ConsentRecord};
    use consent_store::{ConsentStorage, MemoryCookieJar};

    fn encoded() -> String {
        let record = ConsentRecord::new(ConsentChoices::ALL_GRANTED, 1_772_357_400_000);
        encode_record(&record).unwrap()
    }

    #[test]
    fn decodes_bare_value() {
        let args = DecodeArgs {
            value: encoded(),
            header: false,
        };
        let out = run(&args, &ConsentConfig::default()).unwrap();
        assert_eq!(out["record"]["necessary"], true);
        assert_eq!(out["record"]["marketing"], true);
        assert_eq!(out["recorded_at"], "2026-03-01T09:30:00+00:00");
        assert_eq!(out["signal"]["ad_storage"], "granted");
    }

    #[test]
    fn decodes_from_request_header() {
        let args = DecodeArgs {
            value: format!("geo-needs-consent=1; user_consent={}", encoded()),
            header: true,
        };
        let out = run(&args, &ConsentConfig::default()).unwrap();
        assert_eq!(out["record"]["analytics"], true);
    }

    #[test]
    fn repeated_cookie_name_takes_first_like_the_jar() {
        let header = format!("user_consent={}; user_consent=not-json", encoded());
        let args = DecodeArgs {
            value: header.clone(),
            header: true,
        };
        let out = run(&args, &ConsentConfig::default()).unwrap();
        assert_eq!(out["record"]["analytics"], true);

        let jar = MemoryCookieJar::from_cookie_header(&header);
        assert_eq!(jar.get("user_consent"), Some(encoded()));
    }

    #[test]
    fn header_without_consent_cookie_fails() {
        let args = DecodeArgs {
            value: "geo-needs-consent=1".to_string(),
            header: true,
        };
        let err = run(&args, &ConsentConfig::default()).unwrap_err();
        assert!(err.to_string().contains("user_consent"));
    }

    #[test]
    fn garbage_value_fails() {
        let args = DecodeArgs {
            value: "not-json".to_string(),
            header: false,
        };
        assert!(run(&args, &ConsentConfig::default()).is_err());
    }
}
