//! # Record and Codec Invariants
//!
//! Property tests over the persisted record shape, plus configuration
//! loading from a real file on disk.

use consent_core::{
    decode_record, encode_record, ConsentCategory, ConsentChoices, ConsentConfig, ConsentRecord,
    ConsentState, SignalingPayload,
};
use proptest::prelude::*;
use std::io::Write;

fn choices() -> impl Strategy<Value = ConsentChoices> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(analytics, marketing, preferences)| {
        ConsentChoices {
            analytics,
            marketing,
            preferences,
        }
    })
}

proptest! {
    /// Whatever the choices, the record carries `necessary == true`.
    #[test]
    fn necessary_always_true(c in choices(), ts in 0i64..4_102_444_800_000) {
        let record = ConsentRecord::new(c, ts);
        prop_assert!(record.necessary());
        let decoded = decode_record(&encode_record(&record).unwrap()).unwrap();
        prop_assert!(decoded.necessary());
    }

    /// A stored document claiming `necessary: false` still decodes to true.
    #[test]
    fn tampered_necessary_is_overridden(c in choices(), ts in 0i64..4_102_444_800_000) {
        let json = format!(
            r#"{{"necessary":false,"analytics":{},"marketing":{},"preferences":{},"timestamp":{}}}"#,
            c.analytics, c.marketing, c.preferences, ts
        );
        let decoded = decode_record(&urlencoding::encode(&json)).unwrap();
        prop_assert!(decoded.necessary());
        prop_assert_eq!(decoded.choices(), c);
    }

    /// Every channel in the payload agrees with the category that feeds it.
    #[test]
    fn payload_tracks_categories(c in choices()) {
        let record = ConsentRecord::new(c, 0);
        let payload = SignalingPayload::from(&record);
        let state = |cat| ConsentState::from_granted(record.allows(cat));
        prop_assert_eq!(payload.ad_storage, state(ConsentCategory::Marketing));
        prop_assert_eq!(payload.ad_user_data, state(ConsentCategory::Marketing));
        prop_assert_eq!(payload.ad_personalization, state(ConsentCategory::Marketing));
        prop_assert_eq!(payload.analytics_storage, state(ConsentCategory::Analytics));
        prop_assert_eq!(payload.functionality_storage, state(ConsentCategory::Preferences));
        prop_assert_eq!(payload.personalization_storage, state(ConsentCategory::Preferences));
        prop_assert_eq!(payload.security_storage, ConsentState::Granted);
    }
}

#[test]
fn config_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "consent_cookie_name: cg_consent").unwrap();
    writeln!(file, "secure: true").unwrap();
    writeln!(file, "same_site: none").unwrap();

    let config = ConsentConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.consent_cookie_name, "cg_consent");
    assert!(config.secure);
    assert_eq!(config.same_site, consent_core::SameSite::None);
    assert_eq!(config.lifetime_days, 365);
}

#[test]
fn config_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConsentConfig::from_yaml_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, consent_core::ConfigError::Io(_)));
}
