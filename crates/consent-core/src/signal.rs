//! # Consent-Mode Signaling
//!
//! Projects a [`ConsentRecord`] onto the advertising platform's Consent-Mode
//! channel schema and defines the two event shapes appended to the
//! signaling channel.
//!
//! ## Projection
//!
//! ```text
//! marketing   ─▶ ad_storage, ad_user_data, ad_personalization
//! analytics   ─▶ analytics_storage
//! preferences ─▶ functionality_storage, personalization_storage
//! (constant)  ─▶ security_storage = granted
//! ```
//!
//! ## Wire Format
//!
//! ```json
//! {"event":"consent_update","consent":{"ad_storage":"denied", ...}}
//! ```

use serde::{Deserialize, Serialize};

use crate::record::{ConsentChoices, ConsentRecord};

/// Value of a single signaling channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentState {
    /// Storage of this kind is permitted.
    Granted,
    /// Storage of this kind is not permitted.
    Denied,
}

impl ConsentState {
    /// `Granted` for `true`, `Denied` for `false`.
    pub fn from_granted(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Denied
        }
    }

    /// Whether this is `Granted`.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// The lowercase wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

impl std::fmt::Display for ConsentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The Consent-Mode channel map carried by every signal.
///
/// Always derived from a record (or the deny-all baseline); never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalingPayload {
    pub ad_storage: ConsentState,
    pub ad_user_data: ConsentState,
    pub ad_personalization: ConsentState,
    pub analytics_storage: ConsentState,
    pub functionality_storage: ConsentState,
    pub personalization_storage: ConsentState,
    pub security_storage: ConsentState,
}

impl SignalingPayload {
    /// Project optional-category choices onto the channel map.
    pub fn from_choices(choices: ConsentChoices) -> Self {
        let marketing = ConsentState::from_granted(choices.marketing);
        let analytics = ConsentState::from_granted(choices.analytics);
        let preferences = ConsentState::from_granted(choices.preferences);
        Self {
            ad_storage: marketing,
            ad_user_data: marketing,
            ad_personalization: marketing,
            analytics_storage: analytics,
            functionality_storage: preferences,
            personalization_storage: preferences,
            security_storage: ConsentState::Granted,
        }
    }

    /// Every channel denied except `security_storage`.
    pub fn deny_all() -> Self {
        Self::from_choices(ConsentChoices::ALL_DENIED)
    }

    /// `(channel name, state)` pairs in wire order.
    pub fn channels(&self) -> [(&'static str, ConsentState); 7] {
        [
            ("ad_storage", self.ad_storage),
            ("ad_user_data", self.ad_user_data),
            ("ad_personalization", self.ad_personalization),
            ("analytics_storage", self.analytics_storage),
            ("functionality_storage", self.functionality_storage),
            ("personalization_storage", self.personalization_storage),
            ("security_storage", self.security_storage),
        ]
    }
}

impl From<&ConsentRecord> for SignalingPayload {
    fn from(record: &ConsentRecord) -> Self {
        Self::from_choices(record.choices())
    }
}

/// An event appended to the signaling channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "consent", rename_all = "snake_case")]
pub enum ConsentSignal {
    /// Deny-by-default baseline, emitted before any third-party script runs.
    ConsentDefault(SignalingPayload),
    /// Emitted after every consent write.
    ConsentUpdate(SignalingPayload),
}

impl ConsentSignal {
    /// The event name as it appears on the wire.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::ConsentDefault(_) => "consent_default",
            Self::ConsentUpdate(_) => "consent_update",
        }
    }

    /// The channel map carried by this event.
    pub fn payload(&self) -> &SignalingPayload {
        match self {
            Self::ConsentDefault(payload) | Self::ConsentUpdate(payload) => payload,
        }
    }
}
