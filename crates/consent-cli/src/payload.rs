//! # Payload and Default Subcommands
//!
//! Print the signals the store would append for a given decision, without
//! touching any storage.

use clap::Args;
use serde_json::Value;

use consent_core::{ConsentChoices, ConsentSignal, SignalingPayload};

/// Arguments for the payload subcommand.
#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// Grant analytics.
    #[arg(long)]
    pub analytics: bool,

    /// Grant marketing.
    #[arg(long)]
    pub marketing: bool,

    /// Grant preferences.
    #[arg(long)]
    pub preferences: bool,

    /// Grant every optional category (overrides the individual flags).
    #[arg(long, conflicts_with_all = ["analytics", "marketing", "preferences"])]
    pub all: bool,
}

impl PayloadArgs {
    pub fn choices(&self) -> ConsentChoices {
        if self.all {
            ConsentChoices::ALL_GRANTED
        } else {
            ConsentChoices {
                analytics: self.analytics,
                marketing: self.marketing,
                preferences: self.preferences,
            }
        }
    }
}

/// The `consent_update` signal for the given choices.
pub fn run(args: &PayloadArgs) -> anyhow::Result<Value> {
    let signal = ConsentSignal::ConsentUpdate(SignalingPayload::from_choices(args.choices()));
    Ok(serde_json::to_value(signal)?)
}

/// The `consent_default` baseline signal.
pub fn run_default() -> anyhow::Result<Value> {
    let signal = ConsentSignal::ConsentDefault(SignalingPayload::deny_all());
    Ok(serde_json::to_value(signal)?)
}
