//! # Region Subcommand
//!
//! Classifies a visitor location and shows the region-decision cookie.

use clap::Args;
use serde_json::{json, Value};

use consent_core::ConsentConfig;
use consent_geo::classify;
use consent_store::Cookie;

/// Arguments for the region subcommand.
#[derive(Args, Debug)]
pub struct RegionArgs {
    /// ISO 3166-1 alpha-2 country code. Omit to see the missing-data default.
    #[arg(long)]
    pub country: Option<String>,

    /// Subdivision code, bare (`CA`) or ISO 3166-2 (`US-CA`).
    #[arg(long)]
    pub region: Option<String>,
}

pub fn run(args: &RegionArgs, config: &ConsentConfig) -> Value {
    let country = args.country.as_deref();
    let region = args.region.as_deref();
    let decision = classify(country, region);
    let cookie = Cookie::geo_decision(config, country, region);
    tracing::debug!(?country, ?region, regulated = decision.is_regulated(), "region classified");

    json!({
        "country": country,
        "region": region,
        "regulated": decision.is_regulated(),
        "decision": decision,
        "set_cookie": cookie.to_set_cookie_header(),
    })
}
