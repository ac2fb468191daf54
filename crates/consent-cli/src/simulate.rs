//! # Simulate Subcommand
//!
//! Replays one page visit against an in-memory cookie jar and data layer:
//! the edge layer sets the region-decision cookie, the page emits the
//! default signal, and the visitor answers the banner (or, outside
//! regulated regions, consent is granted without a banner).

use std::sync::Arc;

use clap::{Args, ValueEnum};
use serde::Serialize;

use consent_core::{
    Clock, ConsentConfig, ConsentRecord, ConsentSignal, ManualClock, SystemClock,
};
use consent_store::{
    AnalyticsGate, ConsentStorage, ConsentStore, Cookie, DataLayer, GateDecision, MemoryCookieJar,
};

/// What the visitor does with the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BannerAction {
    Accept,
    Reject,
    /// Close the page without answering.
    Dismiss,
}

/// Arguments for the simulate subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Visitor country (ISO 3166-1 alpha-2).
    #[arg(long)]
    pub country: Option<String>,

    /// Visitor subdivision.
    #[arg(long)]
    pub region: Option<String>,

    /// Banner answer, used only where consent is required.
    #[arg(long, value_enum, default_value_t = BannerAction::Dismiss)]
    pub action: BannerAction,

    /// Fix the visit time (RFC 3339) instead of using the system clock.
    #[arg(long)]
    pub at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Everything observable after the visit.
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub needs_consent: bool,
    pub record: Option<ConsentRecord>,
    pub signals: Vec<ConsentSignal>,
    pub set_cookie: Vec<String>,
    /// Loader URL when the analytics script would be injected.
    pub analytics_script: Option<String>,
}

pub fn run(args: &SimulateArgs, config: &ConsentConfig) -> anyhow::Result<SimulationReport> {
    let clock: Arc<dyn Clock> = match args.at {
        Some(at) => Arc::new(ManualClock::new(at)),
        None => Arc::new(SystemClock),
    };
    let jar = Arc::new(MemoryCookieJar::with_clock(clock.clone()));
    let layer = Arc::new(DataLayer::new());

    jar.set(Cookie::geo_decision(
        config,
        args.country.as_deref(),
        args.region.as_deref(),
    ))?;

    let store = ConsentStore::builder(config.clone())
        .storage(jar.clone())
        .signals(layer.clone())
        .clock(clock)
        .build();

    store.emit_default_signal();
    let needs_consent = store.needs_consent();
    if needs_consent {
        match args.action {
            BannerAction::Accept => {
                store.accept_all();
            }
            BannerAction::Reject => {
                store.reject_all();
            }
            BannerAction::Dismiss => {}
        }
    } else {
        store.accept_all();
    }
    tracing::info!(needs_consent, action = ?args.action, "visit simulated");

    let analytics_script = AnalyticsGate::from_config(config).and_then(|gate| {
        match gate.evaluate(&store) {
            GateDecision::Load { src } => Some(src),
            GateDecision::Blocked => None,
        }
    });

    Ok(SimulationReport {
        needs_consent,
        record: store.read(),
        signals: layer.events(),
        set_cookie: jar.set_cookie_headers(),
        analytics_script,
    })
}
