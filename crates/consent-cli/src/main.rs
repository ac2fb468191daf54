//! # consentctl
//!
//! Entry point for the consent gate CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use consent_cli::config::load_config;
use consent_cli::decode::DecodeArgs;
use consent_cli::payload::PayloadArgs;
use consent_cli::region::RegionArgs;
use consent_cli::simulate::SimulateArgs;

/// Consent gate tooling: region policy, consent cookies, and signaling.
#[derive(Parser, Debug)]
#[command(name = "consentctl", version, about)]
struct Cli {
    /// YAML configuration file layered over the built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a visitor location and show the region-decision cookie.
    Region(RegionArgs),
    /// Print the consent_update signal for a set of choices.
    Payload(PayloadArgs),
    /// Print the deny-by-default consent_default signal.
    Default,
    /// Decode a persisted consent cookie value.
    Decode(DecodeArgs),
    /// Simulate one visit against an in-memory store.
    Simulate(SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let output = match &cli.command {
        Commands::Region(args) => consent_cli::region::run(args, &config),
        Commands::Payload(args) => consent_cli::payload::run(args)?,
        Commands::Default => consent_cli::payload::run_default()?,
        Commands::Decode(args) => consent_cli::decode::run(args, &config)?,
        Commands::Simulate(args) => {
            serde_json::to_value(consent_cli::simulate::run(args, &config)?)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
