//! Configuration loading for every subcommand.

use std::path::Path;

use anyhow::Context;

use consent_core::ConsentConfig;

/// Resolve the configuration: the YAML file at `path` over the defaults, or
/// the defaults alone.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ConsentConfig> {
    match path {
        Some(path) => {
            let config = ConsentConfig::from_yaml_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?;
            tracing::debug!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(ConsentConfig::default()),
    }
}
