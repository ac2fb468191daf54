//! # Execution Context
//!
//! Consent lives on the client. When the same code runs during server-side
//! rendering there is no visitor to ask, so every store operation becomes a
//! no-op that reports "no consent".

use serde::{Deserialize, Serialize};

/// Where the store is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionContext {
    /// A visitor's page: reads, writes and signals take effect.
    #[default]
    Client,
    /// Server-side rendering: every operation is a no-op.
    Server,
}

impl ExecutionContext {
    /// Whether consent operations take effect.
    pub fn is_client(&self) -> bool {
        matches!(self, Self::Client)
    }
}

impl std::fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => f.write_str("client"),
            Self::Server => f.write_str("server"),
        }
    }
}
