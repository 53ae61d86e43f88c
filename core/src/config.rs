//! Board configuration, read from a TOML file.

use boardroom_protocol::CompanyContext;
use boardroom_protocol::Role;
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::truncation::HISTORY_TOKEN_LIMIT;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_MAX_DRAIN_STEPS: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse board config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Routing policy for the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Failed deliveries retried before a message is blocked.
    pub max_retries: u32,
    /// Drain the queue as part of `send_message`/`record_decision`.
    pub auto_route: bool,
    /// Deadline for a single agent call. No deadline when unset.
    pub agent_timeout_ms: Option<u64>,
    /// Upper bound on `process_all` steps, guarding against reply loops.
    pub max_drain_steps: usize,
    pub history_capacity: usize,
    pub history_token_budget: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            auto_route: true,
            agent_timeout_ms: None,
            max_drain_steps: DEFAULT_MAX_DRAIN_STEPS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_token_budget: HISTORY_TOKEN_LIMIT,
        }
    }
}

impl OrchestratorConfig {
    pub fn agent_timeout(&self) -> Option<Duration> {
        self.agent_timeout_ms.map(Duration::from_millis)
    }
}

/// Contents of a board file: routing policy, company context and seated roles.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub orchestrator: OrchestratorConfig,
    pub company: CompanyContext,
    /// Roles to seat. Every role when unset.
    pub roles: Option<Vec<Role>>,
}

impl BoardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn seated_roles(&self) -> Vec<Role> {
        self.roles.clone().unwrap_or_else(Role::all)
    }
}
