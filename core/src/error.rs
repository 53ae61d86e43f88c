use crate::generator::GenerateError;
use crate::validation::ValidationError;
use std::time::Duration;

/// Failure of a single agent call.
///
/// The router treats every variant as transient and applies its retry policy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AgentError {
    #[error("response provider failed: {0}")]
    Provider(#[from] GenerateError),

    #[error("agent call timed out after {0:?}")]
    TimedOut(Duration),

    #[error("agent produced an invalid message or decision: {0}")]
    InvalidOutput(#[from] ValidationError),

    #[error("{0}")]
    Failed(String),
}
