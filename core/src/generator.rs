use crate::history::HistoryEntry;
use async_trait::async_trait;
use boardroom_protocol::CompanyContext;
use boardroom_protocol::Role;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    #[error("provider rate limit reached")]
    RateLimited,
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// What the agent is asking the generator for.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptKind {
    /// Answer to an incoming message.
    Reply {
        from: Role,
        subject: String,
        body: String,
    },
    /// Periodic recommendation for the board.
    Report,
}

/// Everything a generator may use to produce text for one agent call.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub role: Role,
    pub display_name: String,
    pub company: CompanyContext,
    /// Most recent history entries that fit the prompt budget, oldest first.
    pub history: Vec<HistoryEntry>,
    pub kind: PromptKind,
}

/// Text-producing collaborator behind an agent (typically an LLM client).
///
/// The returned text is opaque to the orchestrator.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerateError>;
}
