//! Agent contract for the boardroom orchestrator.
//!
//! This crate defines what an executive agent is ([`Agent`]), the collaborator
//! an agent consults to produce text ([`ResponseGenerator`]), and the generic
//! [`Executive`] implementation that every built-in role uses. It also owns
//! construction-time validation and the board configuration file.

mod agent;
pub mod config;
mod error;
mod executive;
mod generator;
mod history;
pub mod truncation;
pub mod validation;

pub use agent::Agent;
pub use agent::AgentProfile;
pub use agent::DEFAULT_CONFIDENCE;
pub use agent::DecisionOptions;
pub use agent::MessageOptions;
pub use config::BoardConfig;
pub use config::ConfigError;
pub use config::OrchestratorConfig;
pub use error::AgentError;
pub use executive::Executive;
pub use generator::GenerateError;
pub use generator::Prompt;
pub use generator::PromptKind;
pub use generator::ResponseGenerator;
pub use history::ConversationHistory;
pub use history::HistoryEntry;
pub use history::Speaker;
pub use validation::ValidationError;
