//! Construction-time checks for messages and decisions.

use boardroom_protocol::ConfidenceError;
use boardroom_protocol::Decision;
use boardroom_protocol::Message;
use boardroom_protocol::Role;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("message subject must not be empty")]
    EmptySubject,
    #[error("decision title must not be empty")]
    EmptyTitle,
    #[error("a message addressed to ALL must go through broadcast")]
    UnroutableBroadcast,
    #[error(transparent)]
    Confidence(#[from] ConfidenceError),
}

/// Checks the fields every message must satisfy, broadcast or not.
pub fn validate_message(message: &Message) -> Result<(), ValidationError> {
    if message.subject.trim().is_empty() {
        return Err(ValidationError::EmptySubject);
    }
    Ok(())
}

/// Like [`validate_message`], and additionally requires a single recipient.
pub fn validate_routable(message: &Message) -> Result<Role, ValidationError> {
    validate_message(message)?;
    message.to.role().ok_or(ValidationError::UnroutableBroadcast)
}

pub fn validate_decision(decision: &Decision) -> Result<(), ValidationError> {
    if decision.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}
