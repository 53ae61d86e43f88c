//! Error types surfaced by routing and the orchestrator façade.

use boardroom_core::AgentError;
use boardroom_core::ValidationError;
use boardroom_protocol::MessageId;
use boardroom_protocol::MessageStatus;
use boardroom_protocol::Role;

/// A queued message that could not be delivered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeliveryError {
    /// Target role not registered or inactive. Not retried.
    #[error("no active agent for {to}; message {message_id} dropped")]
    NoRoute { message_id: MessageId, to: Role },

    /// Every attempt failed; the message is now `blocked`.
    #[error("message {message_id} to {to} blocked after {attempts} attempts: {source}")]
    Blocked {
        message_id: MessageId,
        to: Role,
        attempts: u32,
        #[source]
        source: AgentError,
    },
}

impl DeliveryError {
    pub fn message_id(&self) -> MessageId {
        match self {
            DeliveryError::NoRoute { message_id, .. } | DeliveryError::Blocked { message_id, .. } => {
                *message_id
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrchestratorError {
    #[error("message {0} is addressed to ALL and cannot be queued; broadcast it instead")]
    BroadcastNotQueueable(MessageId),

    #[error("message {id} is already {status} and cannot be queued again")]
    AlreadyResolved { id: MessageId, status: MessageStatus },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
