use crate::id::MessageId;
use crate::role::Recipient;
use crate::role::Role;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumString;

/// Urgency attached to a message. Delivery order never depends on it.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageStatus {
    #[default]
    Pending,
    Completed,
    /// Retries were exhausted without a successful delivery.
    Blocked,
}

impl MessageStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, MessageStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("message {id} is already {status}")]
    AlreadyResolved { id: MessageId, status: MessageStatus },
}

/// A directed or broadcast communication between two agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub from: Role,
    pub to: Recipient,
    pub subject: String,
    pub body: String,
    pub priority: Priority,
    pub requires_response: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_message_id: Option<MessageId>,
    status: MessageStatus,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        from: Role,
        to: impl Into<Recipient>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            from,
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            priority: Priority::Normal,
            requires_response: false,
            parent_message_id: None,
            status: MessageStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn requiring_response(mut self, requires_response: bool) -> Self {
        self.requires_response = requires_response;
        self
    }

    pub fn in_reply_to(mut self, parent: MessageId) -> Self {
        self.parent_message_id = Some(parent);
        self
    }

    pub fn status(&self) -> MessageStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == MessageStatus::Pending
    }

    /// Moves a pending message to `completed`.
    pub fn mark_completed(&mut self) -> Result<(), StatusError> {
        self.resolve(MessageStatus::Completed)
    }

    /// Moves a pending message to `blocked`.
    pub fn mark_blocked(&mut self) -> Result<(), StatusError> {
        self.resolve(MessageStatus::Blocked)
    }

    fn resolve(&mut self, status: MessageStatus) -> Result<(), StatusError> {
        if self.status.is_terminal() {
            return Err(StatusError::AlreadyResolved {
                id: self.id,
                status: self.status,
            });
        }
        self.status = status;
        Ok(())
    }
}
