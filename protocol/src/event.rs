//! Events published by the orchestrator while it routes messages and decisions.

use crate::id::DecisionId;
use crate::id::MessageId;
use crate::message::Priority;
use crate::role::Role;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic per-orchestrator sequence number.
    pub seq: u64,
    pub at: DateTime<Utc>,
    pub msg: EventMsg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventMsg {
    MessageEnqueued(MessageEnqueuedEvent),
    MessageCompleted(MessageCompletedEvent),
    MessageRetrying(MessageRetryingEvent),
    MessageBlocked(MessageBlockedEvent),
    MessageDropped(MessageDroppedEvent),
    BroadcastDelivered(BroadcastDeliveredEvent),
    BroadcastFailed(BroadcastFailedEvent),
    DecisionRecorded(DecisionRecordedEvent),
    ReportFailed(ReportFailedEvent),
    HistoryCleared(HistoryClearedEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEnqueuedEvent {
    pub message_id: MessageId,
    pub from: Role,
    pub to: Role,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageCompletedEvent {
    pub message_id: MessageId,
    pub to: Role,
    pub attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_id: Option<MessageId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRetryingEvent {
    pub message_id: MessageId,
    pub to: Role,
    pub retries: u32,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBlockedEvent {
    pub message_id: MessageId,
    pub to: Role,
    pub attempts: u32,
    pub error: String,
}

/// The target role was not registered or not active; the message was discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDroppedEvent {
    pub message_id: MessageId,
    pub to: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastDeliveredEvent {
    pub message_id: MessageId,
    pub from: Role,
    pub to: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastFailedEvent {
    pub message_id: MessageId,
    pub from: Role,
    pub to: Role,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecordedEvent {
    pub decision_id: DecisionId,
    pub owner: Role,
    pub notifications: Vec<MessageId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFailedEvent {
    pub role: Role,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryClearedEvent {
    /// Queue items discarded without being delivered.
    pub discarded_messages: usize,
}
