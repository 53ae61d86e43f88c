//! Event fan-out for orchestrator observers.

use boardroom_protocol::BroadcastDeliveredEvent;
use boardroom_protocol::BroadcastFailedEvent;
use boardroom_protocol::Decision;
use boardroom_protocol::DecisionRecordedEvent;
use boardroom_protocol::Event;
use boardroom_protocol::EventMsg;
use boardroom_protocol::HistoryClearedEvent;
use boardroom_protocol::Message;
use boardroom_protocol::MessageBlockedEvent;
use boardroom_protocol::MessageCompletedEvent;
use boardroom_protocol::MessageDroppedEvent;
use boardroom_protocol::MessageEnqueuedEvent;
use boardroom_protocol::MessageId;
use boardroom_protocol::MessageRetryingEvent;
use boardroom_protocol::ReportFailedEvent;
use boardroom_protocol::Role;
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use tokio::sync::broadcast;

/// Events buffered per subscriber before the slowest one starts lagging.
pub const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Stamps and publishes orchestrator events. Clones share one sequence and channel.
#[derive(Clone)]
pub struct EventEmitter {
    sender: broadcast::Sender<Event>,
    seq: Arc<AtomicU64>,
}

impl EventEmitter {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            sender,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    fn emit(&self, msg: EventMsg) -> Event {
        let event = Event {
            seq: self.seq.fetch_add(1, Ordering::Relaxed),
            at: Utc::now(),
            msg,
        };
        // No subscribers is fine.
        let _ = self.sender.send(event.clone());
        event
    }

    pub fn message_enqueued(&self, message: &Message, to: Role) -> Event {
        self.emit(EventMsg::MessageEnqueued(MessageEnqueuedEvent {
            message_id: message.id,
            from: message.from,
            to,
            priority: message.priority,
        }))
    }

    pub fn message_completed(
        &self,
        message_id: MessageId,
        to: Role,
        attempts: u32,
        reply_id: Option<MessageId>,
    ) -> Event {
        self.emit(EventMsg::MessageCompleted(MessageCompletedEvent {
            message_id,
            to,
            attempts,
            reply_id,
        }))
    }

    pub fn message_retrying(
        &self,
        message_id: MessageId,
        to: Role,
        retries: u32,
        error: String,
    ) -> Event {
        self.emit(EventMsg::MessageRetrying(MessageRetryingEvent {
            message_id,
            to,
            retries,
            error,
        }))
    }

    pub fn message_blocked(
        &self,
        message_id: MessageId,
        to: Role,
        attempts: u32,
        error: String,
    ) -> Event {
        self.emit(EventMsg::MessageBlocked(MessageBlockedEvent {
            message_id,
            to,
            attempts,
            error,
        }))
    }

    pub fn message_dropped(&self, message_id: MessageId, to: Role) -> Event {
        self.emit(EventMsg::MessageDropped(MessageDroppedEvent { message_id, to }))
    }

    pub fn broadcast_delivered(&self, message: &Message, to: Role) -> Event {
        self.emit(EventMsg::BroadcastDelivered(BroadcastDeliveredEvent {
            message_id: message.id,
            from: message.from,
            to,
        }))
    }

    pub fn broadcast_failed(&self, message: &Message, to: Role, error: String) -> Event {
        self.emit(EventMsg::BroadcastFailed(BroadcastFailedEvent {
            message_id: message.id,
            from: message.from,
            to,
            error,
        }))
    }

    pub fn decision_recorded(&self, decision: &Decision, notifications: Vec<MessageId>) -> Event {
        self.emit(EventMsg::DecisionRecorded(DecisionRecordedEvent {
            decision_id: decision.id,
            owner: decision.owner_role,
            notifications,
        }))
    }

    pub fn report_failed(&self, role: Role, error: String) -> Event {
        self.emit(EventMsg::ReportFailed(ReportFailedEvent { role, error }))
    }

    pub fn history_cleared(&self, discarded_messages: usize) -> Event {
        self.emit(EventMsg::HistoryCleared(HistoryClearedEvent {
            discarded_messages,
        }))
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}
