//! Data model shared by the boardroom crates.
//!
//! Everything here is a plain value: roles, messages, decisions, the company
//! context handed to agents, and the events the orchestrator publishes. No
//! type in this crate performs I/O or talks to an agent.

mod context;
mod decision;
mod event;
mod id;
mod message;
mod role;

pub use context::CompanyContext;
pub use context::CompanyContextUpdate;
pub use decision::Confidence;
pub use decision::ConfidenceError;
pub use decision::Decision;
pub use decision::DecisionType;
pub use event::BroadcastDeliveredEvent;
pub use event::BroadcastFailedEvent;
pub use event::DecisionRecordedEvent;
pub use event::Event;
pub use event::EventMsg;
pub use event::HistoryClearedEvent;
pub use event::MessageBlockedEvent;
pub use event::MessageCompletedEvent;
pub use event::MessageDroppedEvent;
pub use event::MessageEnqueuedEvent;
pub use event::MessageRetryingEvent;
pub use event::ReportFailedEvent;
pub use id::DecisionId;
pub use id::MessageId;
pub use message::Message;
pub use message::MessageStatus;
pub use message::Priority;
pub use message::StatusError;
pub use role::ParseRecipientError;
pub use role::Recipient;
pub use role::Role;
