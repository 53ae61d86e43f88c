//! Orchestration core for executive agents.
//!
//! Routes messages between registered agents through a FIFO queue with
//! bounded retries, broadcasts announcements, and records decisions whose
//! impacted roles receive notification messages. [`Orchestrator`] composes
//! the registry, router and ledger behind one API.

pub mod error;
pub mod events;
pub mod ledger;
pub mod queue;
pub mod registry;
pub mod router;
pub mod runtime;

pub use error::DeliveryError;
pub use error::OrchestratorError;
pub use events::EventEmitter;
pub use ledger::DecisionLedger;
pub use registry::AgentRegistry;
pub use router::BroadcastReport;
pub use router::DrainSummary;
pub use router::MessageRouter;
pub use router::ProcessedMessage;
pub use router::RouterStats;
pub use runtime::DecisionReceipt;
pub use runtime::Orchestrator;
pub use runtime::ReportBatch;
pub use runtime::ReportFailure;
