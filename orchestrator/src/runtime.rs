//! The orchestrator façade.

use crate::error::DeliveryError;
use crate::error::OrchestratorError;
use crate::events::EventEmitter;
use crate::ledger::DecisionLedger;
use crate::registry::AgentRegistry;
use crate::router::BroadcastReport;
use crate::router::DrainSummary;
use crate::router::MessageRouter;
use crate::router::ProcessedMessage;
use crate::router::RouterStats;
use crate::router::call_with_deadline;
use boardroom_core::AgentError;
use boardroom_core::OrchestratorConfig;
use boardroom_core::validation::validate_decision;
use boardroom_protocol::CompanyContext;
use boardroom_protocol::CompanyContextUpdate;
use boardroom_protocol::Decision;
use boardroom_protocol::DecisionId;
use boardroom_protocol::Event;
use boardroom_protocol::Message;
use boardroom_protocol::MessageId;
use boardroom_protocol::Priority;
use boardroom_protocol::Role;
use tokio::sync::broadcast;

/// A report that could not be produced.
#[derive(Debug)]
pub struct ReportFailure {
    pub role: Role,
    pub error: AgentError,
}

/// Result of [`Orchestrator::generate_all_reports`]: one entry per agent,
/// either a decision or a failure.
#[derive(Debug, Default)]
pub struct ReportBatch {
    pub decisions: Vec<Decision>,
    pub failures: Vec<ReportFailure>,
}

#[derive(Debug)]
pub struct DecisionReceipt {
    pub decision_id: DecisionId,
    /// Notification messages queued for impacted roles.
    pub notifications: Vec<MessageId>,
    /// Present when auto-routing drained the queue as part of the call.
    pub drain: Option<DrainSummary>,
}

/// Composes the agent registry, message router and decision ledger.
///
/// Every method that talks to agents takes `&mut self`, so at most one agent
/// call is in flight per orchestrator.
pub struct Orchestrator {
    registry: AgentRegistry,
    router: MessageRouter,
    ledger: DecisionLedger,
    context: CompanyContext,
    config: OrchestratorConfig,
    events: EventEmitter,
}

impl Orchestrator {
    pub fn new(
        registry: AgentRegistry,
        context: CompanyContext,
        config: OrchestratorConfig,
    ) -> Self {
        let events = EventEmitter::new();
        let router = MessageRouter::new(&config, events.clone());
        let ledger = DecisionLedger::new(events.clone());
        tracing::info!(
            agents = registry.len(),
            max_retries = config.max_retries,
            auto_route = config.auto_route,
            "Orchestrator initialised"
        );

        Self {
            registry,
            router,
            ledger,
            context,
            config,
            events,
        }
    }

    /// Receives every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Queues `message`; with auto-routing on, also runs one delivery step.
    ///
    /// A message addressed to ALL is broadcast instead and yields `None`.
    /// The step delivers the head of the queue, which is `message` only when
    /// nothing was queued before it.
    pub async fn send_message(
        &mut self,
        message: Message,
    ) -> Result<Option<Message>, OrchestratorError> {
        if message.to.is_all() {
            self.broadcast_message(message.from, &message.subject, &message.body, message.priority)
                .await?;
            return Ok(None);
        }

        self.router.enqueue(message)?;
        if !self.config.auto_route {
            return Ok(None);
        }
        Ok(self
            .router
            .process_next(&self.registry, &self.context)
            .await?)
    }

    pub async fn broadcast_message(
        &mut self,
        from: Role,
        subject: &str,
        body: &str,
        priority: Priority,
    ) -> Result<BroadcastReport, OrchestratorError> {
        self.router
            .broadcast(&self.registry, &self.context, from, subject, body, priority)
            .await
    }

    pub async fn process_next(&mut self) -> Result<Option<Message>, DeliveryError> {
        self.router.process_next(&self.registry, &self.context).await
    }

    pub async fn process_all(&mut self) -> DrainSummary {
        let summary = self.router.process_all(&self.registry, &self.context).await;
        tracing::info!(
            steps = summary.steps,
            replies = summary.replies,
            failures = summary.failures.len(),
            step_limit_reached = summary.step_limit_reached,
            "Drained message queue"
        );
        summary
    }

    /// Stores `decision` and queues notifications for its impacted roles;
    /// with auto-routing on, drains the queue so they are delivered now.
    pub async fn record_decision(
        &mut self,
        decision: Decision,
    ) -> Result<DecisionReceipt, OrchestratorError> {
        let decision_id = decision.id;
        let notifications = self.ledger.record(decision, &mut self.router)?;
        let drain = if self.config.auto_route {
            Some(self.process_all().await)
        } else {
            None
        };

        Ok(DecisionReceipt {
            decision_id,
            notifications,
            drain,
        })
    }

    /// Asks every registered agent for a report, one at a time.
    ///
    /// A failing agent is recorded in `failures` and does not stop the others.
    pub async fn generate_all_reports(&self) -> ReportBatch {
        let mut batch = ReportBatch::default();
        let deadline = self.config.agent_timeout();

        for (role, agent) in self.registry.agents() {
            let result = call_with_deadline(deadline, agent.generate_report(&self.context))
                .await
                .and_then(|decision| {
                    validate_decision(&decision)?;
                    Ok(decision)
                });

            match result {
                Ok(decision) => batch.decisions.push(decision),
                Err(error) => {
                    tracing::warn!(role = %role, error = %error, "Report generation failed");
                    self.events.report_failed(role, error.to_string());
                    batch.failures.push(ReportFailure { role, error });
                }
            }
        }

        tracing::info!(
            decisions = batch.decisions.len(),
            failures = batch.failures.len(),
            "Generated reports"
        );
        batch
    }

    /// Full reset between sessions: agent histories, the pending queue and the
    /// processed log. Recorded decisions are kept.
    pub async fn clear_all_history(&mut self) {
        for (_, agent) in self.registry.agents() {
            agent.clear_history().await;
        }
        let discarded = self.router.clear();
        tracing::info!(discarded, "Cleared orchestrator history");
        self.events.history_cleared(discarded);
    }

    /// Merges `update` into the shared company context.
    pub fn update_context(&mut self, update: CompanyContextUpdate) {
        self.context.apply(update);
        tracing::debug!(company = %self.context.name, "Company context updated");
    }

    pub fn context(&self) -> &CompanyContext {
        &self.context
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn set_auto_route(&mut self, auto_route: bool) {
        self.config.auto_route = auto_route;
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Stops routing to `role` without unregistering it.
    pub fn deactivate(&mut self, role: Role) -> bool {
        self.registry.set_active(role, false)
    }

    pub fn activate(&mut self, role: Role) -> bool {
        self.registry.set_active(role, true)
    }

    pub fn decisions(&self) -> &[Decision] {
        self.ledger.all()
    }

    pub fn decisions_by_executive(&self, role: Role) -> Vec<&Decision> {
        self.ledger.by_role(role)
    }

    pub fn pending_decisions(&self) -> Vec<&Decision> {
        self.ledger.pending()
    }

    pub fn processed_messages(&self) -> &[ProcessedMessage] {
        self.router.processed()
    }

    pub fn processed_message(&self, id: MessageId) -> Option<&ProcessedMessage> {
        self.router.processed_message(id)
    }

    pub fn pending_len(&self) -> usize {
        self.router.pending_len()
    }

    pub fn stats(&self) -> RouterStats {
        self.router.stats()
    }
}
