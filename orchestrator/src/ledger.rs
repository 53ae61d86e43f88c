//! Append-only decision store that notifies impacted roles.

use crate::error::OrchestratorError;
use crate::events::EventEmitter;
use crate::router::MessageRouter;
use boardroom_core::validation::validate_decision;
use boardroom_protocol::Decision;
use boardroom_protocol::DecisionId;
use boardroom_protocol::Message;
use boardroom_protocol::MessageId;
use boardroom_protocol::Priority;
use boardroom_protocol::Role;

pub const NOTIFICATION_SUBJECT_PREFIX: &str = "Decision: ";

pub struct DecisionLedger {
    decisions: Vec<Decision>,
    events: EventEmitter,
}

/// Message telling `role` about `decision`.
pub fn notification(decision: &Decision, role: Role) -> Message {
    let priority = if decision.action_required {
        Priority::High
    } else {
        Priority::Normal
    };
    Message::new(
        decision.owner_role,
        role,
        format!("{NOTIFICATION_SUBJECT_PREFIX}{}", decision.title),
        decision.summary.clone(),
    )
    .with_priority(priority)
    .requiring_response(decision.action_required)
}

impl DecisionLedger {
    pub fn new(events: EventEmitter) -> Self {
        Self {
            decisions: Vec::new(),
            events,
        }
    }

    /// Stores `decision` and enqueues one notification per impacted role.
    ///
    /// Every impacted role is notified, the owner included when listed.
    /// Returns the ids of the queued notifications in impacted-role order.
    pub fn record(
        &mut self,
        decision: Decision,
        router: &mut MessageRouter,
    ) -> Result<Vec<MessageId>, OrchestratorError> {
        validate_decision(&decision)?;

        let notifications: Vec<Message> = decision
            .impacted_roles
            .iter()
            .copied()
            .map(|role| notification(&decision, role))
            .collect();

        let mut ids = Vec::with_capacity(notifications.len());
        for message in notifications {
            ids.push(router.enqueue(message)?);
        }

        tracing::info!(
            decision_id = %decision.id,
            owner = %decision.owner_role,
            decision_type = %decision.decision_type,
            action_required = decision.action_required,
            notifications = ids.len(),
            "Recorded decision"
        );
        self.events.decision_recorded(&decision, ids.clone());
        self.decisions.push(decision);
        Ok(ids)
    }

    /// Every decision in recording order.
    pub fn all(&self) -> &[Decision] {
        &self.decisions
    }

    pub fn get(&self, id: DecisionId) -> Option<&Decision> {
        self.decisions.iter().find(|decision| decision.id == id)
    }

    pub fn by_role(&self, role: Role) -> Vec<&Decision> {
        self.decisions
            .iter()
            .filter(|decision| decision.owner_role == role)
            .collect()
    }

    /// Decisions that still ask for action.
    pub fn pending(&self) -> Vec<&Decision> {
        self.decisions
            .iter()
            .filter(|decision| decision.action_required)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}
