//! Role → agent lookup owned by the orchestrator.

use boardroom_core::Agent;
use boardroom_core::Executive;
use boardroom_core::OrchestratorConfig;
use boardroom_core::ResponseGenerator;
use boardroom_protocol::Role;
use indexmap::IndexMap;
use std::sync::Arc;

struct Seat {
    agent: Arc<dyn Agent>,
    active: bool,
}

/// Registered agents, iterated in registration order.
///
/// Registering a role twice replaces the earlier agent (last write wins)
/// while keeping the role's original position.
#[derive(Default)]
pub struct AgentRegistry {
    seats: IndexMap<Role, Seat>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats an agent as active. Returns the agent it replaced, if any.
    pub fn register(&mut self, role: Role, agent: Arc<dyn Agent>) -> Option<Arc<dyn Agent>> {
        if agent.role() != role {
            tracing::warn!(
                role = %role,
                agent_role = %agent.role(),
                "Registering agent under a role it does not report"
            );
        }
        let previous = self.seats.insert(
            role,
            Seat {
                agent,
                active: true,
            },
        );
        tracing::debug!(role = %role, replaced = previous.is_some(), "Registered agent");
        previous.map(|seat| seat.agent)
    }

    pub fn get(&self, role: Role) -> Option<Arc<dyn Agent>> {
        self.seats.get(&role).map(|seat| Arc::clone(&seat.agent))
    }

    /// Like [`AgentRegistry::get`], but only for active agents.
    pub fn get_active(&self, role: Role) -> Option<Arc<dyn Agent>> {
        self.seats
            .get(&role)
            .filter(|seat| seat.active)
            .map(|seat| Arc::clone(&seat.agent))
    }

    pub fn is_active(&self, role: Role) -> bool {
        self.seats.get(&role).is_some_and(|seat| seat.active)
    }

    /// Returns `false` when `role` is not registered.
    pub fn set_active(&mut self, role: Role, active: bool) -> bool {
        match self.seats.get_mut(&role) {
            Some(seat) => {
                seat.active = active;
                true
            }
            None => false,
        }
    }

    /// Active seats as `(role, agent)` pairs. The role is the seat the agent
    /// was registered under, which is what routing addresses.
    pub fn active_agents(&self) -> Vec<(Role, Arc<dyn Agent>)> {
        self.seats
            .iter()
            .filter(|(_, seat)| seat.active)
            .map(|(role, seat)| (*role, Arc::clone(&seat.agent)))
            .collect()
    }

    /// Every registered agent, active or not.
    pub fn agents(&self) -> Vec<(Role, Arc<dyn Agent>)> {
        self.seats
            .iter()
            .map(|(role, seat)| (*role, Arc::clone(&seat.agent)))
            .collect()
    }

    pub fn roles(&self) -> Vec<Role> {
        self.seats.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

/// Seats one [`Executive`] per role, all sharing `generator`.
pub fn executive_board(
    roles: &[Role],
    generator: Arc<dyn ResponseGenerator>,
    config: &OrchestratorConfig,
) -> AgentRegistry {
    let mut registry = AgentRegistry::new();
    for role in roles {
        let executive = Executive::for_role(*role, Arc::clone(&generator))
            .with_history_capacity(config.history_capacity)
            .with_history_token_budget(config.history_token_budget);
        registry.register(*role, Arc::new(executive));
    }
    registry
}
