use crate::error::AgentError;
use crate::validation::ValidationError;
use crate::validation::validate_decision;
use crate::validation::validate_message;
use async_trait::async_trait;
use boardroom_protocol::CompanyContext;
use boardroom_protocol::Confidence;
use boardroom_protocol::Decision;
use boardroom_protocol::DecisionType;
use boardroom_protocol::Message;
use boardroom_protocol::MessageId;
use boardroom_protocol::Priority;
use boardroom_protocol::Recipient;
use boardroom_protocol::Role;
use chrono::DateTime;
use chrono::Utc;
use std::collections::BTreeSet;

/// Confidence used by [`DecisionOptions::default`].
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

/// Identity of an agent: the seat it holds and what it is good at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    pub role: Role,
    pub display_name: String,
    pub capabilities: BTreeSet<String>,
}

impl AgentProfile {
    pub fn new(
        role: Role,
        display_name: impl Into<String>,
        capabilities: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            role,
            display_name: display_name.into(),
            capabilities: capabilities.into_iter().map(Into::into).collect(),
        }
    }

    /// Default profile for a built-in role.
    pub fn for_role(role: Role) -> Self {
        let capabilities: &[&str] = match role {
            Role::Cfo => &["budgeting", "cash-flow", "financial-risk", "forecasting"],
            Role::Cmo => &["brand", "campaigns", "customer-acquisition", "market-research"],
            Role::Coo => &["logistics", "operations", "process-improvement", "supply-chain"],
            Role::Chro => &["compensation", "culture", "hiring", "retention"],
            Role::Cto => &["architecture", "engineering", "infrastructure", "security"],
            Role::Cco => &["churn", "customer-success", "satisfaction", "support"],
        };
        Self::new(role, role.display_name(), capabilities.iter().copied())
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageOptions {
    pub priority: Priority,
    pub requires_response: bool,
    pub parent_message_id: Option<MessageId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionOptions {
    pub confidence: f64,
    pub impacted_roles: Vec<Role>,
    pub action_required: bool,
    pub deadline: Option<DateTime<Utc>>,
}

impl Default for DecisionOptions {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            impacted_roles: Vec::new(),
            action_required: false,
            deadline: None,
        }
    }
}

/// Role-bound unit of behaviour driven by the orchestrator.
///
/// The orchestrator only ever calls the methods below; any state an agent
/// keeps (conversation history, caches) is private to it. Errors returned
/// from the async methods are treated as transient by the router.
#[async_trait]
pub trait Agent: Send + Sync {
    fn profile(&self) -> &AgentProfile;

    fn role(&self) -> Role {
        self.profile().role
    }

    /// Consumes a message addressed to this agent, optionally producing a reply.
    ///
    /// `message.requires_response` is advisory; an agent may reply regardless.
    async fn handle_incoming_message(
        &self,
        message: &Message,
        context: &CompanyContext,
    ) -> Result<Option<Message>, AgentError>;

    async fn generate_report(&self, context: &CompanyContext) -> Result<Decision, AgentError>;

    /// Forgets agent-local conversation state.
    async fn clear_history(&self) {}

    /// Builds a validated message sent by this agent.
    fn create_message(
        &self,
        to: Recipient,
        subject: &str,
        body: &str,
        options: MessageOptions,
    ) -> Result<Message, ValidationError> {
        let MessageOptions {
            priority,
            requires_response,
            parent_message_id,
        } = options;

        let mut message = Message::new(self.role(), to, subject, body)
            .with_priority(priority)
            .requiring_response(requires_response);
        message.parent_message_id = parent_message_id;

        validate_message(&message)?;
        Ok(message)
    }

    /// Builds a validated decision owned by this agent.
    fn create_decision(
        &self,
        decision_type: DecisionType,
        title: &str,
        summary: &str,
        details: &str,
        options: DecisionOptions,
    ) -> Result<Decision, ValidationError> {
        let DecisionOptions {
            confidence,
            impacted_roles,
            action_required,
            deadline,
        } = options;

        let mut decision = Decision::new(
            self.role(),
            decision_type,
            title,
            summary,
            details,
            Confidence::new(confidence)?,
        )
        .with_impacted_roles(impacted_roles)
        .requiring_action(action_required);
        decision.deadline = deadline;

        validate_decision(&decision)?;
        Ok(decision)
    }
}
