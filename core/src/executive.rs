use crate::agent::Agent;
use crate::agent::AgentProfile;
use crate::agent::DecisionOptions;
use crate::agent::MessageOptions;
use crate::error::AgentError;
use crate::generator::Prompt;
use crate::generator::PromptKind;
use crate::generator::ResponseGenerator;
use crate::history::ConversationHistory;
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::history::HistoryEntry;
use crate::history::Speaker;
use crate::truncation::HISTORY_TOKEN_LIMIT;
use crate::truncation::SUMMARY_CHAR_LIMIT;
use crate::truncation::fit_history;
use crate::truncation::summary_line;
use async_trait::async_trait;
use boardroom_protocol::CompanyContext;
use boardroom_protocol::Decision;
use boardroom_protocol::DecisionType;
use boardroom_protocol::Message;
use boardroom_protocol::Recipient;
use boardroom_protocol::Role;
use std::sync::Arc;

const REPLY_PREFIX: &str = "Re: ";

/// Generic executive agent: asks its generator for text and keeps a private
/// conversation history. Every built-in role is an `Executive` with a
/// different profile.
pub struct Executive {
    profile: AgentProfile,
    generator: Arc<dyn ResponseGenerator>,
    history: ConversationHistory,
    history_token_budget: usize,
}

impl Executive {
    pub fn new(profile: AgentProfile, generator: Arc<dyn ResponseGenerator>) -> Self {
        Self {
            profile,
            generator,
            history: ConversationHistory::new(DEFAULT_HISTORY_CAPACITY),
            history_token_budget: HISTORY_TOKEN_LIMIT,
        }
    }

    pub fn for_role(role: Role, generator: Arc<dyn ResponseGenerator>) -> Self {
        Self::new(AgentProfile::for_role(role), generator)
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = ConversationHistory::new(capacity);
        self
    }

    pub fn with_history_token_budget(mut self, budget: usize) -> Self {
        self.history_token_budget = budget;
        self
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    async fn prompt(&self, context: &CompanyContext, kind: PromptKind) -> Prompt {
        let history = self.history.snapshot().await;
        Prompt {
            role: self.profile.role,
            display_name: self.profile.display_name.clone(),
            company: context.clone(),
            history: fit_history(&history, self.history_token_budget),
            kind,
        }
    }
}

fn reply_subject(subject: &str) -> String {
    if subject.starts_with(REPLY_PREFIX) {
        subject.to_string()
    } else {
        format!("{REPLY_PREFIX}{subject}")
    }
}

#[async_trait]
impl Agent for Executive {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    async fn handle_incoming_message(
        &self,
        message: &Message,
        context: &CompanyContext,
    ) -> Result<Option<Message>, AgentError> {
        let prompt = self
            .prompt(
                context,
                PromptKind::Reply {
                    from: message.from,
                    subject: message.subject.clone(),
                    body: message.body.clone(),
                },
            )
            .await;

        let text = self.generator.generate(&prompt).await?;

        let reply = if message.requires_response {
            Some(self.create_message(
                Recipient::Role(message.from),
                &reply_subject(&message.subject),
                &text,
                MessageOptions {
                    priority: message.priority,
                    requires_response: false,
                    parent_message_id: Some(message.id),
                },
            )?)
        } else {
            None
        };

        // Only a successful attempt is remembered; retries of the same
        // message must not pile up in history.
        self.history
            .push_exchange(
                HistoryEntry::new(
                    Speaker::Peer(message.from),
                    format!("{}: {}", message.subject, message.body),
                ),
                HistoryEntry::new(Speaker::Own, text),
            )
            .await;

        if let Some(reply) = &reply {
            tracing::debug!(
                role = %self.profile.role,
                message_id = %message.id,
                reply_id = %reply.id,
                "Executive replied"
            );
        }
        Ok(reply)
    }

    async fn generate_report(&self, context: &CompanyContext) -> Result<Decision, AgentError> {
        let prompt = self.prompt(context, PromptKind::Report).await;
        let text = self.generator.generate(&prompt).await?;
        self.history
            .push(HistoryEntry::new(Speaker::Own, text.clone()))
            .await;

        let title = format!("{} report", self.profile.display_name);
        let summary = summary_line(&text, SUMMARY_CHAR_LIMIT);
        let decision = self.create_decision(
            DecisionType::Recommendation,
            &title,
            &summary,
            &text,
            DecisionOptions::default(),
        )?;
        Ok(decision)
    }

    async fn clear_history(&self) {
        self.history.clear().await;
    }
}
