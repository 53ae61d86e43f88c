#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use boardroom_core::Agent;
use boardroom_core::AgentError;
use boardroom_core::Executive;
use boardroom_core::GenerateError;
use boardroom_core::Prompt;
use boardroom_core::PromptKind;
use boardroom_core::ResponseGenerator;
use boardroom_core::Speaker;
use boardroom_protocol::CompanyContext;
use boardroom_protocol::DecisionType;
use boardroom_protocol::Message;
use boardroom_protocol::Priority;
use boardroom_protocol::Recipient;
use boardroom_protocol::Role;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

/// Returns canned text and remembers every prompt it saw.
#[derive(Default)]
struct RecordingGenerator {
    reply: String,
    prompts: Mutex<Vec<Prompt>>,
}

impl RecordingGenerator {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResponseGenerator for RecordingGenerator {
    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerateError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        Ok(self.reply.clone())
    }
}

struct RateLimited;

#[async_trait]
impl ResponseGenerator for RateLimited {
    async fn generate(&self, _prompt: &Prompt) -> Result<String, GenerateError> {
        Err(GenerateError::RateLimited)
    }
}

/// Fails a fixed number of times, then answers.
struct Flaky {
    failures_left: AtomicU32,
}

impl Flaky {
    fn failing(times: u32) -> Arc<Self> {
        Arc::new(Self {
            failures_left: AtomicU32::new(times),
        })
    }
}

#[async_trait]
impl ResponseGenerator for Flaky {
    async fn generate(&self, _prompt: &Prompt) -> Result<String, GenerateError> {
        if self.failures_left.load(Ordering::SeqCst) > 0 {
            self.failures_left.fetch_sub(1, Ordering::SeqCst);
            return Err(GenerateError::Unavailable("overloaded".to_string()));
        }
        Ok("Understood.".to_string())
    }
}

fn acme() -> CompanyContext {
    CompanyContext {
        name: "Acme".to_string(),
        industry: "Retail".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn replies_to_sender_when_response_required() {
    let generator = RecordingGenerator::replying("Campaign budget looks fine.");
    let cmo = Executive::for_role(Role::Cmo, generator.clone());
    let message = Message::new(Role::Cfo, Role::Cmo, "Budget", "Can you cut 10%?")
        .with_priority(Priority::High)
        .requiring_response(true);

    let reply = cmo
        .handle_incoming_message(&message, &acme())
        .await
        .unwrap()
        .expect("a reply was required");

    assert_eq!(reply.from, Role::Cmo);
    assert_eq!(reply.to, Recipient::Role(Role::Cfo));
    assert_eq!(reply.subject, "Re: Budget");
    assert_eq!(reply.body, "Campaign budget looks fine.");
    assert_eq!(reply.priority, Priority::High);
    assert_eq!(reply.parent_message_id, Some(message.id));
    assert!(!reply.requires_response);

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].company.name, "Acme");
    assert_eq!(
        prompts[0].kind,
        PromptKind::Reply {
            from: Role::Cfo,
            subject: "Budget".to_string(),
            body: "Can you cut 10%?".to_string(),
        }
    );
}

#[tokio::test]
async fn no_reply_without_response_flag_but_history_grows() {
    let generator = RecordingGenerator::replying("Noted.");
    let cto = Executive::for_role(Role::Cto, generator.clone());
    let message = Message::new(Role::Coo, Role::Cto, "Outage", "Fixed overnight");

    let reply = cto.handle_incoming_message(&message, &acme()).await.unwrap();
    assert!(reply.is_none());

    let history = cto.history().snapshot().await;
    let speakers: Vec<Speaker> = history.iter().map(|entry| entry.speaker).collect();
    assert_eq!(speakers, vec![Speaker::Peer(Role::Coo), Speaker::Own]);
}

#[tokio::test]
async fn later_prompts_carry_earlier_history() {
    let generator = RecordingGenerator::replying("ok");
    let coo = Executive::for_role(Role::Coo, generator.clone());

    let first = Message::new(Role::Cfo, Role::Coo, "Freight", "Costs up");
    let second = Message::new(Role::Cfo, Role::Coo, "Freight", "Still up");
    coo.handle_incoming_message(&first, &acme()).await.unwrap();
    coo.handle_incoming_message(&second, &acme()).await.unwrap();

    let prompts = generator.prompts();
    assert!(prompts[0].history.is_empty());
    assert_eq!(prompts[1].history.len(), 2);
}

#[tokio::test]
async fn history_budget_limits_prompt_history() {
    let generator = RecordingGenerator::replying(&"x".repeat(400));
    let chro = Executive::for_role(Role::Chro, generator.clone()).with_history_token_budget(150);

    for _ in 0..3 {
        let message = Message::new(Role::Cfo, Role::Chro, "Hiring", "Freeze?");
        chro.handle_incoming_message(&message, &acme()).await.unwrap();
    }

    // Own entries are ~100 tokens each; only the newest exchange fits.
    let prompts = generator.prompts();
    let last = prompts.last().unwrap();
    assert!(last.history.len() < chro.history().len().await);
    assert_eq!(last.history.last().unwrap().speaker, Speaker::Own);
}

#[tokio::test]
async fn clear_history_forgets_conversation() {
    let generator = RecordingGenerator::replying("ok");
    let cco = Executive::for_role(Role::Cco, generator);
    let message = Message::new(Role::Cmo, Role::Cco, "NPS", "Dropped");
    cco.handle_incoming_message(&message, &acme()).await.unwrap();
    assert!(!cco.history().is_empty().await);

    cco.clear_history().await;
    assert!(cco.history().is_empty().await);
}

#[tokio::test]
async fn report_is_a_recommendation_summarised_from_first_line() {
    let generator = RecordingGenerator::replying("Hold prices this quarter.\nMargins are thin.");
    let cfo = Executive::for_role(Role::Cfo, generator.clone());

    let decision = cfo.generate_report(&acme()).await.unwrap();

    assert_eq!(decision.owner_role, Role::Cfo);
    assert_eq!(decision.decision_type, DecisionType::Recommendation);
    assert_eq!(decision.title, "Chief Financial Officer report");
    assert_eq!(decision.summary, "Hold prices this quarter.");
    assert_eq!(decision.details, "Hold prices this quarter.\nMargins are thin.");
    assert!(!decision.action_required);
    assert_eq!(generator.prompts()[0].kind, PromptKind::Report);
}

#[tokio::test]
async fn provider_failure_is_an_agent_error() {
    let cfo = Executive::for_role(Role::Cfo, Arc::new(RateLimited));
    let message = Message::new(Role::Cmo, Role::Cfo, "Spend", "More ads?").requiring_response(true);

    let err = cfo.handle_incoming_message(&message, &acme()).await.unwrap_err();
    assert_eq!(err, AgentError::Provider(GenerateError::RateLimited));

    let err = cfo.generate_report(&acme()).await.unwrap_err();
    assert_eq!(err, AgentError::Provider(GenerateError::RateLimited));
}

#[tokio::test]
async fn failed_attempts_leave_no_trace_in_history() {
    let cmo = Executive::for_role(Role::Cmo, Flaky::failing(2));
    let message = Message::new(Role::Cfo, Role::Cmo, "Budget", "Cut 10%?").requiring_response(true);

    for _ in 0..2 {
        let err = cmo.handle_incoming_message(&message, &acme()).await.unwrap_err();
        assert_eq!(
            err,
            AgentError::Provider(GenerateError::Unavailable("overloaded".to_string()))
        );
        assert!(cmo.history().is_empty().await);
    }

    let reply = cmo.handle_incoming_message(&message, &acme()).await.unwrap();
    assert!(reply.is_some());

    let speakers: Vec<Speaker> = cmo
        .history()
        .snapshot()
        .await
        .iter()
        .map(|entry| entry.speaker)
        .collect();
    assert_eq!(speakers, vec![Speaker::Peer(Role::Cfo), Speaker::Own]);
}
