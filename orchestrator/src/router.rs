//! FIFO delivery queue with bounded, tail-requeued retries.
//!
//! The router is the only component that assigns terminal status to a
//! message. Delivery is strictly sequential: one agent call is awaited to
//! completion before the next queue item is looked at.

use crate::error::DeliveryError;
use crate::error::OrchestratorError;
use crate::events::EventEmitter;
use crate::queue::QueueItem;
use crate::queue::RetryDecision;
use crate::registry::AgentRegistry;
use boardroom_core::Agent;
use boardroom_core::AgentError;
use boardroom_core::OrchestratorConfig;
use boardroom_core::ValidationError;
use boardroom_core::validation::validate_routable;
use boardroom_protocol::CompanyContext;
use boardroom_protocol::Message;
use boardroom_protocol::MessageId;
use boardroom_protocol::Priority;
use boardroom_protocol::Role;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// A message that reached a terminal status, with the attempts it took.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedMessage {
    pub message: Message,
    pub attempts: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterStats {
    pub enqueued: usize,
    /// Agent invocations for queued messages, retries included.
    pub attempts: usize,
    pub completed: usize,
    pub retried: usize,
    pub blocked: usize,
    pub dropped: usize,
    /// Broadcast deliveries attempted; never counted in `attempts`.
    pub broadcast: usize,
}

/// Outcome of [`MessageRouter::process_all`].
#[derive(Debug, Default)]
pub struct DrainSummary {
    pub steps: usize,
    /// Replies produced (and queued) while draining.
    pub replies: usize,
    pub failures: Vec<DeliveryError>,
    /// The drain stopped at `max_drain_steps` with messages still queued.
    pub step_limit_reached: bool,
}

impl DrainSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.step_limit_reached
    }
}

#[derive(Debug)]
pub struct BroadcastFailure {
    pub message: Message,
    pub error: AgentError,
}

#[derive(Debug, Default)]
pub struct BroadcastReport {
    /// Targeted copies that were handled successfully, in registry order.
    pub delivered: Vec<Message>,
    pub failures: Vec<BroadcastFailure>,
}

/// Awaits an agent call, turning an elapsed deadline into [`AgentError::TimedOut`].
pub(crate) async fn call_with_deadline<T, F>(
    deadline: Option<Duration>,
    call: F,
) -> Result<T, AgentError>
where
    F: Future<Output = Result<T, AgentError>>,
{
    match deadline {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| AgentError::TimedOut(limit))?,
        None => call.await,
    }
}

pub struct MessageRouter {
    queue: VecDeque<QueueItem>,
    processed: Vec<ProcessedMessage>,
    max_retries: u32,
    agent_timeout: Option<Duration>,
    max_drain_steps: usize,
    stats: RouterStats,
    events: EventEmitter,
}

impl MessageRouter {
    pub fn new(config: &OrchestratorConfig, events: EventEmitter) -> Self {
        Self {
            queue: VecDeque::new(),
            processed: Vec::new(),
            max_retries: config.max_retries,
            agent_timeout: config.agent_timeout(),
            max_drain_steps: config.max_drain_steps,
            stats: RouterStats::default(),
            events,
        }
    }

    /// Appends a message at the tail with a fresh retry counter.
    ///
    /// No deduplication: enqueuing the same message twice delivers it twice.
    pub fn enqueue(&mut self, message: Message) -> Result<MessageId, OrchestratorError> {
        if message.to.is_all() {
            return Err(OrchestratorError::BroadcastNotQueueable(message.id));
        }
        if !message.is_pending() {
            return Err(OrchestratorError::AlreadyResolved {
                id: message.id,
                status: message.status(),
            });
        }
        let target = validate_routable(&message)?;

        let id = message.id;
        tracing::debug!(
            message_id = %id,
            from = %message.from,
            to = %target,
            priority = %message.priority,
            "Enqueued message"
        );
        self.events.message_enqueued(&message, target);
        self.queue
            .push_back(QueueItem::new(message, target, self.max_retries));
        self.stats.enqueued += 1;
        Ok(id)
    }

    /// Delivers the head of the queue.
    ///
    /// Returns the agent's reply (already queued), `Ok(None)` when the queue is
    /// empty, there was no reply, or the message was requeued for a retry.
    pub async fn process_next(
        &mut self,
        registry: &AgentRegistry,
        context: &CompanyContext,
    ) -> Result<Option<Message>, DeliveryError> {
        let Some(mut item) = self.queue.pop_front() else {
            return Ok(None);
        };
        let message_id = item.message.id;
        let to = item.target;

        let Some(agent) = registry.get_active(to) else {
            tracing::warn!(message_id = %message_id, to = %to, "No active agent; dropping message");
            self.events.message_dropped(message_id, to);
            self.stats.dropped += 1;
            return Err(DeliveryError::NoRoute { message_id, to });
        };

        self.stats.attempts += 1;
        match self.deliver(&agent, &item.message, context).await {
            Ok(reply) => {
                let attempts = item.attempts();
                if let Err(err) = item.message.mark_completed() {
                    tracing::error!(message_id = %message_id, error = %err, "Queued message was not pending");
                }
                self.events
                    .message_completed(message_id, to, attempts, reply.as_ref().map(|r| r.id));
                self.processed.push(ProcessedMessage {
                    message: item.message,
                    attempts,
                });
                self.stats.completed += 1;

                if let Some(reply) = &reply {
                    if let Err(err) = self.enqueue(reply.clone()) {
                        tracing::warn!(message_id = %message_id, error = %err, "Discarding unroutable reply");
                        return Ok(None);
                    }
                }
                Ok(reply)
            }
            Err(error) => match item.record_failure() {
                RetryDecision::Retry { retries } => {
                    tracing::warn!(
                        message_id = %message_id,
                        to = %to,
                        retries,
                        max_retries = item.max_retries(),
                        error = %error,
                        "Delivery failed; requeueing at tail"
                    );
                    self.events
                        .message_retrying(message_id, to, retries, error.to_string());
                    self.stats.retried += 1;
                    self.queue.push_back(item);
                    Ok(None)
                }
                RetryDecision::Exhausted => {
                    let attempts = item.attempts();
                    tracing::error!(
                        message_id = %message_id,
                        to = %to,
                        attempts,
                        error = %error,
                        "Delivery retries exhausted; message blocked"
                    );
                    if let Err(err) = item.message.mark_blocked() {
                        tracing::error!(message_id = %message_id, error = %err, "Queued message was not pending");
                    }
                    self.events
                        .message_blocked(message_id, to, attempts, error.to_string());
                    self.processed.push(ProcessedMessage {
                        message: item.message,
                        attempts,
                    });
                    self.stats.blocked += 1;
                    Err(DeliveryError::Blocked {
                        message_id,
                        to,
                        attempts,
                        source: error,
                    })
                }
            },
        }
    }

    /// Calls `process_next` until the queue is empty or `max_drain_steps` is hit.
    ///
    /// Failures are collected; they never stop the drain.
    pub async fn process_all(
        &mut self,
        registry: &AgentRegistry,
        context: &CompanyContext,
    ) -> DrainSummary {
        let mut summary = DrainSummary::default();
        while !self.queue.is_empty() {
            if summary.steps >= self.max_drain_steps {
                tracing::warn!(
                    steps = summary.steps,
                    pending = self.queue.len(),
                    "Drain step limit reached; leaving messages queued"
                );
                summary.step_limit_reached = true;
                break;
            }
            summary.steps += 1;
            match self.process_next(registry, context).await {
                Ok(Some(_)) => summary.replies += 1,
                Ok(None) => {}
                Err(err) => summary.failures.push(err),
            }
        }
        summary
    }

    /// Delivers one targeted copy to every active agent except `from`, immediately.
    ///
    /// Broadcasts bypass the queue: no retries, no processed-log entry, and
    /// replies are discarded.
    pub async fn broadcast(
        &mut self,
        registry: &AgentRegistry,
        context: &CompanyContext,
        from: Role,
        subject: &str,
        body: &str,
        priority: Priority,
    ) -> Result<BroadcastReport, OrchestratorError> {
        if subject.trim().is_empty() {
            return Err(ValidationError::EmptySubject.into());
        }

        let mut report = BroadcastReport::default();
        for (to, agent) in registry.active_agents() {
            if to == from {
                continue;
            }
            let mut message = Message::new(from, to, subject, body).with_priority(priority);
            self.stats.broadcast += 1;

            match self.deliver(&agent, &message, context).await {
                Ok(reply) => {
                    if let Some(reply) = reply {
                        tracing::debug!(reply_id = %reply.id, from = %to, "Discarding reply to broadcast");
                    }
                    if let Err(err) = message.mark_completed() {
                        tracing::error!(message_id = %message.id, error = %err, "Broadcast copy was not pending");
                    }
                    self.events.broadcast_delivered(&message, to);
                    report.delivered.push(message);
                }
                Err(error) => {
                    tracing::warn!(
                        message_id = %message.id,
                        from = %from,
                        to = %to,
                        error = %error,
                        "Broadcast delivery failed"
                    );
                    self.events.broadcast_failed(&message, to, error.to_string());
                    report.failures.push(BroadcastFailure { message, error });
                }
            }
        }

        tracing::debug!(
            from = %from,
            delivered = report.delivered.len(),
            failed = report.failures.len(),
            "Broadcast finished"
        );
        Ok(report)
    }

    async fn deliver(
        &self,
        agent: &Arc<dyn Agent>,
        message: &Message,
        context: &CompanyContext,
    ) -> Result<Option<Message>, AgentError> {
        let reply = call_with_deadline(
            self.agent_timeout,
            agent.handle_incoming_message(message, context),
        )
        .await?;
        if let Some(reply) = &reply {
            validate_routable(reply)?;
        }
        Ok(reply)
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Messages still waiting for delivery, head first.
    pub fn pending(&self) -> impl Iterator<Item = &QueueItem> {
        self.queue.iter()
    }

    /// Completed and blocked messages in the order they were resolved.
    pub fn processed(&self) -> &[ProcessedMessage] {
        &self.processed
    }

    /// Latest processed entry for `id`.
    pub fn processed_message(&self, id: MessageId) -> Option<&ProcessedMessage> {
        self.processed.iter().rev().find(|entry| entry.message.id == id)
    }

    pub fn stats(&self) -> RouterStats {
        self.stats
    }

    /// Drops every queued item and the processed log. Returns the items discarded.
    pub fn clear(&mut self) -> usize {
        let discarded = self.queue.len();
        self.queue.clear();
        self.processed.clear();
        discarded
    }
}
