//! Unit of work held by the router.

use boardroom_protocol::Message;
use boardroom_protocol::Role;

/// What happens to a queue item after a failed delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Requeue at the tail; `retries` is the updated count.
    Retry { retries: u32 },
    /// Retry budget spent; the message must be blocked.
    Exhausted,
}

/// A pending message plus its retry bookkeeping.
///
/// The same item travels back to the tail of the queue on every retry, so the
/// counter survives across attempts. `retries` never exceeds `max_retries`.
#[derive(Debug, Clone)]
pub struct QueueItem {
    pub message: Message,
    pub target: Role,
    retries: u32,
    max_retries: u32,
}

impl QueueItem {
    pub fn new(message: Message, target: Role, max_retries: u32) -> Self {
        Self {
            message,
            target,
            retries: 0,
            max_retries,
        }
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Deliveries attempted so far, counting the one in progress.
    pub fn attempts(&self) -> u32 {
        self.retries + 1
    }

    pub fn record_failure(&mut self) -> RetryDecision {
        if self.retries < self.max_retries {
            self.retries += 1;
            RetryDecision::Retry {
                retries: self.retries,
            }
        } else {
            RetryDecision::Exhausted
        }
    }
}
