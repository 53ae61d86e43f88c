use boardroom_protocol::Role;
use chrono::DateTime;
use chrono::Utc;
use std::collections::VecDeque;
use tokio::sync::Mutex;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// Text received from another agent.
    Peer(Role),
    /// Text this agent produced.
    Own,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// Agent-private conversation log. Oldest entries are evicted past `capacity`.
pub struct ConversationHistory {
    capacity: usize,
    entries: Mutex<VecDeque<HistoryEntry>>,
}

impl ConversationHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::new()),
        }
    }

    pub async fn push(&self, entry: HistoryEntry) {
        let mut entries = self.entries.lock().await;
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Records a received entry and the answer to it under one lock, so a
    /// cancelled call never leaves half an exchange behind.
    pub async fn push_exchange(&self, received: HistoryEntry, answer: HistoryEntry) {
        let mut entries = self.entries.lock().await;
        for entry in [received, answer] {
            if entries.len() == self.capacity {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }

    pub async fn snapshot(&self) -> Vec<HistoryEntry> {
        let entries = self.entries.lock().await;
        entries.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        entries.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
