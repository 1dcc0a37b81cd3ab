use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tracing::info;

use super::{MailError, MailTransport, OutgoingEmail};

/// How many emails the outbox holds before the oldest are discarded.
pub const DEFAULT_OUTBOX_CAPACITY: usize = 50;

/// Keeps sent emails in memory instead of delivering them.
///
/// Selected with `MAIL_TRANSPORT=memory` for local development, and handy as
/// a recording transport in tests. Only the most recent emails are kept.
#[derive(Clone)]
pub struct MemoryTransport {
    outbox: Arc<Mutex<VecDeque<OutgoingEmail>>>,
    capacity: usize,
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_OUTBOX_CAPACITY)
    }
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// An outbox keeping at most `capacity` emails (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outbox: Arc::new(Mutex::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    /// Snapshot of the retained emails, oldest first.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.outbox
            .lock()
            .map(|outbox| outbox.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn sent_count(&self) -> usize {
        self.outbox.lock().map(|outbox| outbox.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl MailTransport for MemoryTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            attachments = email.attachments.len(),
            "Email captured in memory (not delivered)"
        );

        let mut outbox = self
            .outbox
            .lock()
            .map_err(|_| MailError::Transport("memory outbox poisoned".to_string()))?;
        while outbox.len() >= self.capacity {
            outbox.pop_front();
        }
        outbox.push_back(email.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
