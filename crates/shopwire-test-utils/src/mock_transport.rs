// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock transport for deterministic testing.
//!
//! `MockTransport` implements [`Transport`] with captured outbound payloads
//! for assertion in tests and a failure toggle to exercise delivery-failure
//! containment.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use shopwire_core::traits::Transport;
use shopwire_core::types::{MessageId, OutboundPayload, RemoteId};
use shopwire_core::ShopwireError;

/// A mock messaging transport for testing.
///
/// Payloads passed to `send()` are captured and retrievable via
/// `sent()`. Flip `set_failing(true)` to make every send fail.
pub struct MockTransport {
    sent: Arc<Mutex<Vec<(RemoteId, OutboundPayload)>>>,
    failing: AtomicBool,
    counter: AtomicU64,
}

impl MockTransport {
    /// Create a new mock transport with an empty capture buffer.
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            failing: AtomicBool::new(false),
            counter: AtomicU64::new(0),
        }
    }

    /// All payloads sent so far, in order, with their recipients.
    pub async fn sent(&self) -> Vec<(RemoteId, OutboundPayload)> {
        self.sent.lock().await.clone()
    }

    /// Number of payloads sent so far.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// The most recently sent payload, if any.
    pub async fn last_sent(&self) -> Option<OutboundPayload> {
        self.sent.lock().await.last().map(|(_, p)| p.clone())
    }

    /// Clear the capture buffer.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }

    /// Make every subsequent send fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        to: &RemoteId,
        payload: &OutboundPayload,
    ) -> Result<MessageId, ShopwireError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ShopwireError::Transport {
                message: "mock transport failure".to_string(),
                source: None,
            });
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().await.push((to.clone(), payload.clone()));
        Ok(MessageId(format!("mock-msg-{n}")))
    }
}
