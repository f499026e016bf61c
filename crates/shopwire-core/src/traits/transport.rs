// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport trait: the messaging platform's "send message" primitive.

use async_trait::async_trait;

use crate::error::ShopwireError;
use crate::types::{MessageId, OutboundPayload, RemoteId};

/// Delivers a structured payload to a remote contact.
///
/// Implementations own all HTTP concerns; the engine only builds payload
/// structures and hands them over.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(
        &self,
        to: &RemoteId,
        payload: &OutboundPayload,
    ) -> Result<MessageId, ShopwireError>;
}
