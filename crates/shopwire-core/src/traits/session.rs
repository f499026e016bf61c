// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session store trait: one durable record per remote messaging identifier.

use async_trait::async_trait;

use crate::error::ShopwireError;
use crate::types::{FlowState, RemoteId, SessionRecord};

/// Durable per-contact session storage.
///
/// Implementations must make `upsert` and `set_flow` last-write-wins per
/// remote identifier; the engine never serializes concurrent events for
/// the same contact.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Fetch the session for a remote identifier. Unknown ids yield `None`,
    /// never a default record.
    async fn get(&self, remote: &RemoteId) -> Result<Option<SessionRecord>, ShopwireError>;

    /// Create the session on first contact, or return the existing one.
    ///
    /// Idempotent: an existing session keeps its flow state. Rebinding the
    /// identifier to a different owner overwrites the owner.
    async fn upsert(
        &self,
        remote: &RemoteId,
        owner_id: i64,
    ) -> Result<SessionRecord, ShopwireError>;

    /// Update only the activity timestamp.
    async fn touch(&self, remote: &RemoteId) -> Result<(), ShopwireError>;

    /// Replace the flow state; `None` clears it back to idle.
    async fn set_flow(
        &self,
        remote: &RemoteId,
        flow: Option<&FlowState>,
    ) -> Result<(), ShopwireError>;

    /// Delete the session record.
    async fn remove(&self, remote: &RemoteId) -> Result<(), ShopwireError>;
}
