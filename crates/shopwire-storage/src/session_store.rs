// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the `SessionStore` trait.

use async_trait::async_trait;

use shopwire_core::ShopwireError;
use shopwire_core::traits::SessionStore;
use shopwire_core::types::{FlowState, RemoteId, SessionRecord};

use crate::database::Database;
use crate::queries::sessions;

/// SQLite-backed session store.
///
/// Wraps a [`Database`] handle and delegates to the typed session queries.
/// Writes are last-write-wins per remote identifier by virtue of the
/// single writer thread.
#[derive(Clone)]
pub struct SqliteSessionStore {
    db: Database,
}

impl SqliteSessionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn get(&self, remote: &RemoteId) -> Result<Option<SessionRecord>, ShopwireError> {
        sessions::get_session(&self.db, remote).await
    }

    async fn upsert(
        &self,
        remote: &RemoteId,
        owner_id: i64,
    ) -> Result<SessionRecord, ShopwireError> {
        sessions::upsert_session(&self.db, remote, owner_id).await
    }

    async fn touch(&self, remote: &RemoteId) -> Result<(), ShopwireError> {
        sessions::touch_session(&self.db, remote).await
    }

    async fn set_flow(
        &self,
        remote: &RemoteId,
        flow: Option<&FlowState>,
    ) -> Result<(), ShopwireError> {
        sessions::set_session_flow(&self.db, remote, flow).await
    }

    async fn remove(&self, remote: &RemoteId) -> Result<(), ShopwireError> {
        sessions::remove_session(&self.db, remote).await
    }
}
