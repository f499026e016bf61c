// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory `SessionStore` with the same last-write-wins semantics as
//! the SQLite implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shopwire_core::ShopwireError;
use shopwire_core::traits::SessionStore;
use shopwire_core::types::{FlowState, RemoteId, SessionRecord};

/// In-memory session store for tests.
pub struct MemorySessionStore {
    map: Mutex<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
        }
    }

    fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, remote: &RemoteId) -> Result<Option<SessionRecord>, ShopwireError> {
        Ok(self.map.lock().await.get(remote.as_str()).cloned())
    }

    async fn upsert(
        &self,
        remote: &RemoteId,
        owner_id: i64,
    ) -> Result<SessionRecord, ShopwireError> {
        let mut map = self.map.lock().await;
        let record = map
            .entry(remote.as_str().to_string())
            .and_modify(|r| {
                r.owner_id = owner_id;
                r.last_interaction_at = Self::now();
            })
            .or_insert_with(|| SessionRecord {
                remote_id: remote.clone(),
                owner_id,
                flow: None,
                created_at: Self::now(),
                last_interaction_at: Self::now(),
            });
        Ok(record.clone())
    }

    async fn touch(&self, remote: &RemoteId) -> Result<(), ShopwireError> {
        if let Some(r) = self.map.lock().await.get_mut(remote.as_str()) {
            r.last_interaction_at = Self::now();
        }
        Ok(())
    }

    async fn set_flow(
        &self,
        remote: &RemoteId,
        flow: Option<&FlowState>,
    ) -> Result<(), ShopwireError> {
        if let Some(r) = self.map.lock().await.get_mut(remote.as_str()) {
            r.flow = flow.cloned();
            r.last_interaction_at = Self::now();
        }
        Ok(())
    }

    async fn remove(&self, remote: &RemoteId) -> Result<(), ShopwireError> {
        self.map.lock().await.remove(remote.as_str());
        Ok(())
    }
}
