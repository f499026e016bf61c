// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw row types and their conversion into the domain types from
//! `shopwire-core`.

use shopwire_core::types::{FlowState, RemoteId, SessionRecord};

/// A session row exactly as stored: the flow is split into a state-name
/// column and a serialized context payload.
#[derive(Debug, Clone)]
pub struct SessionRow {
    pub remote_id: String,
    pub owner_id: i64,
    pub flow_state: Option<String>,
    pub flow_context: Option<String>,
    pub created_at: String,
    pub last_interaction_at: String,
}

impl SessionRow {
    /// Convert into a [`SessionRecord`], discarding any flow whose context
    /// payload is missing, unparseable, or whose embedded tag disagrees
    /// with the state-name column. A corrupt or schema-drifted flow must
    /// read as "idle", never wedge the session.
    pub fn into_record(self) -> SessionRecord {
        let flow = decode_flow(self.flow_state.as_deref(), self.flow_context.as_deref());
        SessionRecord {
            remote_id: RemoteId(self.remote_id),
            owner_id: self.owner_id,
            flow,
            created_at: self.created_at,
            last_interaction_at: self.last_interaction_at,
        }
    }
}

/// Decode a stored (state-name, context) pair into a [`FlowState`].
///
/// Returns `None` unless the context deserializes and its embedded tag
/// matches the state-name column.
pub fn decode_flow(tag: Option<&str>, context: Option<&str>) -> Option<FlowState> {
    let tag = tag?;
    let context = context?;
    let parsed: FlowState = serde_json::from_str(context).ok()?;
    if parsed.tag() == tag { Some(parsed) } else { None }
}
