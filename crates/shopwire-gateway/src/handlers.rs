// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the webhook gateway.
//!
//! Handles GET /webhook (subscription verification), POST /webhook
//! (event delivery), and GET /health.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};

use shopwire_whatsapp::{WebhookEnvelope, extract_events};

use crate::server::GatewayState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health: unauthenticated liveness probe.
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /webhook: the platform's subscription handshake.
///
/// Echoes `hub.challenge` when `hub.mode` is `subscribe` and
/// `hub.verify_token` matches the configured secret; 403 otherwise.
pub async fn verify_webhook(
    State(state): State<GatewayState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match verification_challenge(state.verify_token.as_deref(), &params) {
        Some(challenge) => (StatusCode::OK, challenge).into_response(),
        None => StatusCode::FORBIDDEN.into_response(),
    }
}

/// Pure handshake check, split out for direct testing.
pub fn verification_challenge(
    expected_token: Option<&str>,
    params: &HashMap<String, String>,
) -> Option<String> {
    let expected = expected_token?;
    if params.get("hub.mode").map(String::as_str) != Some("subscribe") {
        return None;
    }
    if params.get("hub.verify_token").map(String::as_str) != Some(expected) {
        return None;
    }
    params.get("hub.challenge").cloned()
}

/// POST /webhook: event delivery.
///
/// Always acknowledges with 200 so the platform does not retry; a non-2xx
/// here would redeliver the batch and double-apply side effects. Events
/// from senders not in the admin list are dropped before the engine sees
/// them (empty list rejects everyone).
pub async fn receive_webhook(
    State(state): State<GatewayState>,
    Json(envelope): Json<WebhookEnvelope>,
) -> StatusCode {
    for (remote, event) in extract_events(&envelope) {
        metrics::counter!("shopwire_webhook_events_total").increment(1);

        let Some(owner_id) = state.admins.get(remote.as_str()).copied() else {
            debug!(remote = %remote, "ignoring event from non-admin sender");
            continue;
        };

        if let Err(e) = state.engine.handle(&remote, owner_id, event).await {
            // Storage trouble: log it, still acknowledge the batch.
            error!(remote = %remote, error = %e, "failed to process inbound event");
        }
    }

    StatusCode::OK
}
