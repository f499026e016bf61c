// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use shopwire_core::ShopwireError;
use shopwire_engine::FlowEngine;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The conversational engine events are handed to.
    pub engine: Arc<FlowEngine>,
    /// Digits-only admin phone number -> owning tenant id.
    pub admins: Arc<HashMap<String, i64>>,
    /// Shared secret for the subscription handshake.
    pub verify_token: Option<String>,
}

/// Gateway server configuration (mirrors `server` in shopwire-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Build the gateway router. Split from [`start_server`] for tests.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route(
            "/webhook",
            get(handlers::verify_webhook).post(handlers::receive_webhook),
        )
        .route("/health", get(handlers::get_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve the webhook gateway.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), ShopwireError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ShopwireError::Transport {
                message: format!("failed to bind gateway to {addr}: {e}"),
                source: Some(Box::new(e)),
            })?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| ShopwireError::Transport {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
