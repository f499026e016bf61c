// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shopwire serve` command implementation.
//!
//! Opens storage, builds the Cloud API transport and the flow engine,
//! and serves the webhook gateway until interrupted.

use std::sync::Arc;

use tracing::{info, warn};

use shopwire_config::ShopwireConfig;
use shopwire_core::ShopwireError;
use shopwire_core::traits::Transport;
use shopwire_engine::{Dispatcher, FlowEngine};
use shopwire_gateway::{GatewayState, ServerConfig};
use shopwire_storage::{Database, SqliteCatalog, SqliteDirectory, SqliteSessionStore};
use shopwire_whatsapp::CloudApiTransport;

pub async fn run(config: ShopwireConfig) -> Result<(), ShopwireError> {
    shopwire_engine::dispatch::register_metrics();

    if config.whatsapp.admins.is_empty() {
        warn!("whatsapp.admins is empty: every inbound sender will be ignored");
    }

    let db = Database::open(&config.storage.database_path).await?;
    let sessions = Arc::new(SqliteSessionStore::new(db.clone()));
    let catalog = Arc::new(SqliteCatalog::new(db.clone()));
    let directory = Arc::new(SqliteDirectory::new(db.clone()));

    let transport: Arc<dyn Transport> = Arc::new(CloudApiTransport::new(&config.whatsapp)?);
    let engine = Arc::new(FlowEngine::new(
        sessions,
        catalog,
        directory,
        Dispatcher::new(transport),
    ));

    let admins = config
        .whatsapp
        .admins
        .iter()
        .map(|a| (a.phone.clone(), a.owner_id))
        .collect();

    let state = GatewayState {
        engine,
        admins: Arc::new(admins),
        verify_token: config.whatsapp.verify_token.clone(),
    };

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    info!(
        host = %server_config.host,
        port = server_config.port,
        admins = config.whatsapp.admins.len(),
        "starting shopwire"
    );

    tokio::select! {
        result = shopwire_gateway::start_server(&server_config, state) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
            db.close().await?;
            Ok(())
        }
    }
}
