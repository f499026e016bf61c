// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound dispatcher: best-effort delivery with failure containment.
//!
//! Delivery is decoupled from the correctness of the state machine: a
//! failed send is logged and counted, never raised, and never retried.
//! Whatever state transition or mutation preceded the send stands.

use std::sync::Arc;

use tracing::{debug, warn};

use shopwire_core::traits::Transport;
use shopwire_core::types::{OutboundPayload, RemoteId};

/// Wraps the transport's send primitive with logging and containment.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Deliver `payload` to `to`. Returns `false` when the transport
    /// failed; never propagates the error.
    pub async fn send(
        &self,
        to: &RemoteId,
        payload: OutboundPayload,
        success_log: &str,
        failure_log: &str,
    ) -> bool {
        match self.transport.send(to, &payload).await {
            Ok(message_id) => {
                debug!(remote = %to, message_id = %message_id.0, "{success_log}");
                metrics::counter!("shopwire_deliveries_total").increment(1);
                true
            }
            Err(e) => {
                warn!(remote = %to, error = %e, "{failure_log}");
                metrics::counter!("shopwire_delivery_failures_total").increment(1);
                false
            }
        }
    }
}

/// Register metric descriptions for the dispatcher counters.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    metrics::describe_counter!(
        "shopwire_deliveries_total",
        "Messages successfully handed to the transport"
    );
    metrics::describe_counter!(
        "shopwire_delivery_failures_total",
        "Messages the transport failed to deliver"
    );
    metrics::describe_counter!(
        "shopwire_events_total",
        "Inbound conversational events processed"
    );
}
