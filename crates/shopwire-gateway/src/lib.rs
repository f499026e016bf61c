// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook HTTP gateway for the Shopwire conversational dashboard.
//!
//! Exposes the platform's subscription handshake and event delivery
//! endpoints, authorizes senders against the configured admin list, and
//! hands events to the flow engine.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, router, start_server};
