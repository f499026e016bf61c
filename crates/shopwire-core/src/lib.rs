// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Shopwire storefront.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Shopwire workspace. The conversational
//! engine, persistence layer, and messaging integration all depend on the
//! seams defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ShopwireError;
pub use types::{FlowState, InboundEvent, MessageId, OutboundPayload, RemoteId, SessionRecord};

pub use traits::{CatalogStore, CustomerDirectory, SessionStore, Transport};
