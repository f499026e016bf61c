// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for the Shopwire workspace.
//!
//! Provides a recording mock transport and in-memory implementations of
//! the session store, catalog, and customer directory traits so engine
//! behavior can be tested deterministically, with no database or network.

pub mod memory_domain;
pub mod memory_sessions;
pub mod mock_transport;

pub use memory_domain::{MemoryCatalog, MemoryDirectory};
pub use memory_sessions::MemorySessionStore;
pub use mock_transport::MockTransport;
