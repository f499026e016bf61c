// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the seams of the conversational engine.

pub mod catalog;
pub mod directory;
pub mod session;
pub mod transport;

pub use catalog::CatalogStore;
pub use directory::CustomerDirectory;
pub use session::SessionStore;
pub use transport::Transport;
