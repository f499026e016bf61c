// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Shopwire storefront.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed CRUD
//! operations for sessions, categories, and customers.

pub mod catalog;
pub mod database;
pub mod directory;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod session_store;

pub use catalog::SqliteCatalog;
pub use database::Database;
pub use directory::SqliteDirectory;
pub use models::SessionRow;
pub use session_store::SqliteSessionStore;
