// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the `CustomerDirectory` trait.

use async_trait::async_trait;

use shopwire_core::ShopwireError;
use shopwire_core::traits::CustomerDirectory;
use shopwire_core::types::CustomerSummary;

use crate::database::Database;
use crate::queries::customers;

/// SQLite-backed customer directory.
#[derive(Clone)]
pub struct SqliteDirectory {
    db: Database,
}

impl SqliteDirectory {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerDirectory for SqliteDirectory {
    async fn list_customers(&self, owner_id: i64) -> Result<Vec<CustomerSummary>, ShopwireError> {
        customers::list_customers(&self.db, owner_id).await
    }

    async fn get_customer(
        &self,
        owner_id: i64,
        customer_id: i64,
    ) -> Result<Option<CustomerSummary>, ShopwireError> {
        customers::get_customer(&self.db, owner_id, customer_id).await
    }

    async fn find_by_phone(
        &self,
        owner_id: i64,
        digits: &str,
    ) -> Result<Option<CustomerSummary>, ShopwireError> {
        customers::find_by_phone(&self.db, owner_id, digits).await
    }

    async fn rename_customer(
        &self,
        owner_id: i64,
        customer_id: i64,
        name: &str,
    ) -> Result<Option<CustomerSummary>, ShopwireError> {
        customers::rename_customer(&self.db, owner_id, customer_id, name).await
    }

    async fn adjust_balance(
        &self,
        owner_id: i64,
        customer_id: i64,
        delta: f64,
    ) -> Result<Option<CustomerSummary>, ShopwireError> {
        customers::adjust_balance(&self.db, owner_id, customer_id, delta).await
    }

    async fn toggle_block(
        &self,
        owner_id: i64,
        customer_id: i64,
    ) -> Result<Option<CustomerSummary>, ShopwireError> {
        customers::toggle_block(&self.db, owner_id, customer_id).await
    }
}
