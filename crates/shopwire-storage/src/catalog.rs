// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the `CatalogStore` trait.

use async_trait::async_trait;

use shopwire_core::ShopwireError;
use shopwire_core::traits::CatalogStore;
use shopwire_core::types::CategorySummary;

use crate::database::Database;
use crate::queries::categories;

/// SQLite-backed category catalog.
#[derive(Clone)]
pub struct SqliteCatalog {
    db: Database,
}

impl SqliteCatalog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    async fn list_categories(&self, owner_id: i64) -> Result<Vec<CategorySummary>, ShopwireError> {
        categories::list_categories(&self.db, owner_id).await
    }

    async fn get_category(
        &self,
        owner_id: i64,
        category_id: i64,
    ) -> Result<Option<CategorySummary>, ShopwireError> {
        categories::get_category(&self.db, owner_id, category_id).await
    }

    async fn rename_category(
        &self,
        owner_id: i64,
        category_id: i64,
        name: &str,
    ) -> Result<Option<CategorySummary>, ShopwireError> {
        categories::rename_category(&self.db, owner_id, category_id, name).await
    }

    async fn set_category_price(
        &self,
        owner_id: i64,
        category_id: i64,
        price: f64,
    ) -> Result<Option<CategorySummary>, ShopwireError> {
        categories::set_category_price(&self.db, owner_id, category_id, price).await
    }

    async fn set_category_sku(
        &self,
        owner_id: i64,
        category_id: i64,
        sku: &str,
    ) -> Result<Option<CategorySummary>, ShopwireError> {
        categories::set_category_sku(&self.db, owner_id, category_id, sku).await
    }
}
