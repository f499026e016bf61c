// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog trait: category lookup and mutation, keyed by numeric id.

use async_trait::async_trait;

use crate::error::ShopwireError;
use crate::types::CategorySummary;

/// Owner-scoped access to sales categories.
///
/// Mutations return the updated summary so callers can confirm from
/// ground truth, or `None` when the target no longer exists.
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    async fn list_categories(&self, owner_id: i64) -> Result<Vec<CategorySummary>, ShopwireError>;

    async fn get_category(
        &self,
        owner_id: i64,
        category_id: i64,
    ) -> Result<Option<CategorySummary>, ShopwireError>;

    async fn rename_category(
        &self,
        owner_id: i64,
        category_id: i64,
        name: &str,
    ) -> Result<Option<CategorySummary>, ShopwireError>;

    async fn set_category_price(
        &self,
        owner_id: i64,
        category_id: i64,
        price: f64,
    ) -> Result<Option<CategorySummary>, ShopwireError>;

    async fn set_category_sku(
        &self,
        owner_id: i64,
        category_id: i64,
        sku: &str,
    ) -> Result<Option<CategorySummary>, ShopwireError>;
}
