// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer directory trait: lookup and mutation of storefront customers.

use async_trait::async_trait;

use crate::error::ShopwireError;
use crate::types::CustomerSummary;

/// Owner-scoped access to storefront customers.
///
/// Mutations return the updated summary, or `None` when the target no
/// longer exists. `adjust_balance` clamps the resulting balance to be
/// non-negative at this layer; callers submit the raw delta.
#[async_trait]
pub trait CustomerDirectory: Send + Sync + 'static {
    async fn list_customers(&self, owner_id: i64) -> Result<Vec<CustomerSummary>, ShopwireError>;

    async fn get_customer(
        &self,
        owner_id: i64,
        customer_id: i64,
    ) -> Result<Option<CustomerSummary>, ShopwireError>;

    /// Look up a customer by digits-only phone number or messaging id.
    async fn find_by_phone(
        &self,
        owner_id: i64,
        digits: &str,
    ) -> Result<Option<CustomerSummary>, ShopwireError>;

    async fn rename_customer(
        &self,
        owner_id: i64,
        customer_id: i64,
        name: &str,
    ) -> Result<Option<CustomerSummary>, ShopwireError>;

    /// Apply a signed delta to the customer's balance.
    async fn adjust_balance(
        &self,
        owner_id: i64,
        customer_id: i64,
        delta: f64,
    ) -> Result<Option<CustomerSummary>, ShopwireError>;

    /// Flip the customer's block flag.
    async fn toggle_block(
        &self,
        owner_id: i64,
        customer_id: i64,
    ) -> Result<Option<CustomerSummary>, ShopwireError>;
}
