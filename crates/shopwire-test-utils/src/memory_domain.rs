// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory catalog and customer directory with the same contracts as
//! the SQLite implementations (owner scoping, balance clamping, mutated
//! summaries returned from ground truth).

use async_trait::async_trait;
use tokio::sync::Mutex;

use shopwire_core::ShopwireError;
use shopwire_core::traits::{CatalogStore, CustomerDirectory};
use shopwire_core::types::{CategorySummary, CustomerSummary};

/// In-memory category catalog for tests.
pub struct MemoryCatalog {
    categories: Mutex<Vec<(i64, CategorySummary)>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            categories: Mutex::new(Vec::new()),
        }
    }

    /// Seed a category under the given owner.
    pub async fn insert(&self, owner_id: i64, summary: CategorySummary) {
        self.categories.lock().await.push((owner_id, summary));
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn list_categories(&self, owner_id: i64) -> Result<Vec<CategorySummary>, ShopwireError> {
        let mut found: Vec<CategorySummary> = self
            .categories
            .lock()
            .await
            .iter()
            .filter(|(o, _)| *o == owner_id)
            .map(|(_, c)| c.clone())
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn get_category(
        &self,
        owner_id: i64,
        category_id: i64,
    ) -> Result<Option<CategorySummary>, ShopwireError> {
        Ok(self
            .categories
            .lock()
            .await
            .iter()
            .find(|(o, c)| *o == owner_id && c.id == category_id)
            .map(|(_, c)| c.clone()))
    }

    async fn rename_category(
        &self,
        owner_id: i64,
        category_id: i64,
        name: &str,
    ) -> Result<Option<CategorySummary>, ShopwireError> {
        let mut categories = self.categories.lock().await;
        Ok(categories
            .iter_mut()
            .find(|(o, c)| *o == owner_id && c.id == category_id)
            .map(|(_, c)| {
                c.name = name.to_string();
                c.clone()
            }))
    }

    async fn set_category_price(
        &self,
        owner_id: i64,
        category_id: i64,
        price: f64,
    ) -> Result<Option<CategorySummary>, ShopwireError> {
        let mut categories = self.categories.lock().await;
        Ok(categories
            .iter_mut()
            .find(|(o, c)| *o == owner_id && c.id == category_id)
            .map(|(_, c)| {
                c.price = price;
                c.clone()
            }))
    }

    async fn set_category_sku(
        &self,
        owner_id: i64,
        category_id: i64,
        sku: &str,
    ) -> Result<Option<CategorySummary>, ShopwireError> {
        let mut categories = self.categories.lock().await;
        Ok(categories
            .iter_mut()
            .find(|(o, c)| *o == owner_id && c.id == category_id)
            .map(|(_, c)| {
                c.sku = Some(sku.to_string());
                c.clone()
            }))
    }
}

/// In-memory customer directory for tests.
pub struct MemoryDirectory {
    customers: Mutex<Vec<(i64, CustomerSummary)>>,
    applied_deltas: Mutex<Vec<f64>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self {
            customers: Mutex::new(Vec::new()),
            applied_deltas: Mutex::new(Vec::new()),
        }
    }

    /// Seed a customer under the given owner.
    pub async fn insert(&self, owner_id: i64, summary: CustomerSummary) {
        self.customers.lock().await.push((owner_id, summary));
    }

    /// Every raw delta `adjust_balance` was called with, in order.
    ///
    /// Lets tests assert that callers submit the delta unmodified and
    /// leave clamping to this layer.
    pub async fn applied_deltas(&self) -> Vec<f64> {
        self.applied_deltas.lock().await.clone()
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerDirectory for MemoryDirectory {
    async fn list_customers(&self, owner_id: i64) -> Result<Vec<CustomerSummary>, ShopwireError> {
        let mut found: Vec<CustomerSummary> = self
            .customers
            .lock()
            .await
            .iter()
            .filter(|(o, _)| *o == owner_id)
            .map(|(_, c)| c.clone())
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn get_customer(
        &self,
        owner_id: i64,
        customer_id: i64,
    ) -> Result<Option<CustomerSummary>, ShopwireError> {
        Ok(self
            .customers
            .lock()
            .await
            .iter()
            .find(|(o, c)| *o == owner_id && c.id == customer_id)
            .map(|(_, c)| c.clone()))
    }

    async fn find_by_phone(
        &self,
        owner_id: i64,
        digits: &str,
    ) -> Result<Option<CustomerSummary>, ShopwireError> {
        Ok(self
            .customers
            .lock()
            .await
            .iter()
            .find(|(o, c)| *o == owner_id && c.phone == digits)
            .map(|(_, c)| c.clone()))
    }

    async fn rename_customer(
        &self,
        owner_id: i64,
        customer_id: i64,
        name: &str,
    ) -> Result<Option<CustomerSummary>, ShopwireError> {
        let mut customers = self.customers.lock().await;
        Ok(customers
            .iter_mut()
            .find(|(o, c)| *o == owner_id && c.id == customer_id)
            .map(|(_, c)| {
                c.name = name.to_string();
                c.clone()
            }))
    }

    async fn adjust_balance(
        &self,
        owner_id: i64,
        customer_id: i64,
        delta: f64,
    ) -> Result<Option<CustomerSummary>, ShopwireError> {
        self.applied_deltas.lock().await.push(delta);
        let mut customers = self.customers.lock().await;
        Ok(customers
            .iter_mut()
            .find(|(o, c)| *o == owner_id && c.id == customer_id)
            .map(|(_, c)| {
                // Clamp here: this is the persistence collaborator.
                c.balance = (c.balance + delta).max(0.0);
                c.clone()
            }))
    }

    async fn toggle_block(
        &self,
        owner_id: i64,
        customer_id: i64,
    ) -> Result<Option<CustomerSummary>, ShopwireError> {
        let mut customers = self.customers.lock().await;
        Ok(customers
            .iter_mut()
            .find(|(o, c)| *o == owner_id && c.id == customer_id)
            .map(|(_, c)| {
                c.blocked = !c.blocked;
                c.clone()
            }))
    }
}
