// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Category lookup and mutation operations, owner-scoped.

use rusqlite::{OptionalExtension, params};
use shopwire_core::ShopwireError;
use shopwire_core::types::CategorySummary;

use crate::database::{Database, map_tr_err};

const SELECT_COLUMNS: &str = "id, name, price, sku, stock_count";

fn row_to_category(row: &rusqlite::Row<'_>) -> Result<CategorySummary, rusqlite::Error> {
    Ok(CategorySummary {
        id: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
        sku: row.get(3)?,
        stock_count: row.get(4)?,
    })
}

/// Insert a category and return its summary.
pub async fn create_category(
    db: &Database,
    owner_id: i64,
    name: &str,
    price: f64,
    sku: Option<&str>,
) -> Result<CategorySummary, ShopwireError> {
    let name = name.to_string();
    let sku = sku.map(str::to_string);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO categories (owner_id, name, price, sku) VALUES (?1, ?2, ?3, ?4)",
                params![owner_id, name, price, sku],
            )?;
            let id = conn.last_insert_rowid();
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM categories WHERE id = ?1"
            ))?;
            let summary = stmt.query_row(params![id], row_to_category)?;
            Ok(summary)
        })
        .await
        .map_err(map_tr_err)
}

/// List all categories for an owner, ordered by name.
pub async fn list_categories(
    db: &Database,
    owner_id: i64,
) -> Result<Vec<CategorySummary>, ShopwireError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM categories WHERE owner_id = ?1 ORDER BY name"
            ))?;
            let rows = stmt.query_map(params![owner_id], row_to_category)?;
            let mut categories = Vec::new();
            for row in rows {
                categories.push(row?);
            }
            Ok(categories)
        })
        .await
        .map_err(map_tr_err)
}

/// Get one category by id, owner-scoped.
pub async fn get_category(
    db: &Database,
    owner_id: i64,
    category_id: i64,
) -> Result<Option<CategorySummary>, ShopwireError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM categories WHERE id = ?1 AND owner_id = ?2"
            ))?;
            let row = stmt
                .query_row(params![category_id, owner_id], row_to_category)
                .optional()?;
            Ok(row)
        })
        .await
        .map_err(map_tr_err)
}

/// Rename a category, returning the updated summary, or `None` when the
/// target no longer exists.
pub async fn rename_category(
    db: &Database,
    owner_id: i64,
    category_id: i64,
    name: &str,
) -> Result<Option<CategorySummary>, ShopwireError> {
    let name = name.to_string();
    update_category(
        db,
        owner_id,
        category_id,
        "UPDATE categories SET name = ?1 WHERE id = ?2 AND owner_id = ?3",
        rusqlite::types::Value::from(name),
    )
    .await
}

/// Set a category's price, returning the updated summary.
pub async fn set_category_price(
    db: &Database,
    owner_id: i64,
    category_id: i64,
    price: f64,
) -> Result<Option<CategorySummary>, ShopwireError> {
    update_category(
        db,
        owner_id,
        category_id,
        "UPDATE categories SET price = ?1 WHERE id = ?2 AND owner_id = ?3",
        rusqlite::types::Value::from(price),
    )
    .await
}

/// Set a category's SKU, returning the updated summary.
pub async fn set_category_sku(
    db: &Database,
    owner_id: i64,
    category_id: i64,
    sku: &str,
) -> Result<Option<CategorySummary>, ShopwireError> {
    let sku = sku.to_string();
    update_category(
        db,
        owner_id,
        category_id,
        "UPDATE categories SET sku = ?1 WHERE id = ?2 AND owner_id = ?3",
        rusqlite::types::Value::from(sku),
    )
    .await
}

/// Run a single-column update and read the row back, or `None` when no
/// row matched.
async fn update_category(
    db: &Database,
    owner_id: i64,
    category_id: i64,
    sql: &'static str,
    value: rusqlite::types::Value,
) -> Result<Option<CategorySummary>, ShopwireError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(sql, params![value, category_id, owner_id])?;
            if changed == 0 {
                return Ok(None);
            }
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM categories WHERE id = ?1 AND owner_id = ?2"
            ))?;
            let row = stmt
                .query_row(params![category_id, owner_id], row_to_category)
                .optional()?;
            Ok(row)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn create_and_list_are_owner_scoped() {
        let (db, _dir) = setup_db().await;
        create_category(&db, 1, "Streaming", 9.9, Some("STRM")).await.unwrap();
        create_category(&db, 2, "Gaming", 19.9, None).await.unwrap();

        let owner_one = list_categories(&db, 1).await.unwrap();
        assert_eq!(owner_one.len(), 1);
        assert_eq!(owner_one[0].name, "Streaming");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn rename_returns_updated_summary() {
        let (db, _dir) = setup_db().await;
        let created = create_category(&db, 1, "Old Name", 5.0, None).await.unwrap();

        let updated = rename_category(&db, 1, created.id, "New Name")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.id, created.id);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn mutating_a_missing_category_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(rename_category(&db, 1, 999, "x").await.unwrap().is_none());
        assert!(set_category_price(&db, 1, 999, 1.0).await.unwrap().is_none());
        assert!(set_category_sku(&db, 1, 999, "SKU1").await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn mutations_do_not_cross_owners() {
        let (db, _dir) = setup_db().await;
        let created = create_category(&db, 1, "Mine", 5.0, None).await.unwrap();
        // Another owner cannot rename it.
        assert!(rename_category(&db, 2, created.id, "Stolen").await.unwrap().is_none());
        let unchanged = get_category(&db, 1, created.id).await.unwrap().unwrap();
        assert_eq!(unchanged.name, "Mine");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn price_and_sku_update() {
        let (db, _dir) = setup_db().await;
        let created = create_category(&db, 1, "Cat", 5.0, None).await.unwrap();

        let priced = set_category_price(&db, 1, created.id, 12.5).await.unwrap().unwrap();
        assert_eq!(priced.price, 12.5);

        let skued = set_category_sku(&db, 1, created.id, "CAT12").await.unwrap().unwrap();
        assert_eq!(skued.sku.as_deref(), Some("CAT12"));

        db.close().await.unwrap();
    }
}
