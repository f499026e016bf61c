// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer lookup and mutation operations, owner-scoped.
//!
//! Balance adjustments clamp the result to be non-negative here, at the
//! persistence layer; callers always submit the raw signed delta.

use rusqlite::{OptionalExtension, params};
use shopwire_core::ShopwireError;
use shopwire_core::types::CustomerSummary;

use crate::database::{Database, map_tr_err};

const SELECT_COLUMNS: &str = "id, name, phone, balance, blocked, purchase_count";

fn row_to_customer(row: &rusqlite::Row<'_>) -> Result<CustomerSummary, rusqlite::Error> {
    Ok(CustomerSummary {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        balance: row.get(3)?,
        blocked: row.get::<_, i64>(4)? != 0,
        purchase_count: row.get(5)?,
    })
}

/// Insert a customer and return its summary.
pub async fn create_customer(
    db: &Database,
    owner_id: i64,
    name: &str,
    phone: &str,
    balance: f64,
) -> Result<CustomerSummary, ShopwireError> {
    let name = name.to_string();
    let phone = phone.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO customers (owner_id, name, phone, balance) VALUES (?1, ?2, ?3, ?4)",
                params![owner_id, name, phone, balance],
            )?;
            let id = conn.last_insert_rowid();
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM customers WHERE id = ?1"
            ))?;
            let summary = stmt.query_row(params![id], row_to_customer)?;
            Ok(summary)
        })
        .await
        .map_err(map_tr_err)
}

/// List all customers for an owner, ordered by name.
pub async fn list_customers(
    db: &Database,
    owner_id: i64,
) -> Result<Vec<CustomerSummary>, ShopwireError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM customers WHERE owner_id = ?1 ORDER BY name"
            ))?;
            let rows = stmt.query_map(params![owner_id], row_to_customer)?;
            let mut customers = Vec::new();
            for row in rows {
                customers.push(row?);
            }
            Ok(customers)
        })
        .await
        .map_err(map_tr_err)
}

/// Get one customer by id, owner-scoped.
pub async fn get_customer(
    db: &Database,
    owner_id: i64,
    customer_id: i64,
) -> Result<Option<CustomerSummary>, ShopwireError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM customers WHERE id = ?1 AND owner_id = ?2"
            ))?;
            let row = stmt
                .query_row(params![customer_id, owner_id], row_to_customer)
                .optional()?;
            Ok(row)
        })
        .await
        .map_err(map_tr_err)
}

/// Look up a customer by digits-only phone number.
pub async fn find_by_phone(
    db: &Database,
    owner_id: i64,
    digits: &str,
) -> Result<Option<CustomerSummary>, ShopwireError> {
    let digits = digits.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM customers WHERE owner_id = ?1 AND phone = ?2"
            ))?;
            let row = stmt
                .query_row(params![owner_id, digits], row_to_customer)
                .optional()?;
            Ok(row)
        })
        .await
        .map_err(map_tr_err)
}

/// Rename a customer, returning the updated summary.
pub async fn rename_customer(
    db: &Database,
    owner_id: i64,
    customer_id: i64,
    name: &str,
) -> Result<Option<CustomerSummary>, ShopwireError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE customers SET name = ?1 WHERE id = ?2 AND owner_id = ?3",
                params![name, customer_id, owner_id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            read_back(conn, customer_id, owner_id)
        })
        .await
        .map_err(map_tr_err)
}

/// Apply a signed delta to the customer's balance, clamped non-negative.
pub async fn adjust_balance(
    db: &Database,
    owner_id: i64,
    customer_id: i64,
    delta: f64,
) -> Result<Option<CustomerSummary>, ShopwireError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE customers SET balance = MAX(0, balance + ?1)
                 WHERE id = ?2 AND owner_id = ?3",
                params![delta, customer_id, owner_id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            read_back(conn, customer_id, owner_id)
        })
        .await
        .map_err(map_tr_err)
}

/// Flip the customer's block flag.
pub async fn toggle_block(
    db: &Database,
    owner_id: i64,
    customer_id: i64,
) -> Result<Option<CustomerSummary>, ShopwireError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE customers SET blocked = 1 - blocked WHERE id = ?1 AND owner_id = ?2",
                params![customer_id, owner_id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            read_back(conn, customer_id, owner_id)
        })
        .await
        .map_err(map_tr_err)
}

fn read_back(
    conn: &rusqlite::Connection,
    customer_id: i64,
    owner_id: i64,
) -> Result<Option<CustomerSummary>, tokio_rusqlite::Error> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS} FROM customers WHERE id = ?1 AND owner_id = ?2"
    ))?;
    let row = stmt
        .query_row(params![customer_id, owner_id], row_to_customer)
        .optional()?;
    Ok(row)
}
