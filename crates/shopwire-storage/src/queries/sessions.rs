// SPDX-FileCopyrightText: 2026 Shopwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session CRUD operations.

use rusqlite::{OptionalExtension, params};
use shopwire_core::ShopwireError;
use shopwire_core::types::{FlowState, RemoteId, SessionRecord};

use crate::database::{Database, map_tr_err};
use crate::models::SessionRow;

const SELECT_COLUMNS: &str =
    "remote_id, owner_id, flow_state, flow_context, created_at, last_interaction_at";

fn row_to_session(row: &rusqlite::Row<'_>) -> Result<SessionRow, rusqlite::Error> {
    Ok(SessionRow {
        remote_id: row.get(0)?,
        owner_id: row.get(1)?,
        flow_state: row.get(2)?,
        flow_context: row.get(3)?,
        created_at: row.get(4)?,
        last_interaction_at: row.get(5)?,
    })
}

/// Get a session by remote identifier. Unknown ids yield `None`.
pub async fn get_session(
    db: &Database,
    remote: &RemoteId,
) -> Result<Option<SessionRecord>, ShopwireError> {
    let remote = remote.as_str().to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM sessions WHERE remote_id = ?1"
            ))?;
            let row = stmt
                .query_row(params![remote], row_to_session)
                .optional()?;
            Ok(row)
        })
        .await
        .map_err(map_tr_err)
        .map(|row| row.map(SessionRow::into_record))
}

/// Create the session on first contact, or refresh owner binding and
/// activity on an existing one. Flow state is preserved across upserts.
pub async fn upsert_session(
    db: &Database,
    remote: &RemoteId,
    owner_id: i64,
) -> Result<SessionRecord, ShopwireError> {
    let remote = remote.as_str().to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO sessions (remote_id, owner_id, flow_state, flow_context, created_at, last_interaction_at)
                 VALUES (?1, ?2, NULL, NULL, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(remote_id) DO UPDATE SET
                     owner_id = excluded.owner_id,
                     last_interaction_at = excluded.last_interaction_at",
                params![remote, owner_id],
            )?;
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM sessions WHERE remote_id = ?1"
            ))?;
            let row = stmt.query_row(params![remote], row_to_session)?;
            Ok(row)
        })
        .await
        .map_err(map_tr_err)
        .map(SessionRow::into_record)
}

/// Update only the activity timestamp.
pub async fn touch_session(db: &Database, remote: &RemoteId) -> Result<(), ShopwireError> {
    let remote = remote.as_str().to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE sessions SET last_interaction_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE remote_id = ?1",
                params![remote],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Replace the flow state; `None` clears both flow columns.
pub async fn set_session_flow(
    db: &Database,
    remote: &RemoteId,
    flow: Option<&FlowState>,
) -> Result<(), ShopwireError> {
    let remote = remote.as_str().to_string();
    let tag = flow.map(|f| f.tag().to_string());
    let context = match flow {
        Some(f) => Some(serde_json::to_string(f).map_err(|e| ShopwireError::Storage {
            source: Box::new(e),
        })?),
        None => None,
    };
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE sessions SET flow_state = ?1, flow_context = ?2,
                     last_interaction_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE remote_id = ?3",
                params![tag, context, remote],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Delete the session record.
pub async fn remove_session(db: &Database, remote: &RemoteId) -> Result<(), ShopwireError> {
    let remote = remote.as_str().to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM sessions WHERE remote_id = ?1", params![remote])?;
            Ok(())
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

    fn remote() -> RemoteId {
        RemoteId("5511987654321".to_string())
    }

    #[tokio::test]
    async fn get_unknown_session_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_session(&db, &remote()).await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn upsert_creates_then_preserves_flow() {
        let (db, _dir) = setup_db().await;
        let created = upsert_session(&db, &remote(), 1).await.unwrap();
        assert_eq!(created.owner_id, 1);
        assert!(created.flow.is_none());

        let flow = FlowState::CategoryRenameInput { category_id: 42 };
        set_session_flow(&db, &remote(), Some(&flow)).await.unwrap();

        // A second upsert must not clear the active flow.
        let again = upsert_session(&db, &remote(), 1).await.unwrap();
        assert_eq!(again.flow, Some(flow));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn upsert_rebinds_owner() {
        let (db, _dir) = setup_db().await;
        upsert_session(&db, &remote(), 1).await.unwrap();
        let rebound = upsert_session(&db, &remote(), 2).await.unwrap();
        assert_eq!(rebound.owner_id, 2);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn set_flow_none_clears() {
        let (db, _dir) = setup_db().await;
        upsert_session(&db, &remote(), 1).await.unwrap();
        let flow = FlowState::CustomerEditBalanceInput { customer_id: 7 };
        set_session_flow(&db, &remote(), Some(&flow)).await.unwrap();
        assert!(get_session(&db, &remote()).await.unwrap().unwrap().flow.is_some());

        set_session_flow(&db, &remote(), None).await.unwrap();
        assert!(get_session(&db, &remote()).await.unwrap().unwrap().flow.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_flow_context_reads_as_idle() {
        let (db, _dir) = setup_db().await;
        upsert_session(&db, &remote(), 1).await.unwrap();

        // Write a state column whose context is missing its payload field.
        let remote_str = remote().as_str().to_string();
        db.connection()
            .call(move |conn| {
                conn.execute(
                    "UPDATE sessions SET flow_state = 'category_price_input',
                         flow_context = '{\"flow\":\"category_price_input\"}'
                     WHERE remote_id = ?1",
                    params![remote_str],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let record = get_session(&db, &remote()).await.unwrap().unwrap();
        assert!(record.flow.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn remove_deletes_the_record() {
        let (db, _dir) = setup_db().await;
        upsert_session(&db, &remote(), 1).await.unwrap();
        remove_session(&db, &remote()).await.unwrap();
        assert!(get_session(&db, &remote()).await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn touch_updates_activity_timestamp() {
        let (db, _dir) = setup_db().await;
        upsert_session(&db, &remote(), 1).await.unwrap();

        // Force a distinct stored timestamp, then touch.
        let remote_str = remote().as_str().to_string();
        db.connection()
            .call(move |conn| {
                conn.execute(
                    "UPDATE sessions SET last_interaction_at = '2000-01-01T00:00:00.000Z'
                     WHERE remote_id = ?1",
                    params![remote_str],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        touch_session(&db, &remote()).await.unwrap();
        let record = get_session(&db, &remote()).await.unwrap().unwrap();
        assert_ne!(record.last_interaction_at, "2000-01-01T00:00:00.000Z");
        db.close().await.unwrap();
    }
}
