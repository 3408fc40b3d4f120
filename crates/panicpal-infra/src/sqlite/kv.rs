//! SQLite key-value store implementation.
//!
//! Implements `KvStore` from `panicpal-core` using sqlx with split read/write
//! pools. Values are stored verbatim; callers own the encoding.

use chrono::Utc;
use panicpal_core::storage::kv_store::KvStore;
use panicpal_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `KvStore`.
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: DatabasePool,
}

impl SqliteKvStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Pool and I/O failures mean the database is unreachable; anything else is a
/// failed statement.
fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(row) => {
                let value: String = row
                    .try_get("value")
                    .map_err(map_sqlx_error)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO kv_store (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        let mut keys = Vec::with_capacity(rows.len());
        for row in &rows {
            let key: String = row
                .try_get("key")
                .map_err(map_sqlx_error)?;
            keys.push(key);
        }

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panicpal_core::persistence::gateway::{HISTORY_KEY, PersistenceGateway};
    use panicpal_types::conversation::{Conversation, Turn};

    async fn test_store() -> (SqliteKvStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::open_in(dir.path()).await.unwrap();
        (SqliteKvStore::new(pool), dir)
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let (store, _dir) = test_store().await;
        store.set("theme", "dark").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let (store, _dir) = test_store().await;
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_upserts() {
        let (store, _dir) = test_store().await;
        store.set("counter", "1").await.unwrap();
        store.set("counter", "2").await.unwrap();
        assert_eq!(store.get("counter").await.unwrap().as_deref(), Some("2"));
        assert_eq!(store.list_keys().await.unwrap(), vec!["counter"]);
    }

    #[tokio::test]
    async fn test_delete_and_noop_delete() {
        let (store, _dir) = test_store().await;
        store.set("temp", "value").await.unwrap();
        store.delete("temp").await.unwrap();
        assert!(store.get("temp").await.unwrap().is_none());

        // Should not error
        store.delete("nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_keys_sorted() {
        let (store, _dir) = test_store().await;
        assert!(store.list_keys().await.unwrap().is_empty());

        store.set("beta", "b").await.unwrap();
        store.set("alpha", "a").await.unwrap();
        store.set("gamma", "g").await.unwrap();
        assert_eq!(store.list_keys().await.unwrap(), vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn test_conversation_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let conversation = Conversation::from_turns(vec![
            Turn::system("s"),
            Turn::user("hi"),
            Turn::assistant("hello"),
        ])
        .unwrap();

        {
            let pool = DatabasePool::open_in(dir.path()).await.unwrap();
            let gateway = PersistenceGateway::new(SqliteKvStore::new(pool.clone()));
            gateway.save(&conversation).await;
            pool.writer.close().await;
            pool.reader.close().await;
        }

        let pool = DatabasePool::open_in(dir.path()).await.unwrap();
        let store = SqliteKvStore::new(pool);
        assert!(store.get(HISTORY_KEY).await.unwrap().is_some());

        let gateway = PersistenceGateway::new(store);
        assert_eq!(gateway.load().await, Some(conversation));
    }

    #[tokio::test]
    async fn test_closed_pool_is_connection_error() {
        let (store, _dir) = test_store().await;
        store.pool.writer.close().await;

        let err = store.set("k", "v").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Connection));
    }
}
