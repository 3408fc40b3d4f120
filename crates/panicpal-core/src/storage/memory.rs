//! In-memory key-value store.
//!
//! Backs ephemeral sessions (nothing survives the process) and tests.
//! Clones share the same entries.

use std::sync::Arc;

use dashmap::DashMap;
use panicpal_types::error::RepositoryError;

use super::kv_store::KvStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryKvStore {
    entries: Arc<DashMap<String, String>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, RepositoryError> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let store = InMemoryKvStore::new();
        store.set("chatHistory", "[]").await.unwrap();
        assert_eq!(store.get("chatHistory").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = InMemoryKvStore::new();
        let other = store.clone();
        store.set("a", "1").await.unwrap();
        assert_eq!(other.get("a").await.unwrap().as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let store = InMemoryKvStore::new();
        store.set("beta", "b").await.unwrap();
        store.set("alpha", "a").await.unwrap();
        assert_eq!(store.list_keys().await.unwrap(), vec!["alpha", "beta"]);

        store.delete("alpha").await.unwrap();
        store.delete("missing").await.unwrap();
        assert_eq!(store.list_keys().await.unwrap(), vec!["beta"]);
        assert_eq!(store.len(), 1);
    }
}
