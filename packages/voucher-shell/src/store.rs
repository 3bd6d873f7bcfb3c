//! The persistent key-value capability the shell reads and writes through

use std::collections::HashMap;
use std::error::Error as StdError;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Key under which the voucher address is stored.
pub const USER_URL_KEY: &str = "userUrl";

pub type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
    #[error("storage backend failed: {0}")]
    Backend(#[source] BoxedError),
}

impl StoreError {
    pub fn backend(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Asynchronous string storage keyed by a fixed identifier.
///
/// Implementations must resolve every call exactly once. Callers never issue
/// two calls concurrently.
pub trait UrlStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>>;
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StoreError>>;
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StoreError>>;
}

/// An in-memory [`UrlStore`]. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.insert(key, value);
        store
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UrlStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(USER_URL_KEY).await.unwrap(), None);

        store.set(USER_URL_KEY, "https://a.b").await.unwrap();
        assert_eq!(
            store.get(USER_URL_KEY).await.unwrap().as_deref(),
            Some("https://a.b")
        );

        store.remove(USER_URL_KEY).await.unwrap();
        assert_eq!(store.get(USER_URL_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let store = MemoryStore::with_entry(USER_URL_KEY, "https://x.y");
        let other = store.clone();
        other.remove(USER_URL_KEY).await.unwrap();
        assert_eq!(store.value(USER_URL_KEY), None);
    }

    #[tokio::test]
    async fn removing_a_missing_key_is_fine() {
        let store = MemoryStore::new();
        assert!(store.remove("nothing").await.is_ok());
    }
}
