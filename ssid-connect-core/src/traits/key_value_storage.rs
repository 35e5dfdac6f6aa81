//! Device key-value storage abstraction Trait

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CoreResult;

/// String key-value storage provided by the device.
///
/// `set_item` must replace the value as a whole: readers see either the old
/// or the new value, never a mix.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read a value
    ///
    /// # Returns
    /// * `Ok(Some(value))` - key present
    /// * `Ok(None)` - key never written
    async fn get_item(&self, key: &str) -> CoreResult<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set_item(&self, key: &str, value: &str) -> CoreResult<()>;
}

/// In-memory key-value storage
///
/// Nothing survives the process. Useful for tests and as a fallback when no
/// durable storage is available.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for InMemoryKeyValueStorage {
    async fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
