//! Saved network store backed by a key-value storage
//!
//! The list lives as one JSON array under a single key:
//! `[{"id": "...", "ssid": "...", "password": "..."}, ...]`.
//! There is no read cache: every `load()` goes to storage so that changes
//! made by another screen or process are always picked up.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::traits::{CredentialStore, KeyValueStorage};
use crate::types::CredentialList;

/// Storage key holding the serialized list
pub const CREDENTIALS_KEY: &str = "ssidList";

/// `CredentialStore` over any `KeyValueStorage`.
pub struct KeyValueCredentialStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    /// Serializes `save()` calls within this process
    write_lock: Mutex<()>,
}

impl KeyValueCredentialStore {
    /// Create a store using the default key
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, CREDENTIALS_KEY)
    }

    /// Create a store using a custom key
    #[must_use]
    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn parse(json: &str) -> CoreResult<CredentialList> {
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(json)
            .map_err(|e| CoreError::StorageError(format!("Invalid saved network list: {e}")))
    }
}

#[async_trait]
impl CredentialStore for KeyValueCredentialStore {
    async fn load(&self) -> CoreResult<CredentialList> {
        let Some(json) = self.storage.get_item(&self.key).await? else {
            log::debug!("No saved networks under key {}", self.key);
            return Ok(Vec::new());
        };

        let list = Self::parse(&json)?;
        log::debug!("Loaded {} saved networks", list.len());
        Ok(list)
    }

    async fn save(&self, list: &CredentialList) -> CoreResult<()> {
        let json = serde_json::to_string(list)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        let _guard = self.write_lock.lock().await;
        self.storage.set_item(&self.key, &json).await?;
        log::info!("Saved {} networks", list.len());
        Ok(())
    }
}
