//! JSON file backed key-value storage.
//!
//! All keys live in one JSON object file (`store.json`), values are strings.
//! Writes go to a sibling temp file which is synced and then renamed over the
//! original, so a reader sees either the previous or the new file, never a
//! truncated one. Temp names are unique per process and write, so concurrent
//! writers never share one.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use ssid_connect_core::error::{CoreError, CoreResult};
use ssid_connect_core::traits::KeyValueStorage;

pub const STORE_FILE_NAME: &str = "store.json";
const MAX_STORE_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Key-value storage persisted to a JSON file.
pub struct FileKeyValueStorage {
    path: PathBuf,
    /// Serializes read-modify-write of the file
    write_lock: Mutex<()>,
}

impl FileKeyValueStorage {
    /// Storage at `<dir>/store.json`
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_file(dir.as_ref().join(STORE_FILE_NAME))
    }

    /// Storage at an explicit file path
    #[must_use]
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(format!(
            ".{}.{}.tmp",
            std::process::id(),
            TEMP_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        self.path.with_file_name(name)
    }

    async fn read_map(&self) -> CoreResult<Map<String, Value>> {
        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("Store file does not exist: {}", self.path.display());
                return Ok(Map::new());
            }
            Err(e) => {
                return Err(CoreError::StorageError(format!(
                    "Failed to read store file metadata: {e}"
                )))
            }
        };

        if metadata.len() > MAX_STORE_FILE_SIZE {
            return Err(CoreError::StorageError(format!(
                "Store file too large: {} bytes (max: {} bytes)",
                metadata.len(),
                MAX_STORE_FILE_SIZE
            )));
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to read store file: {e}")))?;

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(CoreError::StorageError(
                "Invalid store format: expected a JSON object".to_string(),
            )),
            Err(e) => Err(CoreError::StorageError(format!("Invalid store format: {e}"))),
        }
    }

    async fn write_map(&self, map: &Map<String, Value>) -> CoreResult<()> {
        let content = serde_json::to_string_pretty(map)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::StorageError(format!("Failed to create store dir: {e}")))?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = write_synced(&temp_path, content.as_bytes()).await {
            discard_temp(&temp_path).await;
            return Err(e);
        }

        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            discard_temp(&temp_path).await;
            return Err(CoreError::StorageError(format!(
                "Failed to replace store file: {e}"
            )));
        }
        Ok(())
    }
}

async fn write_synced(path: &Path, content: &[u8]) -> CoreResult<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| CoreError::StorageError(format!("Failed to create temp file: {e}")))?;
    file.write_all(content)
        .await
        .map_err(|e| CoreError::StorageError(format!("Failed to write temp file: {e}")))?;
    file.sync_all()
        .await
        .map_err(|e| CoreError::StorageError(format!("Failed to sync temp file: {e}")))
}

async fn discard_temp(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        log::debug!("Could not remove temp file {}: {e}", path.display());
    }
}

#[async_trait]
impl KeyValueStorage for FileKeyValueStorage {
    async fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        let map = self.read_map().await?;
        Ok(match map.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            // written by a tool that stored the JSON value itself
            Some(other) => Some(other.to_string()),
        })
    }

    async fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut map = self.read_map().await?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map).await?;

        log::debug!("Wrote key {key} to {}", self.path.display());
        Ok(())
    }
}
