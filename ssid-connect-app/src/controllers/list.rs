//! Saved network list screen with inline editing

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use ssid_connect_core::error::CoreError;
use ssid_connect_core::services::NetworkService;
use ssid_connect_core::types::{CredentialList, UpdateNetworkRequest};

use super::{log_error, BusyGuard};
use crate::Notice;

/// Values being edited for one saved network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: String,
    pub ssid: String,
    pub password: String,
}

/// List controller.
///
/// `networks` is a cache of the stored list, refreshed by `reload()` and
/// after each successful edit or delete.
pub struct NetworkListController {
    network_service: Arc<NetworkService>,
    networks: RwLock<CredentialList>,
    draft: RwLock<Option<EditDraft>>,
    loading: AtomicBool,
}

impl NetworkListController {
    #[must_use]
    pub fn new(network_service: Arc<NetworkService>) -> Self {
        Self {
            network_service,
            networks: RwLock::new(Vec::new()),
            draft: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Snapshot of the cached list
    pub async fn networks(&self) -> CredentialList {
        self.networks.read().await.clone()
    }

    /// Refresh the cache from storage; `None` means the cache is fresh.
    ///
    /// A failed load leaves an empty list behind. A reload requested while
    /// another one is running returns a busy notice and leaves the cache alone.
    pub async fn reload(&self) -> Option<Notice> {
        let Some(_busy) = BusyGuard::acquire(&self.loading) else {
            return Some(Notice::warning("Busy", "Saved networks are still loading."));
        };

        match self.network_service.list().await {
            Ok(list) => {
                *self.networks.write().await = list;
                None
            }
            Err(e) => {
                log_error("Failed to load saved networks", &e);
                self.networks.write().await.clear();
                Some(Notice::error("Error", "Failed to load saved networks."))
            }
        }
    }

    /// Start editing a cached network. Returns `false` for an unknown ID.
    pub async fn begin_edit(&self, id: &str) -> bool {
        let networks = self.networks.read().await;
        let Some(network) = networks.iter().find(|n| n.id == id) else {
            return false;
        };

        *self.draft.write().await = Some(EditDraft {
            id: network.id.clone(),
            ssid: network.ssid.clone(),
            password: network.password.clone(),
        });
        true
    }

    /// Replace the draft values; ignored when nothing is being edited
    pub async fn set_draft(&self, ssid: &str, password: &str) {
        if let Some(draft) = self.draft.write().await.as_mut() {
            draft.ssid = ssid.to_string();
            draft.password = password.to_string();
        }
    }

    pub async fn draft(&self) -> Option<EditDraft> {
        self.draft.read().await.clone()
    }

    pub async fn cancel_edit(&self) {
        *self.draft.write().await = None;
    }

    /// Persist the draft.
    ///
    /// On success the draft is closed and the cache refreshed; on failure the
    /// draft stays open so the user can correct it. `None` means nothing was
    /// being edited.
    pub async fn save_edit(&self) -> Option<Notice> {
        let draft = self.draft.read().await.clone()?;

        if draft.ssid.trim().is_empty() {
            return Some(Notice::error("Error", "Network name cannot be empty"));
        }

        let request = UpdateNetworkRequest {
            id: draft.id,
            ssid: draft.ssid,
            password: draft.password,
        };

        match self.network_service.update(request).await {
            Ok(updated) => {
                *self.draft.write().await = None;
                let mut networks = self.networks.write().await;
                if let Some(cached) = networks.iter_mut().find(|n| n.id == updated.id) {
                    *cached = updated;
                }
                Some(Notice::success("Saved", "Network updated."))
            }
            Err(CoreError::DuplicateSsid(_)) => {
                Some(Notice::error("Error", "This network name already exists"))
            }
            Err(e) => {
                log_error("Failed to update network", &e);
                Some(Notice::error("Error", "Failed to update network information."))
            }
        }
    }

    /// Delete a saved network; `None` on success.
    pub async fn delete(&self, id: &str) -> Option<Notice> {
        match self.network_service.delete(id).await {
            Ok(_) => {
                self.networks.write().await.retain(|n| n.id != id);
                let mut draft = self.draft.write().await;
                if draft.as_ref().is_some_and(|d| d.id == id) {
                    *draft = None;
                }
                None
            }
            Err(e) => {
                log_error("Failed to delete network", &e);
                Some(Notice::error("Error", "Failed to delete network."))
            }
        }
    }
}
