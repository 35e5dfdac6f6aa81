//! Saved network editing service
//!
//! Every mutation is load → validate → modify → save of the whole list.
//! SSID uniqueness is checked here, before anything is written.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{AddNetworkRequest, CredentialList, NetworkCredential, UpdateNetworkRequest};
use crate::utils::id::generate_network_id;

/// Saved network service
pub struct NetworkService {
    ctx: Arc<ServiceContext>,
    /// Serializes read-modify-write sequences
    edit_lock: Mutex<()>,
}

impl NetworkService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            edit_lock: Mutex::new(()),
        }
    }

    /// List saved networks in insertion order
    pub async fn list(&self) -> CoreResult<CredentialList> {
        self.ctx.credential_store().load().await
    }

    /// Save a new network
    ///
    /// Rejects an empty SSID and an SSID that is already saved.
    pub async fn add(&self, request: AddNetworkRequest) -> CoreResult<NetworkCredential> {
        validate_ssid(&request.ssid)?;

        let _guard = self.edit_lock.lock().await;
        let mut list = self.ctx.credential_store().load().await?;

        if list.iter().any(|n| n.ssid == request.ssid) {
            return Err(CoreError::DuplicateSsid(request.ssid));
        }

        let network = NetworkCredential {
            id: generate_network_id(&list),
            ssid: request.ssid,
            password: request.password,
        };
        list.push(network.clone());

        self.ctx.credential_store().save(&list).await?;
        log::info!("Added network {} ({})", network.ssid, network.id);
        Ok(network)
    }

    /// Edit the SSID and password of a saved network
    pub async fn update(&self, request: UpdateNetworkRequest) -> CoreResult<NetworkCredential> {
        validate_ssid(&request.ssid)?;

        let _guard = self.edit_lock.lock().await;
        let mut list = self.ctx.credential_store().load().await?;

        if list
            .iter()
            .any(|n| n.ssid == request.ssid && n.id != request.id)
        {
            return Err(CoreError::DuplicateSsid(request.ssid));
        }

        let network = list
            .iter_mut()
            .find(|n| n.id == request.id)
            .ok_or_else(|| CoreError::NetworkNotFound(request.id.clone()))?;
        network.ssid = request.ssid;
        network.password = request.password;
        let updated = network.clone();

        self.ctx.credential_store().save(&list).await?;
        log::info!("Updated network {} ({})", updated.ssid, updated.id);
        Ok(updated)
    }

    /// Delete a saved network
    ///
    /// Returns `false` without writing when no network has this ID.
    pub async fn delete(&self, id: &str) -> CoreResult<bool> {
        let _guard = self.edit_lock.lock().await;
        let mut list = self.ctx.credential_store().load().await?;

        let before = list.len();
        list.retain(|n| n.id != id);
        if list.len() == before {
            log::debug!("Delete ignored, no network with id {id}");
            return Ok(false);
        }

        self.ctx.credential_store().save(&list).await?;
        log::info!("Deleted network {id}");
        Ok(true)
    }
}

fn validate_ssid(ssid: &str) -> CoreResult<()> {
    if ssid.trim().is_empty() {
        return Err(CoreError::ValidationError(
            "Please enter a network name (SSID)".to_string(),
        ));
    }
    Ok(())
}
