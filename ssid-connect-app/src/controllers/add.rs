//! Add network screen

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ssid_connect_core::error::CoreError;
use ssid_connect_core::services::NetworkService;
use ssid_connect_core::types::AddNetworkRequest;

use super::{log_error, BusyGuard};
use crate::Notice;

pub struct AddNetworkController {
    network_service: Arc<NetworkService>,
    saving: AtomicBool,
}

impl AddNetworkController {
    #[must_use]
    pub fn new(network_service: Arc<NetworkService>) -> Self {
        Self {
            network_service,
            saving: AtomicBool::new(false),
        }
    }

    /// Whether a save is in flight
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Save a new network and describe the outcome.
    pub async fn submit(&self, ssid: &str, password: &str) -> Notice {
        let Some(_busy) = BusyGuard::acquire(&self.saving) else {
            return Notice::warning("Busy", "The network is still being saved.");
        };

        let request = AddNetworkRequest {
            ssid: ssid.to_string(),
            password: password.to_string(),
        };

        match self.network_service.add(request).await {
            Ok(_) => Notice::success("Success", "WiFi network saved successfully!"),
            Err(CoreError::ValidationError(message)) => Notice::error("Error", message),
            Err(CoreError::DuplicateSsid(_)) => Notice::warning(
                "Network Exists",
                "This network name already exists in your list.",
            ),
            Err(e) => {
                log_error("Failed to save network", &e);
                Notice::error("Error", "Failed to save network information.")
            }
        }
    }
}
