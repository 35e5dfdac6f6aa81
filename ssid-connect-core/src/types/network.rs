//! Saved network types

use serde::{Deserialize, Serialize};

/// A saved WiFi network.
///
/// Serialized as `{"id": ..., "ssid": ..., "password": ...}`; the password is
/// kept in plaintext, the storage backend is the only protection it gets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkCredential {
    /// Opaque identifier assigned at creation, never changed afterwards
    pub id: String,
    /// Advertised network name
    pub ssid: String,
    /// Passphrase, empty for open networks
    pub password: String,
}

/// Saved networks in insertion order.
pub type CredentialList = Vec<NetworkCredential>;

/// Request to save a new network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddNetworkRequest {
    pub ssid: String,
    pub password: String,
}

/// Request to edit a saved network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNetworkRequest {
    /// ID of the network being edited
    pub id: String,
    /// New network name
    pub ssid: String,
    /// New passphrase
    pub password: String,
}
