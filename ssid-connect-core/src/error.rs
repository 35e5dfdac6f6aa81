//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::PermissionKind;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Persisted payload could not be read or written
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Another saved network already uses this SSID
    #[error("Network name already exists: {0}")]
    DuplicateSsid(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Saved network not found
    #[error("Network not found: {0}")]
    NetworkNotFound(String),

    /// No saved network could be joined
    #[error("Could not connect to any of the saved networks ({attempted} tried)")]
    ConnectionFailure { attempted: usize },

    /// The platform does not allow programmatic WiFi association
    #[error("This platform does not allow apps to join WiFi networks")]
    PlatformRestricted,

    /// A permission required for WiFi introspection was not granted
    #[error("Permission denied: {0}")]
    PermissionDenied(PermissionKind),

    /// A connection pass is already running
    #[error("A connection attempt is already in progress")]
    ConnectionInProgress,

    /// There is nothing to connect to
    #[error("No saved WiFi networks found")]
    NoSavedNetworks,

    /// The platform WiFi backend reported a failure
    #[error("Platform error: {0}")]
    PlatformError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, platform limits, unreachable networks),
    /// used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::DuplicateSsid(_)
            | Self::ValidationError(_)
            | Self::NetworkNotFound(_)
            | Self::ConnectionFailure { .. }
            | Self::PlatformRestricted
            | Self::PermissionDenied(_)
            | Self::ConnectionInProgress
            | Self::NoSavedNetworks => true,
            Self::StorageError(_) | Self::SerializationError(_) | Self::PlatformError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
