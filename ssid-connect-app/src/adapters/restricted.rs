//! Adapters for platforms where apps cannot manage WiFi themselves.

use async_trait::async_trait;

use ssid_connect_core::error::{CoreError, CoreResult};
use ssid_connect_core::traits::{PermissionProvider, WifiRadio};
use ssid_connect_core::types::{PermissionKind, PermissionStatus};

/// Radio that can be neither inspected nor controlled.
///
/// Reports the radio as on so that nothing tries to switch it, and never
/// knows the current SSID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictedWifi;

#[async_trait]
impl WifiRadio for RestrictedWifi {
    async fn is_enabled(&self) -> CoreResult<bool> {
        Ok(true)
    }

    async fn set_enabled(&self, _enabled: bool) -> CoreResult<()> {
        Err(CoreError::PlatformRestricted)
    }

    async fn current_ssid(&self) -> CoreResult<Option<String>> {
        Ok(None)
    }
}

/// Permission provider for platforms without runtime permissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysGranted;

#[async_trait]
impl PermissionProvider for AlwaysGranted {
    async fn check(&self, _kind: PermissionKind) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn request(&self, _kind: PermissionKind) -> PermissionStatus {
        PermissionStatus::Granted
    }
}
