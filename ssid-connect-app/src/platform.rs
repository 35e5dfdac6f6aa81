//! Startup capability detection.
//!
//! Decides once, before any controller exists, how this device joins
//! networks. Everything downstream just receives the chosen adapters.

use std::sync::Arc;
use std::time::Duration;

use ssid_connect_core::traits::{PermissionProvider, SettingsLauncher, WifiRadio};
use ssid_connect_core::types::{JoinSupport, PermissionKind};

use crate::adapters::{AlwaysGranted, CommandSettingsLauncher, RestrictedWifi};

/// Adapters chosen for the running platform
#[derive(Clone)]
pub struct PlatformProfile {
    /// Short description for logs
    pub name: &'static str,
    pub radio: Arc<dyn WifiRadio>,
    pub join_support: JoinSupport,
    pub permission_provider: Arc<dyn PermissionProvider>,
    pub settings_launcher: Arc<dyn SettingsLauncher>,
    /// Permission that must be granted before a connection pass
    pub required_permission: Option<PermissionKind>,
}

impl PlatformProfile {
    /// Profile for a platform that only lets the user join networks from settings
    #[must_use]
    pub fn restricted() -> Self {
        Self {
            name: "restricted",
            radio: Arc::new(RestrictedWifi),
            join_support: JoinSupport::Restricted,
            permission_provider: Arc::new(AlwaysGranted),
            settings_launcher: Arc::new(CommandSettingsLauncher::platform_default()),
            required_permission: None,
        }
    }

    /// Profile driving NetworkManager through `nmcli`
    #[cfg(feature = "nmcli")]
    #[must_use]
    pub fn nmcli(wifi: crate::adapters::NmcliWifi) -> Self {
        Self {
            name: "networkmanager",
            radio: Arc::new(wifi.clone()),
            join_support: JoinSupport::Programmatic(Arc::new(wifi)),
            permission_provider: Arc::new(AlwaysGranted),
            settings_launcher: Arc::new(CommandSettingsLauncher::platform_default()),
            required_permission: None,
        }
    }
}

/// Inspect the system and pick the most capable profile available.
///
/// `join_timeout` is handed to backends that bound joins themselves, so they
/// give up no later than the connection pass does.
pub async fn detect_platform(join_timeout: Duration) -> PlatformProfile {
    #[cfg(feature = "nmcli")]
    {
        let wifi = crate::adapters::NmcliWifi::new().with_wait(join_timeout);
        if wifi.is_available().await {
            log::info!("Using NetworkManager for WiFi association");
            return PlatformProfile::nmcli(wifi);
        }
    }

    #[cfg(not(feature = "nmcli"))]
    let _ = join_timeout;

    log::info!("No programmatic WiFi backend available, joining goes through system settings");
    PlatformProfile::restricted()
}
