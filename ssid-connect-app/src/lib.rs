//! Platform-agnostic application bootstrap for SSID Connect.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter injection),
//! the screen controllers that turn service results into user notices, and
//! the platform adapters a frontend picks from.

pub mod adapters;
pub mod controllers;
mod notice;
pub mod platform;

pub use notice::{Notice, NoticeAction, NoticeLevel};

use std::sync::Arc;

use ssid_connect_core::error::{CoreError, CoreResult};
use ssid_connect_core::services::{ConnectionService, NetworkService, ServiceContext};
use ssid_connect_core::store::KeyValueCredentialStore;
use ssid_connect_core::traits::{
    CredentialStore, KeyValueStorage, PermissionProvider, SettingsLauncher, WifiRadio,
};
use ssid_connect_core::types::{ConnectConfig, JoinSupport, PermissionKind};

use crate::adapters::{AlwaysGranted, LoggingSettingsLauncher};
use crate::controllers::{AddNetworkController, HomeController, NetworkListController};
use crate::platform::PlatformProfile;

/// Platform-agnostic application state.
///
/// Holds the `ServiceContext` and the services built on it. Every frontend
/// constructs this once at startup via `AppStateBuilder` and creates
/// controllers from it.
pub struct AppState {
    /// Service context (holds all platform adapters)
    pub ctx: Arc<ServiceContext>,
    /// Saved network editing
    pub network_service: Arc<NetworkService>,
    /// Connection passes
    pub connection_service: Arc<ConnectionService>,
    /// System WiFi settings surface
    pub settings_launcher: Arc<dyn SettingsLauncher>,
}

impl AppState {
    #[must_use]
    pub fn add_controller(&self) -> AddNetworkController {
        AddNetworkController::new(Arc::clone(&self.network_service))
    }

    #[must_use]
    pub fn list_controller(&self) -> NetworkListController {
        NetworkListController::new(Arc::clone(&self.network_service))
    }

    #[must_use]
    pub fn home_controller(&self) -> HomeController {
        HomeController::new(
            Arc::clone(&self.connection_service),
            Arc::clone(self.ctx.permission_provider()),
            Arc::clone(&self.settings_launcher),
        )
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `credential_store` or `key_value_storage`: where the list is persisted
/// - `radio`: WiFi radio state
///
/// # Optional
/// - `join_support`: defaults to `JoinSupport::Restricted`
/// - `permission_provider`: defaults to `AlwaysGranted`
/// - `settings_launcher`: defaults to `LoggingSettingsLauncher`
/// - `connect_config`: defaults to `ConnectConfig::default()`
pub struct AppStateBuilder {
    credential_store: Option<Arc<dyn CredentialStore>>,
    key_value_storage: Option<Arc<dyn KeyValueStorage>>,
    radio: Option<Arc<dyn WifiRadio>>,
    join_support: Option<JoinSupport>,
    permission_provider: Option<Arc<dyn PermissionProvider>>,
    settings_launcher: Option<Arc<dyn SettingsLauncher>>,
    connect_config: Option<ConnectConfig>,
    /// Permission demanded by the platform profile
    platform_permission: Option<PermissionKind>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            credential_store: None,
            key_value_storage: None,
            radio: None,
            join_support: None,
            permission_provider: None,
            settings_launcher: None,
            connect_config: None,
            platform_permission: None,
        }
    }

    /// Use a ready-made credential store. Takes precedence over `key_value_storage`.
    #[must_use]
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credential_store = Some(store);
        self
    }

    /// Persist the list under the standard key of this storage
    #[must_use]
    pub fn key_value_storage(mut self, storage: Arc<dyn KeyValueStorage>) -> Self {
        self.key_value_storage = Some(storage);
        self
    }

    #[must_use]
    pub fn radio(mut self, radio: Arc<dyn WifiRadio>) -> Self {
        self.radio = Some(radio);
        self
    }

    #[must_use]
    pub fn join_support(mut self, join_support: JoinSupport) -> Self {
        self.join_support = Some(join_support);
        self
    }

    #[must_use]
    pub fn permission_provider(mut self, provider: Arc<dyn PermissionProvider>) -> Self {
        self.permission_provider = Some(provider);
        self
    }

    #[must_use]
    pub fn settings_launcher(mut self, launcher: Arc<dyn SettingsLauncher>) -> Self {
        self.settings_launcher = Some(launcher);
        self
    }

    #[must_use]
    pub fn connect_config(mut self, config: ConnectConfig) -> Self {
        self.connect_config = Some(config);
        self
    }

    /// Take every WiFi related adapter from a detected platform profile.
    ///
    /// The profile's required permission is enforced unless `connect_config`
    /// names one itself, whichever of the two is called first.
    #[must_use]
    pub fn platform(mut self, profile: PlatformProfile) -> Self {
        log::debug!("Using platform profile {}", profile.name);
        self.radio = Some(profile.radio);
        self.join_support = Some(profile.join_support);
        self.permission_provider = Some(profile.permission_provider);
        self.settings_launcher = Some(profile.settings_launcher);
        self.platform_permission = profile.required_permission;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let credential_store: Arc<dyn CredentialStore> = match (
            self.credential_store,
            self.key_value_storage,
        ) {
            (Some(store), _) => store,
            (None, Some(storage)) => Arc::new(KeyValueCredentialStore::new(storage)),
            (None, None) => {
                return Err(CoreError::ValidationError(
                    "credential_store or key_value_storage is required".to_string(),
                ))
            }
        };
        let radio = self
            .radio
            .ok_or_else(|| CoreError::ValidationError("radio is required".to_string()))?;
        let join_support = self.join_support.unwrap_or(JoinSupport::Restricted);
        let permission_provider = self
            .permission_provider
            .unwrap_or_else(|| Arc::new(AlwaysGranted));
        let settings_launcher = self
            .settings_launcher
            .unwrap_or_else(|| Arc::new(LoggingSettingsLauncher));
        let mut connect_config = self.connect_config.unwrap_or_default();
        if connect_config.required_permission.is_none() {
            connect_config.required_permission = self.platform_permission;
        }

        log::debug!("Join support: {join_support:?}, config: {connect_config:?}");

        let ctx = Arc::new(ServiceContext::new(
            credential_store,
            radio,
            join_support,
            permission_provider,
        ));

        let network_service = Arc::new(NetworkService::new(Arc::clone(&ctx)));
        let connection_service =
            Arc::new(ConnectionService::new(Arc::clone(&ctx), connect_config));

        Ok(AppState {
            ctx,
            network_service,
            connection_service,
            settings_launcher,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
