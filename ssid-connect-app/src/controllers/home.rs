//! Home screen: one-tap connect to the first reachable saved network

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ssid_connect_core::error::CoreError;
use ssid_connect_core::services::ConnectionService;
use ssid_connect_core::traits::{PermissionProvider, SettingsLauncher};

use super::{log_error, BusyGuard};
use crate::{Notice, NoticeAction};

const PERMISSION_TITLE: &str = "Permission Required";
const PERMISSION_MESSAGE: &str =
    "Location permission is required to access WiFi information on this device.";

pub struct HomeController {
    connection_service: Arc<ConnectionService>,
    permission_provider: Arc<dyn PermissionProvider>,
    settings_launcher: Arc<dyn SettingsLauncher>,
    connecting: AtomicBool,
}

impl HomeController {
    #[must_use]
    pub fn new(
        connection_service: Arc<ConnectionService>,
        permission_provider: Arc<dyn PermissionProvider>,
        settings_launcher: Arc<dyn SettingsLauncher>,
    ) -> Self {
        Self {
            connection_service,
            permission_provider,
            settings_launcher,
            connecting: AtomicBool::new(false),
        }
    }

    /// Whether the connect button should be disabled
    pub fn is_connecting(&self) -> bool {
        self.connecting.load(Ordering::SeqCst) || self.connection_service.is_connecting()
    }

    /// Run a connection pass over the saved networks.
    ///
    /// The required permission, if any, is requested first; the prompt is
    /// only shown when it has not been granted yet.
    pub async fn connect(&self) -> Notice {
        let Some(_busy) = BusyGuard::acquire(&self.connecting) else {
            return in_progress();
        };

        if let Some(kind) = self.connection_service.config().required_permission {
            let status = self.permission_provider.request(kind).await;
            if !status.is_granted() {
                log::warn!("{kind} permission not granted");
                return Notice::warning(PERMISSION_TITLE, PERMISSION_MESSAGE);
            }
        }

        match self.connection_service.connect_saved().await {
            Ok(report) => {
                log::debug!("Connection pass: {} attempts", report.attempts.len());
                Notice::success(
                    "Connected",
                    format!("Successfully connected to {}", report.ssid),
                )
            }
            Err(e) => {
                log_error("Connection pass ended without a connection", &e);
                notice_for_error(&e)
            }
        }
    }

    /// Open the system WiFi settings; `None` on success.
    pub async fn open_wifi_settings(&self) -> Option<Notice> {
        match self.settings_launcher.open_wifi_settings().await {
            Ok(()) => None,
            Err(e) => {
                log_error("Failed to open WiFi settings", &e);
                Some(Notice::error("Error", "Could not open WiFi settings."))
            }
        }
    }
}

fn in_progress() -> Notice {
    Notice::warning("Connecting", "A connection attempt is already in progress.")
}

fn notice_for_error(err: &CoreError) -> Notice {
    match err {
        CoreError::NoSavedNetworks => Notice::info("No Networks", "No saved WiFi networks found."),
        CoreError::ConnectionFailure { .. } => Notice::error(
            "Connection Failed",
            "Could not connect to any of the saved networks.",
        ),
        CoreError::PlatformRestricted => Notice::info(
            "Platform Limitation",
            "This device does not let apps join WiFi networks directly. \
             Would you like to open WiFi settings?",
        )
        .with_action(NoticeAction::OpenWifiSettings),
        CoreError::PermissionDenied(_) => Notice::warning(PERMISSION_TITLE, PERMISSION_MESSAGE),
        CoreError::ConnectionInProgress => in_progress(),
        other => Notice::error("Error", format!("Failed to connect to networks: {other}")),
    }
}
