//! Platform adapters: storage, WiFi backends, permissions and settings.

mod restricted;
mod settings;

pub use restricted::{AlwaysGranted, RestrictedWifi};
pub use settings::{CommandSettingsLauncher, LoggingSettingsLauncher};

#[cfg(feature = "file-store")]
mod file_storage;

#[cfg(feature = "file-store")]
pub use file_storage::{FileKeyValueStorage, STORE_FILE_NAME};

#[cfg(feature = "nmcli")]
mod nmcli;

#[cfg(feature = "nmcli")]
pub use nmcli::NmcliWifi;
