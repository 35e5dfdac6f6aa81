//! Storage and platform abstraction trait definitions

mod credential_store;
mod key_value_storage;
mod platform;
mod wifi;

pub use credential_store::CredentialStore;
pub use key_value_storage::{InMemoryKeyValueStorage, KeyValueStorage};
pub use platform::{PermissionProvider, SettingsLauncher};
pub use wifi::{JoinStrategy, WifiRadio};
