//! SSID Connect Core Library
//!
//! Provides the platform-independent pieces of the SSID Connect utility:
//! - Saved network storage (`CredentialStore` over a key-value backend)
//! - Saved network editing with SSID uniqueness (`NetworkService`)
//! - Sequential best-effort connection attempts (`ConnectionService`)
//!
//! Storage and the WiFi stack are abstracted through traits so that each
//! frontend can inject its own platform adapters.

pub mod error;
pub mod services;
pub mod store;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{
    CredentialStore, JoinStrategy, KeyValueStorage, PermissionProvider, SettingsLauncher,
    WifiRadio,
};
