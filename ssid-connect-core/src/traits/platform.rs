//! Permission and settings abstraction Traits

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{PermissionKind, PermissionStatus};

/// Runtime permission primitive
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    /// Current state, without prompting the user
    async fn check(&self, kind: PermissionKind) -> PermissionStatus;

    /// Prompt the user if needed
    async fn request(&self, kind: PermissionKind) -> PermissionStatus;
}

/// Opens the system WiFi settings surface.
///
/// Used on platforms where apps cannot join networks themselves.
#[async_trait]
pub trait SettingsLauncher: Send + Sync {
    async fn open_wifi_settings(&self) -> CoreResult<()>;
}
