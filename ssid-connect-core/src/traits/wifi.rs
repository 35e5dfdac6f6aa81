//! WiFi platform abstraction Traits

use async_trait::async_trait;

use crate::error::CoreResult;

/// Query and toggle the WiFi radio.
#[async_trait]
pub trait WifiRadio: Send + Sync {
    /// Whether the radio is on
    async fn is_enabled(&self) -> CoreResult<bool>;

    /// Ask the platform to turn the radio on or off.
    ///
    /// Returning `Ok` does not mean the radio has finished switching.
    async fn set_enabled(&self, enabled: bool) -> CoreResult<()>;

    /// SSID of the network the device is currently associated with
    async fn current_ssid(&self) -> CoreResult<Option<String>>;
}

/// A way of asking the platform to join a network.
///
/// Platforms may offer more than one (e.g. a modern request-based API and a
/// legacy configuration API); the one to use is picked at startup.
#[async_trait]
pub trait JoinStrategy: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Request association with `ssid`.
    ///
    /// Resolves once the platform reports the request settled. Callers bound
    /// the wait, so implementations may block on the platform's callback.
    async fn request_join(&self, ssid: &str, password: &str) -> CoreResult<()>;
}
