//! Connection attempt types

use std::time::Duration;

use serde::Serialize;

use crate::types::PermissionKind;

/// Tuning for a connection pass.
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// Upper bound on waiting for one candidate's join request to settle
    pub join_timeout: Duration,
    /// How long to keep checking the associated SSID after a join request
    pub verify_window: Duration,
    /// Delay between associated-SSID checks
    pub verify_poll_interval: Duration,
    /// Permission that must already be granted, if the platform needs one
    pub required_permission: Option<PermissionKind>,
}

impl ConnectConfig {
    pub const DEFAULT_JOIN_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_VERIFY_WINDOW: Duration = Duration::from_secs(3);
    pub const DEFAULT_VERIFY_POLL_INTERVAL: Duration = Duration::from_millis(500);
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            join_timeout: Self::DEFAULT_JOIN_TIMEOUT,
            verify_window: Self::DEFAULT_VERIFY_WINDOW,
            verify_poll_interval: Self::DEFAULT_VERIFY_POLL_INTERVAL,
            required_permission: None,
        }
    }
}

/// What happened to a single candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Joined and verified
    Connected,
    /// The join request reported an error
    JoinFailed { reason: String },
    /// The join request did not settle within the bounded wait
    TimedOut,
    /// The join request settled but the device is associated elsewhere
    NotVerified { current_ssid: Option<String> },
}

/// One entry of a connection pass
#[derive(Debug, Clone, Serialize)]
pub struct AttemptRecord {
    pub ssid: String,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

/// Successful connection pass
#[derive(Debug, Clone, Serialize)]
pub struct ConnectReport {
    /// The network now associated
    pub ssid: String,
    /// Every candidate tried, in order, ending with the successful one
    pub attempts: Vec<AttemptRecord>,
}
