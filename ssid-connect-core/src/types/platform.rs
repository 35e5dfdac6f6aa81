//! Platform capability types

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::traits::JoinStrategy;

/// Permission gating WiFi introspection on some platforms
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    /// Coarse location (older Android releases)
    CoarseLocation,
    /// Fine location (Android 10 and later)
    FineLocation,
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoarseLocation => write!(f, "coarse location"),
            Self::FineLocation => write!(f, "fine location"),
        }
    }
}

/// Result of a permission check or request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// How the platform lets the app associate with a network.
///
/// Chosen once at startup by capability detection.
#[derive(Clone)]
pub enum JoinSupport {
    /// The app may request association itself
    Programmatic(Arc<dyn JoinStrategy>),
    /// Only the system settings surface can join networks
    Restricted,
}

impl JoinSupport {
    #[must_use]
    pub fn is_restricted(&self) -> bool {
        matches!(self, Self::Restricted)
    }
}

impl fmt::Debug for JoinSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Programmatic(strategy) => {
                f.debug_tuple("Programmatic").field(&strategy.name()).finish()
            }
            Self::Restricted => f.write_str("Restricted"),
        }
    }
}
