//! 类型定义模块

mod connection;
mod network;
mod platform;

pub use connection::{AttemptOutcome, AttemptRecord, ConnectConfig, ConnectReport};
pub use network::{AddNetworkRequest, CredentialList, NetworkCredential, UpdateNetworkRequest};
pub use platform::{JoinSupport, PermissionKind, PermissionStatus};
