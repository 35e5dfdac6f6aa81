//! 业务逻辑服务层

mod connection_service;
mod network_service;

pub use connection_service::ConnectionService;
pub use network_service::NetworkService;

use std::sync::Arc;

use crate::traits::{CredentialStore, PermissionProvider, WifiRadio};
use crate::types::JoinSupport;

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储与 WiFi 实现。
pub struct ServiceContext {
    credential_store: Arc<dyn CredentialStore>,
    radio: Arc<dyn WifiRadio>,
    join_support: JoinSupport,
    permission_provider: Arc<dyn PermissionProvider>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        credential_store: Arc<dyn CredentialStore>,
        radio: Arc<dyn WifiRadio>,
        join_support: JoinSupport,
        permission_provider: Arc<dyn PermissionProvider>,
    ) -> Self {
        Self {
            credential_store,
            radio,
            join_support,
            permission_provider,
        }
    }

    #[must_use]
    pub fn credential_store(&self) -> &Arc<dyn CredentialStore> {
        &self.credential_store
    }

    #[must_use]
    pub fn radio(&self) -> &Arc<dyn WifiRadio> {
        &self.radio
    }

    #[must_use]
    pub fn join_support(&self) -> &JoinSupport {
        &self.join_support
    }

    #[must_use]
    pub fn permission_provider(&self) -> &Arc<dyn PermissionProvider> {
        &self.permission_provider
    }
}
