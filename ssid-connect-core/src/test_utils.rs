//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::{CoreError, CoreResult};
use crate::services::{ConnectionService, ServiceContext};
use crate::store::KeyValueCredentialStore;
use crate::traits::{
    CredentialStore, InMemoryKeyValueStorage, JoinStrategy, KeyValueStorage, PermissionProvider,
    WifiRadio,
};
use crate::types::{
    ConnectConfig, CredentialList, JoinSupport, NetworkCredential, PermissionKind,
    PermissionStatus,
};

pub fn network(id: &str, ssid: &str, password: &str) -> NetworkCredential {
    NetworkCredential {
        id: id.to_string(),
        ssid: ssid.to_string(),
        password: password.to_string(),
    }
}

// ===== CountingCredentialStore =====

/// In-memory store that counts writes
pub struct CountingCredentialStore {
    list: RwLock<CredentialList>,
    saves: AtomicUsize,
}

impl CountingCredentialStore {
    pub fn with_list(list: CredentialList) -> Self {
        Self {
            list: RwLock::new(list),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for CountingCredentialStore {
    async fn load(&self) -> CoreResult<CredentialList> {
        Ok(self.list.read().await.clone())
    }

    async fn save(&self, list: &CredentialList) -> CoreResult<()> {
        *self.list.write().await = list.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ===== FailingKeyValueStorage =====

/// Storage whose writes always fail
pub struct FailingKeyValueStorage;

#[async_trait]
impl KeyValueStorage for FailingKeyValueStorage {
    async fn get_item(&self, _key: &str) -> CoreResult<Option<String>> {
        Ok(None)
    }

    async fn set_item(&self, _key: &str, _value: &str) -> CoreResult<()> {
        Err(CoreError::StorageError("disk full".to_string()))
    }
}

// ===== ScriptedWifi =====

/// How a scripted network reacts to a join request
#[derive(Debug, Clone, Copy)]
pub enum JoinBehavior {
    /// Join resolves and the device is associated right away
    Succeed,
    /// Join resolves, association shows up after the delay
    SucceedAfter(Duration),
    /// Join resolves with an error
    Fail,
    /// Join never resolves
    Hang,
    /// Join resolves but the device stays where it was
    SettleElsewhere,
}

#[derive(Default)]
struct WifiState {
    associated: Option<(String, Instant)>,
    join_calls: Vec<String>,
}

/// Fake WiFi stack driven by per-SSID behaviors.
///
/// Unknown SSIDs fail to join.
#[derive(Clone)]
pub struct ScriptedWifi {
    behaviors: Arc<HashMap<String, JoinBehavior>>,
    state: Arc<Mutex<WifiState>>,
    radio_enabled: Arc<AtomicBool>,
    set_enabled_calls: Arc<AtomicUsize>,
}

impl ScriptedWifi {
    pub fn new() -> Self {
        Self {
            behaviors: Arc::new(HashMap::new()),
            state: Arc::new(Mutex::new(WifiState::default())),
            radio_enabled: Arc::new(AtomicBool::new(true)),
            set_enabled_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with(mut self, ssid: &str, behavior: JoinBehavior) -> Self {
        Arc::make_mut(&mut self.behaviors).insert(ssid.to_string(), behavior);
        self
    }

    pub fn radio_off(self) -> Self {
        self.radio_enabled.store(false, Ordering::SeqCst);
        self
    }

    pub fn join_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().join_calls.clone()
    }

    pub fn set_enabled_calls(&self) -> usize {
        self.set_enabled_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WifiRadio for ScriptedWifi {
    async fn is_enabled(&self) -> CoreResult<bool> {
        Ok(self.radio_enabled.load(Ordering::SeqCst))
    }

    async fn set_enabled(&self, enabled: bool) -> CoreResult<()> {
        self.set_enabled_calls.fetch_add(1, Ordering::SeqCst);
        self.radio_enabled.store(enabled, Ordering::SeqCst);
        Ok(())
    }

    async fn current_ssid(&self) -> CoreResult<Option<String>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .associated
            .as_ref()
            .filter(|(_, at)| Instant::now() >= *at)
            .map(|(ssid, _)| ssid.clone()))
    }
}

#[async_trait]
impl JoinStrategy for ScriptedWifi {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn request_join(&self, ssid: &str, _password: &str) -> CoreResult<()> {
        self.state.lock().unwrap().join_calls.push(ssid.to_string());

        let behavior = self
            .behaviors
            .get(ssid)
            .copied()
            .unwrap_or(JoinBehavior::Fail);

        match behavior {
            JoinBehavior::Succeed => {
                self.state.lock().unwrap().associated = Some((ssid.to_string(), Instant::now()));
                Ok(())
            }
            JoinBehavior::SucceedAfter(delay) => {
                self.state.lock().unwrap().associated =
                    Some((ssid.to_string(), Instant::now() + delay));
                Ok(())
            }
            JoinBehavior::Fail => Err(CoreError::PlatformError(format!(
                "Connection to {ssid} failed"
            ))),
            JoinBehavior::Hang => std::future::pending().await,
            JoinBehavior::SettleElsewhere => Ok(()),
        }
    }
}

// ===== MockPermissions =====

pub struct MockPermissions {
    status: PermissionStatus,
    checks: AtomicUsize,
    requests: AtomicUsize,
}

impl MockPermissions {
    pub fn with_status(status: PermissionStatus) -> Self {
        Self {
            status,
            checks: AtomicUsize::new(0),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn granted() -> Self {
        Self::with_status(PermissionStatus::Granted)
    }

    pub fn denied() -> Self {
        Self::with_status(PermissionStatus::Denied)
    }

    pub fn check_count(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionProvider for MockPermissions {
    async fn check(&self, _kind: PermissionKind) -> PermissionStatus {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.status
    }

    async fn request(&self, _kind: PermissionKind) -> PermissionStatus {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.status
    }
}

// ===== 工厂方法 =====

/// Context over `store` with a WiFi stack that fails every join
pub fn create_test_context(store: Arc<dyn CredentialStore>) -> Arc<ServiceContext> {
    let wifi = ScriptedWifi::new();
    Arc::new(ServiceContext::new(
        store,
        Arc::new(wifi.clone()),
        JoinSupport::Programmatic(Arc::new(wifi)),
        Arc::new(MockPermissions::granted()),
    ))
}

/// Context with in-memory storage and the given WiFi stack
pub fn create_context_with(
    wifi: &ScriptedWifi,
    join_support: JoinSupport,
    permissions: Arc<dyn PermissionProvider>,
) -> Arc<ServiceContext> {
    let store = KeyValueCredentialStore::new(Arc::new(InMemoryKeyValueStorage::new()));
    Arc::new(ServiceContext::new(
        Arc::new(store),
        Arc::new(wifi.clone()),
        join_support,
        permissions,
    ))
}

/// Connection service joining through `wifi`, all permissions granted
pub fn create_connection_service(wifi: &ScriptedWifi, config: ConnectConfig) -> ConnectionService {
    let ctx = create_context_with(
        wifi,
        JoinSupport::Programmatic(Arc::new(wifi.clone())),
        Arc::new(MockPermissions::granted()),
    );
    ConnectionService::new(ctx, config)
}
