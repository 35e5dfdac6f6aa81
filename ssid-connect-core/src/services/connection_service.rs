//! Network attempt engine
//!
//! Walks the saved networks in order and asks the platform to join each one
//! until the device reports being associated with the requested SSID.
//! One bad network never stops the pass; only the aggregate outcome is
//! returned to the caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::time::{sleep, timeout, Instant};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::JoinStrategy;
use crate::types::{
    AttemptOutcome, AttemptRecord, ConnectConfig, ConnectReport, JoinSupport, NetworkCredential,
};

/// Clears the in-progress flag when a pass ends, including on cancellation.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Sequential connection service
pub struct ConnectionService {
    ctx: Arc<ServiceContext>,
    config: ConnectConfig,
    running: AtomicBool,
}

impl ConnectionService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, config: ConnectConfig) -> Self {
        Self {
            ctx,
            config,
            running: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ConnectConfig {
        &self.config
    }

    /// Whether a connection pass is currently running
    pub fn is_connecting(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Load the saved networks and connect to the first reachable one
    pub async fn connect_saved(&self) -> CoreResult<ConnectReport> {
        let candidates = self.ctx.credential_store().load().await?;
        self.connect_best(&candidates).await
    }

    /// Connect to the first reachable network among `candidates`
    ///
    /// Order of checks: another pass running → platform restricted →
    /// permission missing → nothing to try. Then the radio is switched on if
    /// needed and candidates are tried one by one, stopping at the first
    /// verified association.
    pub async fn connect_best(
        &self,
        candidates: &[NetworkCredential],
    ) -> CoreResult<ConnectReport> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::warn!("Connect requested while a connection pass is running");
            return Err(CoreError::ConnectionInProgress);
        }
        let _guard = RunGuard(&self.running);

        let strategy = match self.ctx.join_support() {
            JoinSupport::Restricted => {
                log::info!("Platform does not allow programmatic WiFi association");
                return Err(CoreError::PlatformRestricted);
            }
            JoinSupport::Programmatic(strategy) => Arc::clone(strategy),
        };

        if let Some(kind) = self.config.required_permission {
            let status = self.ctx.permission_provider().check(kind).await;
            if !status.is_granted() {
                log::warn!("Refusing to connect without {kind} permission");
                return Err(CoreError::PermissionDenied(kind));
            }
        }

        if candidates.is_empty() {
            return Err(CoreError::NoSavedNetworks);
        }

        self.ensure_radio_enabled().await;

        log::info!(
            "Trying {} saved networks using {}",
            candidates.len(),
            strategy.name()
        );

        let mut attempts = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let outcome = self.attempt(strategy.as_ref(), candidate).await;
            let connected = outcome == AttemptOutcome::Connected;
            attempts.push(AttemptRecord {
                ssid: candidate.ssid.clone(),
                outcome,
            });

            if connected {
                log::info!("Connected to {}", candidate.ssid);
                return Ok(ConnectReport {
                    ssid: candidate.ssid.clone(),
                    attempts,
                });
            }
        }

        log::warn!("None of the {} saved networks could be joined", attempts.len());
        Err(CoreError::ConnectionFailure {
            attempted: attempts.len(),
        })
    }

    /// Best effort: ask for the radio to be turned on, don't wait for it.
    async fn ensure_radio_enabled(&self) {
        match self.ctx.radio().is_enabled().await {
            Ok(true) => {}
            Ok(false) => {
                log::info!("WiFi radio is off, requesting enable");
                if let Err(e) = self.ctx.radio().set_enabled(true).await {
                    log::warn!("Failed to enable WiFi radio: {e}");
                }
            }
            Err(e) => log::warn!("Could not read WiFi radio state: {e}"),
        }
    }

    async fn attempt(
        &self,
        strategy: &dyn JoinStrategy,
        candidate: &NetworkCredential,
    ) -> AttemptOutcome {
        log::debug!("Joining {}", candidate.ssid);

        match timeout(
            self.config.join_timeout,
            strategy.request_join(&candidate.ssid, &candidate.password),
        )
        .await
        {
            Err(_) => {
                log::warn!(
                    "Join request for {} did not settle within {:?}",
                    candidate.ssid,
                    self.config.join_timeout
                );
                return AttemptOutcome::TimedOut;
            }
            Ok(Err(e)) => {
                log::warn!("Failed to connect to {}: {e}", candidate.ssid);
                return AttemptOutcome::JoinFailed {
                    reason: e.to_string(),
                };
            }
            Ok(Ok(())) => {}
        }

        self.verify(&candidate.ssid).await
    }

    /// Poll the associated SSID until it matches or the window closes.
    async fn verify(&self, ssid: &str) -> AttemptOutcome {
        let deadline = Instant::now() + self.config.verify_window;

        loop {
            let read = timeout(self.config.join_timeout, self.ctx.radio().current_ssid());
            let current = match read.await {
                Ok(Ok(current)) => current,
                Ok(Err(e)) => {
                    log::debug!("Could not read current SSID: {e}");
                    None
                }
                Err(_) => None,
            };

            if current.as_deref() == Some(ssid) {
                return AttemptOutcome::Connected;
            }

            if Instant::now() >= deadline {
                log::warn!(
                    "Join request for {ssid} settled but device is on {}",
                    current.as_deref().unwrap_or("no network")
                );
                return AttemptOutcome::NotVerified {
                    current_ssid: current,
                };
            }

            sleep(self.config.verify_poll_interval).await;
        }
    }
}
