//! System WiFi settings launchers.

use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tokio::task::JoinHandle;

use ssid_connect_core::error::{CoreError, CoreResult};
use ssid_connect_core::traits::SettingsLauncher;

/// Opens the settings surface by spawning a command.
///
/// The caller does not wait for the command; a background task reaps it.
#[derive(Debug, Clone)]
pub struct CommandSettingsLauncher {
    program: String,
    args: Vec<String>,
}

impl CommandSettingsLauncher {
    #[must_use]
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(ToString::to_string).collect(),
        }
    }

    /// The WiFi settings surface of the current desktop platform
    #[must_use]
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("open", &["x-apple.systempreferences:com.apple.preference.network"])
        } else if cfg!(target_os = "windows") {
            Self::new("cmd", &["/C", "start", "ms-settings:network-wifi"])
        } else {
            Self::new("nm-connection-editor", &[])
        }
    }
}

impl CommandSettingsLauncher {
    /// Spawn the command and a task that waits for it to exit.
    fn launch(&self) -> CoreResult<JoinHandle<Option<ExitStatus>>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CoreError::PlatformError(format!("Failed to open WiFi settings: {e}")))?;

        let program = self.program.clone();
        Ok(tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => {
                    if !status.success() {
                        log::warn!("{program} exited with {status}");
                    }
                    Some(status)
                }
                Err(e) => {
                    log::warn!("Failed to wait for {program}: {e}");
                    None
                }
            }
        }))
    }
}

#[async_trait]
impl SettingsLauncher for CommandSettingsLauncher {
    async fn open_wifi_settings(&self) -> CoreResult<()> {
        log::info!("Opening WiFi settings with {}", self.program);
        self.launch().map(drop)
    }
}

/// Launcher for headless environments: only records the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSettingsLauncher;

#[async_trait]
impl SettingsLauncher for LoggingSettingsLauncher {
    async fn open_wifi_settings(&self) -> CoreResult<()> {
        log::info!("Open the system WiFi settings to join a saved network");
        Ok(())
    }
}
