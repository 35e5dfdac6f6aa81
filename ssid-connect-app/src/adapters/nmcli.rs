//! NetworkManager WiFi backend.
//!
//! Drives the `nmcli` command line tool. Every call is a short-lived child
//! process; a join request that gets cancelled by the caller's timeout kills
//! its child.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use ssid_connect_core::error::{CoreError, CoreResult};
use ssid_connect_core::traits::{JoinStrategy, WifiRadio};

const DEFAULT_PROGRAM: &str = "nmcli";

/// `nmcli` based radio control and join strategy.
#[derive(Debug, Clone)]
pub struct NmcliWifi {
    program: String,
    interface: Option<String>,
    /// How long NetworkManager may take to activate a connection
    wait: Option<Duration>,
}

impl NmcliWifi {
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            interface: None,
            wait: None,
        }
    }

    /// Use a different executable (absolute path or wrapper script)
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Restrict joins to one wireless interface
    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    /// Bound each join with `nmcli --wait`, rounded up to whole seconds
    #[must_use]
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = Some(wait);
        self
    }

    /// Whether the tool can be run at all
    pub async fn is_available(&self) -> bool {
        match self.run(&["--version"]).await {
            Ok(version) => {
                log::debug!("Found {}", version.trim());
                true
            }
            Err(e) => {
                log::debug!("{} unavailable: {e}", self.program);
                false
            }
        }
    }

    async fn run(&self, args: &[&str]) -> CoreResult<String> {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CoreError::PlatformError(format!("Failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CoreError::PlatformError(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for NmcliWifi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WifiRadio for NmcliWifi {
    async fn is_enabled(&self) -> CoreResult<bool> {
        let output = self.run(&["radio", "wifi"]).await?;
        Ok(output.trim() == "enabled")
    }

    async fn set_enabled(&self, enabled: bool) -> CoreResult<()> {
        let state = if enabled { "on" } else { "off" };
        self.run(&["radio", "wifi", state]).await?;
        Ok(())
    }

    async fn current_ssid(&self) -> CoreResult<Option<String>> {
        let output = self
            .run(&["-t", "-f", "ACTIVE,SSID", "device", "wifi", "list", "--rescan", "no"])
            .await?;
        Ok(parse_active_ssid(&output))
    }
}

#[async_trait]
impl JoinStrategy for NmcliWifi {
    fn name(&self) -> &'static str {
        "nmcli"
    }

    async fn request_join(&self, ssid: &str, password: &str) -> CoreResult<()> {
        let args = self.join_args(ssid, password)?;
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run(&args).await?;
        Ok(())
    }
}

impl NmcliWifi {
    /// Command line for `device wifi connect`.
    ///
    /// nmcli has no `--` separator, so an SSID starting with `-` could be
    /// taken for an option and is refused.
    fn join_args(&self, ssid: &str, password: &str) -> CoreResult<Vec<String>> {
        if ssid.starts_with('-') {
            return Err(CoreError::PlatformError(format!(
                "nmcli cannot join \"{ssid}\": SSID starts with '-'"
            )));
        }

        let mut args = Vec::new();
        if let Some(wait) = self.wait {
            let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
            args.extend(["--wait".to_string(), secs.max(1).to_string()]);
        }
        args.extend(["device", "wifi", "connect", ssid].map(String::from));
        if !password.is_empty() {
            args.extend(["password".to_string(), password.to_string()]);
        }
        if let Some(ref interface) = self.interface {
            args.extend(["ifname".to_string(), interface.clone()]);
        }
        Ok(args)
    }
}

/// Pick the SSID of the active row out of `nmcli -t -f ACTIVE,SSID` output.
///
/// Terse mode escapes `:` and `\` inside values with a backslash.
fn parse_active_ssid(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let ssid = line.strip_prefix("yes:")?;
        let ssid = unescape_terse(ssid);
        (!ssid.is_empty()).then_some(ssid)
    })
}

fn unescape_terse(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_active_row() {
        let output = "no:Neighbour\nyes:Home\nno:Cafe\n";
        assert_eq!(parse_active_ssid(output), Some("Home".to_string()));
    }

    #[test]
    fn none_when_nothing_active() {
        assert_eq!(parse_active_ssid("no:Neighbour\nno:Cafe\n"), None);
        assert_eq!(parse_active_ssid(""), None);
    }

    #[test]
    fn unescapes_colons_and_backslashes() {
        let output = "yes:Lab\\:2\\\\B\n";
        assert_eq!(parse_active_ssid(output), Some("Lab:2\\B".to_string()));
    }

    #[test]
    fn join_args_carry_wait_and_interface() {
        let wifi = NmcliWifi::new()
            .with_wait(Duration::from_millis(10_500))
            .with_interface("wlan0");

        let args = wifi.join_args("Home", "secret").unwrap();

        assert_eq!(
            args,
            [
                "--wait", "11", "device", "wifi", "connect", "Home", "password", "secret",
                "ifname", "wlan0"
            ]
        );
    }

    #[test]
    fn open_network_has_no_password_or_wait() {
        let args = NmcliWifi::new().join_args("Cafe", "").unwrap();
        assert_eq!(args, ["device", "wifi", "connect", "Cafe"]);
    }

    #[test]
    fn sub_second_wait_rounds_up_to_one() {
        let args = NmcliWifi::new()
            .with_wait(Duration::from_millis(200))
            .join_args("Home", "")
            .unwrap();
        assert_eq!(args[..2], ["--wait", "1"]);
    }

    #[tokio::test]
    async fn ssid_looking_like_an_option_is_refused() {
        let wifi = NmcliWifi::new().with_program("/nonexistent/nmcli-for-tests");

        let err = wifi.request_join("--ask", "").await.unwrap_err();

        assert!(matches!(err, CoreError::PlatformError(ref m) if m.contains("starts with '-'")));
    }

    #[tokio::test]
    async fn missing_program_is_unavailable() {
        let wifi = NmcliWifi::new().with_program("/nonexistent/nmcli-for-tests");
        assert!(!wifi.is_available().await);
        assert!(matches!(
            wifi.is_enabled().await,
            Err(CoreError::PlatformError(_))
        ));
    }
}
