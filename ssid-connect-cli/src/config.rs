//! Data directory and tuning configuration

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use ssid_connect_core::types::ConnectConfig;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "SSID_CONNECT_DATA_DIR";
pub const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "ssid-connect";

/// Optional overrides read from `config.json`
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub join_timeout_secs: Option<u64>,
    pub verify_window_secs: Option<u64>,
    pub verify_poll_millis: Option<u64>,
}

impl FileConfig {
    /// Connection tuning with these overrides applied on top of the defaults
    pub fn connect_config(&self) -> Result<ConnectConfig> {
        let mut config = ConnectConfig::default();
        if let Some(secs) = self.join_timeout_secs {
            config.join_timeout = Duration::from_secs(non_zero("join_timeout_secs", secs)?);
        }
        if let Some(secs) = self.verify_window_secs {
            config.verify_window = Duration::from_secs(secs);
        }
        if let Some(millis) = self.verify_poll_millis {
            config.verify_poll_interval =
                Duration::from_millis(non_zero("verify_poll_millis", millis)?);
        }
        Ok(config)
    }
}

fn non_zero(field: &str, value: u64) -> Result<u64> {
    if value == 0 {
        bail!("{field} must be greater than zero");
    }
    Ok(value)
}

/// Pick the data directory: flag, then environment, then the platform default.
pub fn resolve_data_dir(flag: Option<PathBuf>, env: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = env.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .context("Could not determine a data directory, pass --data-dir")
}

/// Read `config.json` from the data directory; a missing file means defaults.
pub fn load_file_config(data_dir: &Path) -> Result<FileConfig> {
    let path = data_dir.join(CONFIG_FILE_NAME);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_env() {
        let dir = resolve_data_dir(Some("/flag".into()), Some("/env".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/flag"));
    }

    #[test]
    fn env_used_without_flag() {
        let dir = resolve_data_dir(None, Some("/env".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/env"));
    }

    #[test]
    fn empty_env_is_ignored() {
        if let Ok(dir) = resolve_data_dir(None, Some(OsString::new())) {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
    }

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let file = load_file_config(tmp.path()).unwrap();
        assert_eq!(file, FileConfig::default());

        let config = file.connect_config().unwrap();
        assert_eq!(config.join_timeout, ConnectConfig::DEFAULT_JOIN_TIMEOUT);
        assert_eq!(config.verify_window, ConnectConfig::DEFAULT_VERIFY_WINDOW);
    }

    #[test]
    fn overrides_are_applied() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"{"join_timeout_secs": 20, "verify_poll_millis": 250}"#,
        )
        .unwrap();

        let config = load_file_config(tmp.path())
            .unwrap()
            .connect_config()
            .unwrap();

        assert_eq!(config.join_timeout, Duration::from_secs(20));
        assert_eq!(config.verify_poll_interval, Duration::from_millis(250));
        assert_eq!(config.verify_window, ConnectConfig::DEFAULT_VERIFY_WINDOW);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "{join_timeout_secs: ").unwrap();
        assert!(load_file_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_field_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), r#"{"timeout": 5}"#).unwrap();
        assert!(load_file_config(tmp.path()).is_err());
    }

    #[test]
    fn zero_join_timeout_rejected() {
        let file = FileConfig {
            join_timeout_secs: Some(0),
            ..FileConfig::default()
        };
        assert!(file.connect_config().is_err());
    }
}
