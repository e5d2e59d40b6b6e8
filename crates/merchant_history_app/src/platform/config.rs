//! Application configuration, read from a RON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use history_logging::{history_info, history_warn};
use merchant_history_engine::FetchSettings;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

/// Environment variable naming the config file when no CLI argument is given.
pub const CONFIG_ENV: &str = "MERCHANT_HISTORY_CONFIG";
const DEFAULT_CONFIG_FILENAME: &str = "merchant_history.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    /// Unset means no connect timeout.
    pub connect_timeout_ms: Option<u64>,
    /// Unset means a fetch may take as long as the server needs.
    pub request_timeout_ms: Option<u64>,
    pub max_response_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_base_url: "http://localhost:8080/api/".to_string(),
            session_file: PathBuf::from("./session.json"),
            log_destination: LogDestination::File,
            log_file: PathBuf::from("./merchant_history.log"),
            connect_timeout_ms: fetch.connect_timeout.map(|timeout| timeout.as_millis() as u64),
            request_timeout_ms: fetch.request_timeout.map(|timeout| timeout.as_millis() as u64),
            max_response_bytes: fetch.max_bytes,
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
            max_bytes: self.max_response_bytes,
        }
    }
}

/// Picks the config path: first CLI argument, then `MERCHANT_HISTORY_CONFIG`, then the default file.
pub fn config_path(arg: Option<String>, env: Option<String>) -> PathBuf {
    arg.or(env)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
}

/// Loads the config, falling back to defaults when the file is missing or malformed.
///
/// Runs before the logger exists, so problems are returned as messages to log later.
pub fn load(path: &Path) -> (AppConfig, Option<String>) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), None);
        }
        Err(err) => {
            return (
                AppConfig::default(),
                Some(format!("Failed to read config from {path:?}: {err}")),
            );
        }
    };

    match ron::from_str(&content) {
        Ok(config) => (config, None),
        Err(err) => (
            AppConfig::default(),
            Some(format!("Failed to parse config from {path:?}: {err}")),
        ),
    }
}

pub fn report(path: &Path, problem: Option<String>) {
    match problem {
        Some(message) => history_warn!("{}; using defaults", message),
        None => history_info!("Configuration resolved from {:?}", path),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::{config_path, load, AppConfig};
    use crate::platform::logging::LogDestination;

    #[test]
    fn cli_argument_wins_over_env() {
        assert_eq!(
            config_path(Some("a.ron".into()), Some("b.ron".into())),
            PathBuf::from("a.ron")
        );
        assert_eq!(config_path(None, Some("b.ron".into())), PathBuf::from("b.ron"));
        assert_eq!(config_path(None, None), PathBuf::from("merchant_history.ron"));
    }

    #[test]
    fn missing_file_uses_defaults_silently() {
        let temp = TempDir::new().unwrap();
        let (config, problem) = load(&temp.path().join("absent.ron"));
        assert_eq!(config, AppConfig::default());
        assert!(problem.is_none());
    }

    #[test]
    fn partial_file_overrides_some_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ron");
        fs::write(
            &path,
            r#"(api_base_url: "https://parcels.example.com/", log_destination: Terminal, request_timeout_ms: Some(500))"#,
        )
        .unwrap();

        let (config, problem) = load(&path);
        assert!(problem.is_none());
        assert_eq!(config.api_base_url, "https://parcels.example.com/");
        assert_eq!(config.log_destination, LogDestination::Terminal);
        assert_eq!(
            config.fetch_settings().request_timeout,
            Some(Duration::from_millis(500))
        );
        assert_eq!(config.fetch_settings().connect_timeout, None);
        assert_eq!(config.session_file, AppConfig::default().session_file);
    }

    #[test]
    fn default_config_enforces_no_timeouts() {
        let settings = AppConfig::default().fetch_settings();
        assert_eq!(settings.connect_timeout, None);
        assert_eq!(settings.request_timeout, None);
    }

    #[test]
    fn malformed_file_reports_problem() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ron");
        fs::write(&path, "(api_base_url: ").unwrap();

        let (config, problem) = load(&path);
        assert_eq!(config, AppConfig::default());
        assert!(problem.unwrap().contains("Failed to parse config"));
    }
}
