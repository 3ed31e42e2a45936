//! Endpoint configuration lookup.
//!
//! Resolution order, first hit wins:
//! 1. an explicit override (the `--api-url` flag)
//! 2. the `BOARDROOM_API_URL` environment variable
//! 3. `api_url` in `config.toml`
//! 4. `BOARDROOM_API_URL` as set when the binary was built

use std::env;
use std::path::PathBuf;

use boardroom_core::config::ClientConfig;
use boardroom_core::error::{BoardroomError, Result};
use serde::{Deserialize, Serialize};

use crate::http_api_client::parse_endpoint;
use crate::storage::AtomicTomlFile;

pub const API_URL_ENV: &str = "BOARDROOM_API_URL";

const BUILD_TIME_API_URL: Option<&str> = option_env!("BOARDROOM_API_URL");

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

/// Loads and stores client configuration.
pub struct ConfigService {
    file: AtomicTomlFile<ConfigFile>,
    build_default: Option<String>,
}

impl ConfigService {
    pub fn new(config_file: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(config_file),
            build_default: BUILD_TIME_API_URL.map(str::to_string),
        }
    }

    /// Replaces the build-time fallback URL.
    pub fn with_build_default(mut self, url: Option<String>) -> Self {
        self.build_default = url;
        self
    }

    /// Resolves the configuration using the process environment.
    pub fn resolve(&self, override_url: Option<&str>) -> Result<ClientConfig> {
        self.resolve_with_env(override_url, env::var(API_URL_ENV).ok())
    }

    /// Resolves the configuration with an explicit environment value.
    pub fn resolve_with_env(
        &self,
        override_url: Option<&str>,
        env_url: Option<String>,
    ) -> Result<ClientConfig> {
        let (source, url) = if let Some(url) = non_blank(override_url.map(str::to_string)) {
            ("flag", url)
        } else if let Some(url) = non_blank(env_url) {
            ("environment", url)
        } else if let Some(url) = non_blank(self.file.load()?.and_then(|f| f.api_url)) {
            ("config file", url)
        } else if let Some(url) = non_blank(self.build_default.clone()) {
            ("build default", url)
        } else {
            return Err(BoardroomError::config(format!(
                "No API URL configured. Pass --api-url, set {}, or add api_url to {}",
                API_URL_ENV,
                self.file.path().display()
            )));
        };

        parse_endpoint(&url)?;
        tracing::debug!(source, api_url = %url, "Resolved API URL");
        Ok(ClientConfig::new(url))
    }

    /// Stores `api_url` in `config.toml`, keeping any other settings.
    pub fn set_api_url(&self, url: &str) -> Result<()> {
        parse_endpoint(url)?;
        self.file.update(ConfigFile::default(), |config| {
            config.api_url = Some(url.trim().to_string());
            Ok(())
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(temp_dir: &TempDir) -> ConfigService {
        ConfigService::new(temp_dir.path().join("config.toml")).with_build_default(None)
    }

    #[test]
    fn test_override_beats_everything() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        service.set_api_url("https://file.example.test/exec").unwrap();

        let config = service
            .resolve_with_env(
                Some("https://flag.example.test/exec"),
                Some("https://env.example.test/exec".to_string()),
            )
            .unwrap();
        assert_eq!(config.api_url, "https://flag.example.test/exec");
    }

    #[test]
    fn test_env_beats_file() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        service.set_api_url("https://file.example.test/exec").unwrap();

        let config = service
            .resolve_with_env(None, Some("https://env.example.test/exec".to_string()))
            .unwrap();
        assert_eq!(config.api_url, "https://env.example.test/exec");
    }

    #[test]
    fn test_file_then_build_default() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir)
            .with_build_default(Some("https://built.example.test/exec".to_string()));
        assert_eq!(
            service.resolve_with_env(None, None).unwrap().api_url,
            "https://built.example.test/exec"
        );

        service.set_api_url("https://file.example.test/exec").unwrap();
        assert_eq!(
            service.resolve_with_env(None, Some("  ".to_string())).unwrap().api_url,
            "https://file.example.test/exec"
        );
    }

    #[test]
    fn test_missing_configuration_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = service(&temp_dir).resolve_with_env(None, None).unwrap_err();
        assert!(matches!(err, BoardroomError::Config(_)));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        assert!(service.set_api_url("not a url").is_err());
        assert!(service.resolve_with_env(Some("ftp://x.test"), None).is_err());
    }
}
