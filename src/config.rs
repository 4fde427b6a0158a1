use crate::constants;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings, including the
/// StartGG bearer credential the sync pipeline treats as opaque.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Bearer token for the StartGG API. Sent verbatim in the
    /// `Authorization` header of every GraphQL request.
    pub api_token: String,
    /// GraphQL endpoint URL. Should include https:// prefix.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Path to the log file. If not specified, logs will be written to a
    /// default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if
    /// not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_api_url() -> String {
    constants::DEFAULT_API_URL.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_token: String::new(),
            api_url: default_api_url(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `STARTGG_SYNC_TOKEN` - Override API bearer token
    /// - `STARTGG_SYNC_API_URL` - Override GraphQL endpoint
    /// - `STARTGG_SYNC_LOG_FILE` - Override log file path
    /// - `STARTGG_SYNC_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(AppError)` - No usable credential found or config is invalid
    pub async fn load() -> Result<Self, AppError> {
        Self::load_from_path(&Self::get_config_path()).await
    }

    /// Loads configuration from an explicit path, applying the same
    /// environment overrides and validation as [`Config::load`].
    pub async fn load_from_path(config_path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(config_path).exists() {
            let content = fs::read_to_string(config_path).await?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // Override with environment variables if present
        if let Ok(api_token) = std::env::var(constants::env_vars::API_TOKEN) {
            config.api_token = api_token;
        }

        if let Ok(api_url) = std::env::var(constants::env_vars::API_URL) {
            config.api_url = api_url;
        }

        if let Ok(log_file_path) = std::env::var(constants::env_vars::LOG_FILE) {
            config.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(constants::env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        if self.api_token.trim().is_empty() {
            return Err(AppError::config_error(format!(
                "StartGG API token is not set. Add api_token to {} or set {}",
                Self::get_config_path(),
                constants::env_vars::API_TOKEN
            )));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(AppError::config_error(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api_url
            )));
        }
        if self.http_timeout_seconds == 0 {
            return Err(AppError::config_error(
                "HTTP timeout must be greater than zero seconds",
            ));
        }
        Ok(())
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        self.save_to_path(&Self::get_config_path()).await
    }

    /// Saves current configuration to an explicit path, creating parent
    /// directories as needed. Uses TOML format for storage.
    pub async fn save_to_path(&self, config_path: &str) -> Result<(), AppError> {
        if let Some(parent) = Path::new(config_path).parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content).await?;
        Ok(())
    }

    /// Returns the platform-specific path for the config file.
    ///
    /// Uses the platform config directory (e.g. ~/.config on Linux) and
    /// falls back to the current directory if it is unavailable.
    pub fn get_config_path() -> String {
        let base: PathBuf = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("startgg_sync")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        let base: PathBuf = dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("startgg_sync")
            .join("logs")
            .to_string_lossy()
            .to_string()
    }

    /// Formats the configuration for display, masking all but the last four
    /// characters of the credential.
    pub fn display(&self) -> String {
        let masked = if self.api_token.len() > 4 {
            format!(
                "{}{}",
                "*".repeat(self.api_token.len() - 4),
                &self.api_token[self.api_token.len() - 4..]
            )
        } else {
            "*".repeat(self.api_token.len())
        };
        format!(
            "api_token: {}\napi_url: {}\nlog_file_path: {}\nhttp_timeout_seconds: {}",
            masked,
            self.api_url,
            self.log_file_path.as_deref().unwrap_or("(default)"),
            self.http_timeout_seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn test_config() -> Config {
        Config {
            api_token: "abcd1234token".to_string(),
            api_url: "https://api.start.gg/gql/alpha".to_string(),
            log_file_path: None,
            http_timeout_seconds: 30,
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir
            .path()
            .join("config.toml")
            .to_string_lossy()
            .to_string();

        let config = test_config();
        config.save_to_path(&path).await.unwrap();

        let loaded = Config::load_from_path(&path).await.unwrap();
        assert_eq!(loaded.api_token, "abcd1234token");
        assert_eq!(loaded.api_url, "https://api.start.gg/gql/alpha");
        assert_eq!(loaded.http_timeout_seconds, 30);
    }

    #[tokio::test]
    #[serial]
    async fn test_load_missing_file_without_token_fails() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir
            .path()
            .join("nonexistent.toml")
            .to_string_lossy()
            .to_string();

        unsafe {
            std::env::remove_var(constants::env_vars::API_TOKEN);
        }
        let result = Config::load_from_path(&path).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_env_token_overrides_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir
            .path()
            .join("config.toml")
            .to_string_lossy()
            .to_string();
        test_config().save_to_path(&path).await.unwrap();

        unsafe {
            std::env::set_var(constants::env_vars::API_TOKEN, "env-token");
        }
        let loaded = Config::load_from_path(&path).await.unwrap();
        unsafe {
            std::env::remove_var(constants::env_vars::API_TOKEN);
        }

        assert_eq!(loaded.api_token, "env-token");
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = test_config();
        config.api_url = "ftp://example.com".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = test_config();
        config.http_timeout_seconds = 0;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_display_masks_token() {
        let config = test_config();
        let shown = config.display();
        assert!(!shown.contains("abcd1234token"));
        assert!(shown.contains("oken"));
    }
}
