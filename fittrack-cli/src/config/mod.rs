use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::User;

/// Environment variable selecting an alternative config file
pub const CONFIG_ENV: &str = "FITTRACK_CONFIG";

/// Environment variable overriding the stored bearer token
pub const TOKEN_ENV: &str = "FITTRACK_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub ui: UiConfig,

    /// File this config was loaded from; `save` writes back here
    #[serde(skip)]
    path: Option<PathBuf>,

    /// Token from `FITTRACK_TOKEN`; used for requests, never saved
    #[serde(skip)]
    token_override: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer token. Older clients stored it under other key names.
    #[serde(
        default,
        alias = "access_token",
        alias = "auth_token",
        alias = "authToken"
    )]
    pub token: String,

    /// Cached copy of the signed-in user, refreshed from server responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_trend_period")]
    pub default_trend_period: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_trend_period() -> String {
    "week".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            ui: UiConfig::default(),
            path: None,
            token_override: None,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            default_trend_period: default_trend_period(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.fittrack/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".fittrack"))
    }

    /// Get config file path, honouring `FITTRACK_CONFIG`
    pub fn config_file() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str::<Config>(&contents).context("Failed to parse config file")?
        } else {
            tracing::info!("Config file not found at {}, using defaults", path.display());
            Config::default()
        };

        config.path = Some(path.to_path_buf());
        config.apply_env_overrides();
        Ok(config)
    }

    /// Attach a backing file without loading it
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// File that `save` writes to
    pub fn path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Self::config_file(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.is_empty() {
                tracing::debug!("Using bearer token from {}", TOKEN_ENV);
                self.override_token(token);
            }
        }
    }

    /// Authenticate with `token` for this process only. The stored token is
    /// left as it is on disk. Empty tokens are ignored.
    pub fn override_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !token.is_empty() {
            self.token_override = Some(token);
        }
    }

    /// Whether the active token comes from the environment
    pub fn is_token_overridden(&self) -> bool {
        self.token_override.is_some()
    }

    /// Bearer token for requests: the override if set, else the stored one
    pub fn token(&self) -> &str {
        self.token_override.as_deref().unwrap_or(&self.auth.token)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_file = self.path()?;
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_file, contents).context("Failed to write config file")?;

        tracing::debug!("Saved config to {}", config_file.display());
        Ok(())
    }

    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        !self.token().is_empty()
    }

    /// Store a new session; it replaces any token override
    pub fn set_session(&mut self, token: String, user: Option<User>) {
        self.token_override = None;
        self.auth.token = token;
        self.auth.user = user;
    }

    /// Replace the cached user
    pub fn cache_user(&mut self, user: User) {
        self.auth.user = Some(user);
    }

    /// Forget the token and cached user
    pub fn clear_session(&mut self) {
        self.token_override = None;
        self.auth.token.clear();
        self.auth.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.ui.default_trend_period, "week");
        assert!(!config.is_authenticated());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config.api.base_url, deserialized.api.base_url);
        assert_eq!(config.ui.date_format, deserialized.ui.date_format);
    }

    #[test]
    fn test_legacy_token_keys() {
        for key in ["token", "access_token", "auth_token", "authToken"] {
            let raw = format!("[auth]\n{} = \"abc\"\n", key);
            let config: Config = toml::from_str(&raw).unwrap();
            assert_eq!(config.auth.token, "abc", "key {}", key);
        }
    }

    #[test]
    fn test_save_writes_to_attached_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default().with_path(&path);
        config.set_session("secret".to_string(), None);
        config.save().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("secret"));
    }

    #[test]
    fn test_token_override_is_used_but_not_saved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default().with_path(&path);
        config.set_session("stored".to_string(), None);
        config.override_token("from-env");

        assert_eq!(config.token(), "from-env");
        assert_eq!(config.auth.token, "stored");
        assert!(config.is_token_overridden());

        config.save().unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("stored"));
        assert!(!contents.contains("from-env"));
    }

    #[test]
    fn test_token_override_alone_authenticates() {
        let mut config = Config::default();
        config.override_token("");
        assert!(!config.is_authenticated());

        config.override_token("from-env");
        assert!(config.is_authenticated());

        config.clear_session();
        assert!(!config.is_authenticated());
        assert!(!config.is_token_overridden());
    }

    #[test]
    fn test_new_session_replaces_override() {
        let mut config = Config::default();
        config.override_token("from-env");
        config.set_session("fresh".to_string(), None);
        assert_eq!(config.token(), "fresh");
    }
}
