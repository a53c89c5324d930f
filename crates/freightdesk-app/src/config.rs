//! Configuration management for freightdesk
//!
//! Config stored at: ~/.config/freightdesk/config.json

use chrono::{DateTime, Utc};
use freightdesk_domain::model::Role;
use freightdesk_infra::{Session, DEFAULT_TIMEOUT};
use freightdesk_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the stored token
pub const TOKEN_ENV: &str = "FREIGHTDESK_TOKEN";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// REST backend base URL, including the `/api` prefix
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Bearer token issued by the backend's login endpoint
    #[serde(default)]
    pub token: Option<String>,

    /// When the stored token stops being accepted, if known
    #[serde(default)]
    pub token_expires_at: Option<DateTime<Utc>>,

    /// Username the token belongs to (display only)
    #[serde(default)]
    pub username: Option<String>,

    /// Role of the logged-in user; gates which commands are offered
    #[serde(default)]
    pub role: Option<Role>,
}

fn default_api_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_timeout_secs(),
            output_format: OutputFormat::default(),
            token: None,
            token_expires_at: None,
            username: None,
            role: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("freightdesk");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        let url = self.api_base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "api_base_url".to_string(),
                message: format!("expected an http(s) URL, got {:?}", self.api_base_url),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    /// Build the session for outgoing requests. `env_token` (normally the
    /// value of [`TOKEN_ENV`]) wins over the stored token; the stored expiry
    /// only applies to the stored token.
    pub fn session(&self, env_token: Option<String>) -> Session {
        let mut session = match env_token.filter(|t| !t.trim().is_empty()) {
            Some(token) => Session::new(token),
            None => {
                let session = Session::new(self.token.clone().unwrap_or_default());
                match self.token_expires_at {
                    Some(at) => session.with_expiry(at),
                    None => session,
                }
            }
        };
        if let Some(role) = self.role {
            session = session.with_role(role);
        }
        session
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Freightdesk Configuration")?;
        writeln!(f, "=========================")?;
        writeln!(f)?;
        writeln!(f, "API base URL:   {}", self.api_base_url)?;
        writeln!(f, "Timeout:        {}s", self.request_timeout_secs)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(
            f,
            "Token:          {}",
            if self.token.is_some() { "(set)" } else { "(not set)" }
        )?;
        if let Some(at) = self.token_expires_at {
            writeln!(f, "Token expires:  {}", at.to_rfc3339())?;
        }
        writeln!(
            f,
            "Username:       {}",
            self.username.as_deref().unwrap_or("(unknown)")
        )?;
        writeln!(
            f,
            "Role:           {}",
            self.role.map(|r| r.to_string()).unwrap_or_else(|| "(unknown)".to_string())
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
