//! Configuration management for ladle.
//!
//! Loads configuration from ${LADLE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the recipe API.
    pub base_url: String,
    /// Request timeout in seconds. Applies to every request the client issues.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Config::DEFAULT_BASE_URL.to_string(),
            timeout_secs: Config::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
}

impl Config {
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes a default config template to the default path, if not present.
    ///
    /// Returns true if a file was written.
    pub fn init() -> Result<bool> {
        let path = paths::config_path();
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(true)
    }

    /// Resolves the effective base URL with precedence: env > config > default.
    pub fn resolve_base_url(&self) -> Result<String> {
        if let Ok(env_url) = std::env::var("LADLE_BASE_URL") {
            let trimmed = env_url.trim();
            if !trimmed.is_empty() {
                validate_url(trimmed)?;
                return Ok(trimmed.to_string());
            }
        }

        let trimmed = self.api.base_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.trim_end_matches('/').to_string());
        }

        Ok(Self::DEFAULT_BASE_URL.to_string())
    }

    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid API base URL: {url}"))?;
    Ok(())
}

/// Default config file content written by `ladle config init`.
fn default_config_template() -> &'static str {
    r#"# ladle configuration

[api]
# Base URL of the recipe API
base_url = "http://localhost:8080/api"
# Request timeout in seconds
timeout_secs = 30
"#
}

pub mod paths {
    //! Path resolution for ladle configuration and data files.
    //!
    //! LADLE_HOME resolution order:
    //! 1. LADLE_HOME environment variable (if set)
    //! 2. ~/.config/ladle (default)

    use std::path::PathBuf;

    /// Returns the ladle home directory.
    ///
    /// Checks LADLE_HOME env var first, falls back to ~/.config/ladle
    pub fn ladle_home() -> PathBuf {
        if let Ok(home) = std::env::var("LADLE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("ladle"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        ladle_home().join("config.toml")
    }
}
