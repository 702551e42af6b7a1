//! Configuration loading for diagnosd.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.diagnos/config.toml` (user)
//! 3. `/etc/diagnos/config.toml` (system)
//!
//! When none of these exist the built-in defaults are used. The fallback URL
//! can be overridden with `DIAGNOS_FALLBACK_URL`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fallback::http::DEFAULT_BASE_URL;
use crate::{DiagnosError, Result};

/// Environment variable that replaces `fallback.url`.
pub const FALLBACK_URL_ENV: &str = "DIAGNOS_FALLBACK_URL";

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3000).
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// Model artifacts and inference settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Artifact root (default: "models").
    #[serde(default = "default_models_dir")]
    pub dir: PathBuf,
    /// Manifest file, relative to `dir` unless absolute.
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
    /// Device to use: "cpu" or "cuda" (default: "cpu").
    #[serde(default = "default_device")]
    pub device: String,
    /// Models to load at startup.
    #[serde(default)]
    pub preload: Vec<String>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: default_models_dir(),
            manifest: default_manifest(),
            device: default_device(),
            preload: Vec::new(),
        }
    }
}

impl ModelsConfig {
    /// Manifest location with `dir` applied.
    pub fn manifest_path(&self) -> PathBuf {
        if self.manifest.is_absolute() {
            self.manifest.clone()
        } else {
            self.dir.join(&self.manifest)
        }
    }
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("models_manifest.json")
}

fn default_device() -> String {
    "cpu".to_string()
}

/// Remote fallback service.
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Base URL; requests go to `{url}/predict`.
    #[serde(default = "default_fallback_url")]
    pub url: String,
    /// Request timeout in seconds. No timeout when absent.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            url: default_fallback_url(),
            timeout_secs: None,
        }
    }
}

impl FallbackConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_enabled() -> bool {
    true
}

fn default_fallback_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided, must exist)
    /// 2. `~/.diagnos/config.toml`
    /// 3. `/etc/diagnos/config.toml`
    /// 4. Built-in defaults
    ///
    /// Environment overrides are applied last.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(std::env::var(FALLBACK_URL_ENV).ok());
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DiagnosError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml(&content).map_err(|e| {
            DiagnosError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply a fallback URL override, ignoring blank values.
    pub fn apply_overrides(&mut self, fallback_url: Option<String>) {
        if let Some(url) = fallback_url.filter(|u| !u.trim().is_empty()) {
            self.fallback.url = url;
        }
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(DiagnosError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".diagnos").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/diagnos/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}
