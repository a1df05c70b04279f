//! Configuration handling for the TUI

use crate::state::DEFAULT_ALERT_TIMEOUT;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Production site
pub const DEFAULT_BASE_URL: &str = "https://regionalveiculos.com.br/";

/// Environment variable overriding the site address
pub const BASE_URL_ENV: &str = "REGIONAL_BASE_URL";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Site address the forms are posted to
    pub base_url: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// How long alerts stay visible, in milliseconds
    pub alert_timeout_ms: Option<u64>,
    /// Anti-forgery token to use instead of fetching one
    pub csrf_token: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("br.com", "regionalveiculos", "regional-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let config: TuiConfig = serde_json::from_str(&content)
                    .with_context(|| format!("Invalid config in {}", path.display()))?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Site address: explicit value, then environment, then file, then default
    pub fn resolve_base_url(&self, explicit: Option<&str>) -> Result<Url> {
        let env = std::env::var(BASE_URL_ENV).ok();
        let raw = explicit
            .map(str::to_string)
            .or(env)
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        parse_base_url(&raw)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn alert_timeout(&self) -> Duration {
        self.alert_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_ALERT_TIMEOUT)
    }
}

/// Parse a base URL, making sure relative joins stay under its path
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).with_context(|| format!("Invalid base URL: {raw}"))
}
