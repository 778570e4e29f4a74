//! Generator configuration
//!
//! Resolution order:
//! - explicit `--config` file (must parse)
//! - `<config dir>/aardi/generator.toml` when present
//! - built-in defaults
//!
//! `OPENOBSERVE_URL`, `OPENOBSERVE_USER` and `OPENOBSERVE_PASSWORD` override
//! the store settings in every case.

use aardi_telemetry::StoreConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub store: StoreConfig,
    pub interval_secs: u64,
    pub source: String,
    pub environment: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            interval_secs: 2,
            source: "aardi-simulator".to_string(),
            environment: "production".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path).await?,
            None => match Self::default_file_path() {
                Some(path) if path.exists() => Self::from_file(&path).await?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid generator config {}", path.display()))
    }

    pub fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env("OPENOBSERVE_URL").filter(|v| !v.trim().is_empty()) {
            self.store.url = url;
        }
        if let Some(user) = env("OPENOBSERVE_USER") {
            self.store.username = user;
        }
        if let Some(password) = env("OPENOBSERVE_PASSWORD") {
            self.store.password = password;
        }
    }

    /// OS-specific default location
    pub fn default_file_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("aardi");
        path.push("generator.toml");
        Some(path)
    }
}
