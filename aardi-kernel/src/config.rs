use aardi_telemetry::StoreConfig;
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path};
use tokio::fs;
use tracing::warn;

/// Mode demandé dans le fichier de config
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    #[default]
    Auto,
    Live,
    Demo,
}

/// Mode effectif : live interroge OpenObserve, demo ne sert que du synthétique
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Live,
    Demo,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct KernelConfig {
    pub listen: String,
    pub mode: ModeSetting,
    pub telemetry: StoreConfig,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".into(),
            mode: ModeSetting::Auto,
            telemetry: StoreConfig::default(),
        }
    }
}

/// Config résolue (fichier + variables d'environnement)
#[derive(Debug, Clone)]
pub struct Settings {
    pub listen: SocketAddr,
    pub mode: Mode,
    pub telemetry: StoreConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid listen address '{0}'")]
    InvalidListen(String),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn parse_config(txt: &str) -> Result<KernelConfig, ConfigError> {
    if txt.trim().is_empty() {
        return Ok(KernelConfig::default());
    }
    Ok(serde_yaml::from_str(txt)?)
}

/// Applique les overrides d'environnement et fixe le mode.
///
/// `auto` devient `demo` quand `AARDI_ENV=production` sans `OPENOBSERVE_URL`
/// explicite : pas de store joignable en prod, on sert du simulé.
pub fn resolve<F>(mut cfg: KernelConfig, env: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let explicit_url = env("OPENOBSERVE_URL").filter(|v| !v.trim().is_empty());
    if let Some(url) = &explicit_url {
        cfg.telemetry.url = url.clone();
    }
    if let Some(user) = env("OPENOBSERVE_USER") {
        cfg.telemetry.username = user;
    }
    if let Some(password) = env("OPENOBSERVE_PASSWORD") {
        cfg.telemetry.password = password;
    }

    let production = env("AARDI_ENV").map(|v| v == "production").unwrap_or(false);
    let mode = match cfg.mode {
        ModeSetting::Live => Mode::Live,
        ModeSetting::Demo => Mode::Demo,
        ModeSetting::Auto if production && explicit_url.is_none() => Mode::Demo,
        ModeSetting::Auto => Mode::Live,
    };

    let listen = cfg
        .listen
        .parse::<SocketAddr>()
        .map_err(|_| ConfigError::InvalidListen(cfg.listen.clone()))?;

    Ok(Settings { listen, mode, telemetry: cfg.telemetry })
}

pub async fn load_config() -> KernelConfig {
    let path = std::env::var("AARDI_KERNEL_CONFIG").unwrap_or_else(|_| "kernel.yaml".into());
    if Path::new(&path).exists() {
        let txt = fs::read_to_string(&path).await.unwrap_or_default();
        parse_config(&txt).unwrap_or_else(|e| {
            warn!("[kernel] config invalide ({path}): {e}");
            KernelConfig::default()
        })
    } else {
        warn!("[kernel] pas de {path}, usage config par défaut");
        KernelConfig::default()
    }
}
