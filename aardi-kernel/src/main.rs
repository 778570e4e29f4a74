/**
 * AARDI KERNEL - Point d'entrée du serveur dashboard vocal
 *
 * RÔLE : Charge la config, prépare la source de métriques (OpenObserve ou
 * simulée) et sert l'API HTTP + la page dashboard.
 *
 * FLUX : navigateur -> POST /api/voice -> (OpenObserve | aléatoire) -> cartes
 */

mod cards;
mod commands;
mod config;
mod health;
mod http;
mod metrics;
mod models;

use crate::config::{load_config, resolve, Mode};
use crate::health::HealthTracker;
use crate::http::AppState;
use crate::metrics::MetricsSource;

use aardi_telemetry::OpenObserveClient;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Charger les variables d'environnement depuis .env (si présent)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aardi_kernel=info,aardi_telemetry=info")),
        )
        .init();

    let settings = resolve(load_config().await, |key| std::env::var(key).ok())
        .context("invalid kernel configuration")?;

    match settings.mode {
        Mode::Live => info!("[kernel] live mode, OpenObserve at {}", settings.telemetry.url),
        Mode::Demo => info!("[kernel] demo mode, serving simulated metrics"),
    }

    let client = OpenObserveClient::new(settings.telemetry.clone())
        .context("failed to build OpenObserve client")?;

    let app_state = AppState {
        source: MetricsSource::new(settings.mode, client),
        health: HealthTracker::new(settings.mode),
    };

    let app = http::build_router(app_state);

    let listener = TcpListener::bind(settings.listen)
        .await
        .with_context(|| format!("failed to bind {}", settings.listen))?;
    info!("[kernel] listening on http://{}", settings.listen);
    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
