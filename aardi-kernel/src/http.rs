/**
 * API HTTP AARDI - Serveur du dashboard vocal
 *
 * RÔLE :
 * Expose la page dashboard (reconnaissance vocale côté navigateur) et
 * l'endpoint qui transforme une commande parlée en cartes.
 *
 * ROUTES :
 * - GET  /               : page dashboard (HTML/JS embarqué)
 * - GET  /health         : liveness
 * - GET  /system/health  : compteurs et mode
 * - POST /api/voice      : { command } -> { cards, response }
 *
 * Aucune erreur métier n'est renvoyée au client : le store indisponible
 * donne des métriques simulées, jamais un 5xx.
 */

use axum::{extract::State, response::Html, routing::{get, post}, Json, Router};
use time::OffsetDateTime;
use tracing::info;

use crate::cards::build_response;
use crate::commands::classify;
use crate::health::{HealthTracker, KernelHealth};
use crate::metrics::MetricsSource;
use crate::models::{VoiceRequest, VoiceResponse};

const DASHBOARD_PAGE: &str = include_str!("../assets/dashboard.html");

#[derive(Clone)]
pub struct AppState {
    pub source: MetricsSource,
    pub health: HealthTracker,
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/health", get(|| async { "ok" }))
        .route("/system/health", get(get_system_health))
        .route("/api/voice", post(process_command))
        .with_state(app_state)
}

// GET / (page dashboard)
async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

// GET /system/health
async fn get_system_health(State(app): State<AppState>) -> Json<KernelHealth> {
    Json(app.health.get_health())
}

// POST /api/voice
async fn process_command(
    State(app): State<AppState>,
    Json(req): Json<VoiceRequest>,
) -> Json<VoiceResponse> {
    info!("Processing command: {}", req.command);

    let (metrics, origin) = app.source.fetch().await;
    info!(?origin, "Metrics source");

    let categories = classify(&req.command);
    let out = build_response(&categories, &metrics, app.source.mode(), OffsetDateTime::now_utc());
    app.health.record_command(origin);
    Json(out)
}
