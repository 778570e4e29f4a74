/*!
Stub OpenObserve pour développement sans store réel

Serveur HTTP axum en process qui imite les deux routes utilisées par AARDI:
- `POST /api/{org}/{stream}/_json` : enregistre le record ingéré
- `POST /api/{org}/_search`        : renvoie le dernier record dans `hits`

Le comportement peut être basculé pour simuler les pannes (statut HTTP,
résultat vide, réponse illisible).
*/

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use anyhow::Result;

/// Comportement du stub pour les requêtes suivantes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBehavior {
    #[default]
    Normal,
    /// `_search` répond 200 avec `hits: []`
    Empty,
    /// Toutes les routes répondent avec ce statut
    Fail(u16),
    /// `_search` répond 200 avec un corps qui n'est pas du JSON
    Garbage,
}

#[derive(Debug, Default)]
struct StoreInner {
    behavior: StoreBehavior,
    records: Vec<Value>,
    ingested: Vec<Value>,
    searches: Vec<Value>,
    last_authorization: Option<String>,
}

type SharedInner = Arc<Mutex<StoreInner>>;

/// Faux OpenObserve lié à un port éphémère sur 127.0.0.1
pub struct StubStore {
    addr: SocketAddr,
    inner: SharedInner,
    task: JoinHandle<()>,
}

impl StubStore {
    /// Démarre le stub et retourne dès que le socket écoute
    pub async fn start() -> Result<Self> {
        let inner: SharedInner = Arc::new(Mutex::new(StoreInner::default()));

        let app = Router::new()
            .route("/api/{org}/_search", post(search))
            .route("/api/{org}/{stream}/_json", post(ingest))
            .with_state(inner.clone());

        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;
        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                log::error!("[stub-store] server stopped: {}", e);
            }
        });

        log::info!("[stub-store] listening on http://{}", addr);
        Ok(Self { addr, inner, task })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_behavior(&self, behavior: StoreBehavior) {
        self.inner.lock().behavior = behavior;
    }

    /// Pré-remplit le stream sans passer par l'ingestion
    pub fn push_record(&self, record: Value) {
        self.inner.lock().records.push(record);
    }

    /// Records reçus via `_json` (pour assertions de tests)
    pub fn ingested(&self) -> Vec<Value> {
        self.inner.lock().ingested.clone()
    }

    /// Corps des requêtes `_search` reçues
    pub fn search_requests(&self) -> Vec<Value> {
        self.inner.lock().searches.clone()
    }

    /// Dernier header Authorization vu, toutes routes confondues
    pub fn last_authorization(&self) -> Option<String> {
        self.inner.lock().last_authorization.clone()
    }

    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.records.clear();
        inner.ingested.clear();
        inner.searches.clear();
        inner.last_authorization = None;
        inner.behavior = StoreBehavior::Normal;
    }
}

impl Drop for StubStore {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn remember_auth(inner: &mut StoreInner, headers: &HeaderMap) {
    inner.last_authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
}

fn failure(code: u16) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, "stub failure").into_response()
}

async fn search(State(inner): State<SharedInner>, headers: HeaderMap, body: Bytes) -> Response {
    let mut inner = inner.lock();
    remember_auth(&mut inner, &headers);
    inner
        .searches
        .push(serde_json::from_slice(&body).unwrap_or(Value::Null));

    match inner.behavior {
        StoreBehavior::Fail(code) => failure(code),
        StoreBehavior::Garbage => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html")],
            "<html>gateway says hi</html>",
        )
            .into_response(),
        StoreBehavior::Empty => Json(json!({ "took": 1, "hits": [], "total": 0 })).into_response(),
        StoreBehavior::Normal => {
            let hits: Vec<Value> = inner.records.last().cloned().into_iter().collect();
            log::info!("[stub-store] search -> {} hit(s)", hits.len());
            Json(json!({ "took": 1, "hits": hits, "total": inner.records.len() })).into_response()
        }
    }
}

async fn ingest(State(inner): State<SharedInner>, headers: HeaderMap, body: Bytes) -> Response {
    let mut inner = inner.lock();
    remember_auth(&mut inner, &headers);

    if let StoreBehavior::Fail(code) = inner.behavior {
        return failure(code);
    }

    let record = match serde_json::from_slice::<Value>(&body) {
        Ok(v) => v,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid json").into_response(),
    };
    inner.ingested.push(record.clone());
    inner.records.push(record);
    log::info!("[stub-store] ingested record #{}", inner.ingested.len());

    Json(json!({
        "code": 200,
        "status": [{ "name": "default", "successful": 1, "failed": 0 }]
    }))
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reset_restores_normal_behavior() {
        let store = StubStore::start().await.unwrap();
        store.push_record(json!({ "cpu_usage": 1 }));
        store.set_behavior(StoreBehavior::Fail(500));
        store.reset();

        assert!(store.ingested().is_empty());
        assert!(store.search_requests().is_empty());
        assert_eq!(store.inner.lock().behavior, StoreBehavior::Normal);
        assert!(store.inner.lock().records.is_empty());
    }

    #[tokio::test]
    async fn test_base_url_points_to_loopback() {
        let store = StubStore::start().await.unwrap();
        assert!(store.base_url().starts_with("http://127.0.0.1:"));
    }
}
