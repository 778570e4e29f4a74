//! Minimal OpenObserve HTTP client
//!
//! Two calls only:
//! - `latest_record` : `POST /api/{org}/_search`, most recent row of the stream
//! - `ingest`        : `POST /api/{org}/{stream}/_json`, push one record
//!
//! No retries, no caching. Callers decide what a failure means.

use crate::error::{Result, TelemetryError};
use crate::snapshot::MetricsSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Connection settings for the telemetry store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub url: String,
    pub org: String,
    pub stream: String,
    pub username: String,
    pub password: String,
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5080".into(),
            org: "default".into(),
            stream: "default".into(),
            username: "admin@aardi.com".into(),
            password: "aardi123".into(),
            timeout_ms: 3000,
        }
    }
}

impl StoreConfig {
    fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn search_url(&self) -> String {
        format!("{}/api/{}/_search", self.base_url(), self.org)
    }

    pub fn ingest_url(&self) -> String {
        format!("{}/api/{}/{}/_json", self.base_url(), self.org, self.stream)
    }

    pub fn latest_record_sql(&self) -> String {
        format!("SELECT * FROM {} ORDER BY _timestamp DESC LIMIT 1", self.stream)
    }
}

#[derive(Debug, Clone)]
pub struct OpenObserveClient {
    http: reqwest::Client,
    config: StoreConfig,
}

impl OpenObserveClient {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Most recent record of the configured stream.
    pub async fn latest_record(&self) -> Result<MetricsSnapshot> {
        let body = json!({
            "query": { "sql": self.config.latest_record_sql() },
            "size": 1
        });

        let response = self
            .http
            .post(self.config.search_url())
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::Status(status.as_u16()));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| TelemetryError::Malformed(e.to_string()))?;

        let hit = payload
            .get("hits")
            .and_then(Value::as_array)
            .and_then(|hits| hits.first())
            .cloned()
            .ok_or(TelemetryError::EmptyResult)?;

        debug!("store returned latest record");
        MetricsSnapshot::from_hit(hit).map_err(|e| TelemetryError::Malformed(e.to_string()))
    }

    /// Push one record. Any HTTP status is returned as-is; only transport
    /// failures are errors.
    pub async fn ingest<T: Serialize + ?Sized>(&self, record: &T) -> Result<u16> {
        let response = self
            .http
            .post(self.config.ingest_url())
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(record)
            .send()
            .await?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devkit::{StoreBehavior, StubStore};

    fn config_for(store: &StubStore) -> StoreConfig {
        StoreConfig {
            url: store.base_url(),
            timeout_ms: 1000,
            ..StoreConfig::default()
        }
    }

    #[test]
    fn test_urls_and_sql() {
        let cfg = StoreConfig {
            url: "http://o2.local:5080/".into(),
            org: "acme".into(),
            stream: "metrics".into(),
            ..StoreConfig::default()
        };
        assert_eq!(cfg.search_url(), "http://o2.local:5080/api/acme/_search");
        assert_eq!(cfg.ingest_url(), "http://o2.local:5080/api/acme/metrics/_json");
        assert_eq!(cfg.latest_record_sql(), "SELECT * FROM metrics ORDER BY _timestamp DESC LIMIT 1");
    }

    #[tokio::test]
    async fn test_latest_record_returns_most_recent_hit() {
        let store = StubStore::start().await.unwrap();
        store.push_record(serde_json::json!({ "cpu_usage": 10.0, "threats_blocked": 3 }));
        store.push_record(serde_json::json!({ "cpu_usage": 88.5, "threats_blocked": 25 }));

        let client = OpenObserveClient::new(config_for(&store)).unwrap();
        let snap = client.latest_record().await.unwrap();
        assert_eq!(snap.cpu_usage, Some(88.5));
        assert_eq!(snap.threats_blocked, Some(25.0));

        let searches = store.search_requests();
        assert_eq!(searches.len(), 1);
        assert_eq!(
            searches[0]["query"]["sql"],
            "SELECT * FROM default ORDER BY _timestamp DESC LIMIT 1"
        );
        assert_eq!(searches[0]["size"], 1);
        assert!(store.last_authorization().unwrap().starts_with("Basic "));
    }

    #[tokio::test]
    async fn test_latest_record_failures() {
        let store = StubStore::start().await.unwrap();
        let client = OpenObserveClient::new(config_for(&store)).unwrap();

        store.set_behavior(StoreBehavior::Empty);
        assert!(matches!(client.latest_record().await, Err(TelemetryError::EmptyResult)));

        store.set_behavior(StoreBehavior::Fail(503));
        assert!(matches!(client.latest_record().await, Err(TelemetryError::Status(503))));

        store.set_behavior(StoreBehavior::Garbage);
        assert!(matches!(client.latest_record().await, Err(TelemetryError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_array_hit_is_malformed() {
        let store = StubStore::start().await.unwrap();
        store.push_record(serde_json::json!([91.5, 12.0, 640]));

        let client = OpenObserveClient::new(config_for(&store)).unwrap();
        assert!(matches!(client.latest_record().await, Err(TelemetryError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_http_error() {
        let cfg = StoreConfig {
            url: "http://127.0.0.1:9".into(),
            timeout_ms: 500,
            ..StoreConfig::default()
        };
        let client = OpenObserveClient::new(cfg).unwrap();
        assert!(matches!(client.latest_record().await, Err(TelemetryError::Http(_))));
    }

    #[tokio::test]
    async fn test_ingest_records_payload() {
        let store = StubStore::start().await.unwrap();
        let client = OpenObserveClient::new(config_for(&store)).unwrap();

        let status = client
            .ingest(&serde_json::json!({ "cpu_usage": 50, "source": "test" }))
            .await
            .unwrap();
        assert_eq!(status, 200);
        let ingested = store.ingested();
        assert_eq!(ingested.len(), 1);
        assert_eq!(ingested[0]["source"], "test");

        store.set_behavior(StoreBehavior::Fail(401));
        let status = client.ingest(&serde_json::json!({})).await.unwrap();
        assert_eq!(status, 401);
    }
}
