//! Source de métriques : OpenObserve si possible, sinon valeurs synthétiques.

use crate::config::Mode;
use aardi_telemetry::{MetricsSnapshot, OpenObserveClient, SyntheticProfile};
use serde::Serialize;
use tracing::{debug, warn};

/// D'où vient le snapshot servi
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Dernier record du store
    Store,
    /// Store interrogé mais inutilisable
    Fallback,
    /// Mode demo, store jamais interrogé
    Simulated,
}

#[derive(Debug, Clone)]
pub struct MetricsSource {
    mode: Mode,
    client: OpenObserveClient,
}

impl MetricsSource {
    pub fn new(mode: Mode, client: OpenObserveClient) -> Self {
        Self { mode, client }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Une seule tentative, aucune erreur ne remonte.
    pub async fn fetch(&self) -> (MetricsSnapshot, Origin) {
        if self.mode == Mode::Demo {
            return (SyntheticProfile::Fallback.generate(), Origin::Simulated);
        }

        match self.client.latest_record().await {
            Ok(snapshot) => {
                debug!("metrics from OpenObserve");
                (snapshot, Origin::Store)
            }
            Err(e) => {
                warn!("Error fetching from OpenObserve: {e}, using simulated metrics");
                (SyntheticProfile::Fallback.generate(), Origin::Fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aardi_telemetry::StoreConfig;
    use devkit::{RecordBuilder, StoreBehavior, TestHarness};

    fn source(mode: Mode, url: String) -> MetricsSource {
        let client = OpenObserveClient::new(StoreConfig { url, timeout_ms: 1000, ..StoreConfig::default() })
            .unwrap();
        MetricsSource::new(mode, client)
    }

    #[tokio::test]
    async fn test_live_reads_store() {
        let harness = TestHarness::new().await.unwrap();
        harness.seed(RecordBuilder::alarming());

        let (snap, origin) = source(Mode::Live, harness.store_url()).fetch().await;
        assert_eq!(origin, Origin::Store);
        assert_eq!(snap.threats_blocked(), 37.0);
    }

    #[tokio::test]
    async fn test_live_falls_back_on_any_failure() {
        let harness = TestHarness::new().await.unwrap();
        let src = source(Mode::Live, harness.store_url());

        for behavior in [StoreBehavior::Empty, StoreBehavior::Fail(500), StoreBehavior::Garbage] {
            harness.store.set_behavior(behavior);
            let (snap, origin) = src.fetch().await;
            assert_eq!(origin, Origin::Fallback, "{behavior:?}");
            assert!(snap.cpu_usage() >= 35.0 && snap.cpu_usage() < 75.0);
        }
    }

    #[tokio::test]
    async fn test_demo_never_queries_store() {
        let harness = TestHarness::new().await.unwrap();
        harness.seed(RecordBuilder::alarming());

        let (snap, origin) = source(Mode::Demo, harness.store_url()).fetch().await;
        assert_eq!(origin, Origin::Simulated);
        assert!(snap.threats_blocked() < 30.0);
        assert!(harness.store.search_requests().is_empty());
    }
}
