/*!
Test Harness pour composants AARDI

Facilite l'écriture de tests avec:
- Démarrage automatique d'un stub OpenObserve
- Attentes sur le nombre de records ingérés
- Assertions sur les champs du dernier record
*/

use crate::record_helpers::RecordBuilder;
use crate::store_stub::StubStore;
use serde_json::Value;
use std::time::Duration;
use anyhow::Result;

/// Harness de test complet autour d'un store simulé
pub struct TestHarness {
    pub store: StubStore,
    expectations: Vec<Expectation>,
}

#[derive(Debug)]
struct Expectation {
    field: Option<String>,
    expected_count: usize,
}

impl TestHarness {
    /// Crée un harness avec un store tout neuf
    pub async fn new() -> Result<Self> {
        env_logger::try_init().ok(); // Init logging pour tests

        Ok(Self {
            store: StubStore::start().await?,
            expectations: Vec::new(),
        })
    }

    pub fn store_url(&self) -> String {
        self.store.base_url()
    }

    /// Ajoute un record dans le stream simulé
    pub fn seed(&self, record: RecordBuilder) -> &Self {
        self.store.push_record(record.with_store_timestamp().build());
        self
    }

    /// On s'attend à recevoir exactement N ingestions
    pub fn expect_ingested(&mut self, count: usize) -> &mut Self {
        self.expectations.push(Expectation { field: None, expected_count: count });
        self
    }

    /// On s'attend à ce que N records ingérés portent ce champ
    pub fn expect_field_in_ingested(&mut self, field: &str, count: usize) -> &mut Self {
        self.expectations.push(Expectation {
            field: Some(field.to_string()),
            expected_count: count,
        });
        self
    }

    /// Attend qu'au moins `count` records aient été ingérés
    pub async fn wait_for_ingested(&self, count: usize, timeout_ms: u64) -> Result<Vec<Value>> {
        let start = std::time::Instant::now();

        while start.elapsed() < Duration::from_millis(timeout_ms) {
            let ingested = self.store.ingested();
            if ingested.len() >= count {
                log::info!("✅ {} record(s) ingested", ingested.len());
                return Ok(ingested);
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        log::warn!("⏰ Timeout waiting for {} ingested record(s)", count);
        anyhow::bail!(
            "expected {} ingested records within {}ms, got {}",
            count,
            timeout_ms,
            self.store.ingested().len()
        );
    }

    /// Vérifie toutes les expectations configurées
    pub fn verify_expectations(&self) -> Result<()> {
        let ingested = self.store.ingested();

        for expectation in &self.expectations {
            let actual = match &expectation.field {
                Some(field) => ingested.iter().filter(|r| r.get(field).is_some()).count(),
                None => ingested.len(),
            };
            if actual != expectation.expected_count {
                anyhow::bail!(
                    "Expectation failed for {}: expected {}, got {}",
                    expectation.field.as_deref().unwrap_or("ingested records"),
                    expectation.expected_count,
                    actual
                );
            }
        }

        log::info!("🎉 {} expectations verified", self.expectations.len());
        Ok(())
    }

    /// Assert qu'un champ du dernier record ingéré a une valeur donnée
    pub fn assert_last_field_equals(&self, field: &str, expected: &Value) -> Result<()> {
        let Some(last) = self.store.ingested().last().cloned() else {
            anyhow::bail!("no record ingested");
        };
        match last.get(field) {
            Some(actual) if actual == expected => Ok(()),
            Some(actual) => anyhow::bail!(
                "Field '{}' mismatch: expected {:?}, got {:?}",
                field, expected, actual
            ),
            None => anyhow::bail!("Field '{}' missing from last record", field),
        }
    }

    /// Reset le harness pour un nouveau scénario
    pub fn reset(&mut self) {
        self.store.reset();
        self.expectations.clear();
        log::info!("🧹 Test harness reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store_stub::StoreBehavior;

    async fn post(url: String, body: Value) -> u16 {
        reqwest::Client::new()
            .post(url)
            .json(&body)
            .send()
            .await
            .unwrap()
            .status()
            .as_u16()
    }

    #[tokio::test]
    async fn test_harness_tracks_ingestion() {
        let mut harness = TestHarness::new().await.unwrap();
        harness.expect_ingested(2).expect_field_in_ingested("source", 1);

        let url = format!("{}/api/default/default/_json", harness.store_url());
        assert_eq!(post(url.clone(), serde_json::json!({ "cpu_usage": 10 })).await, 200);
        assert_eq!(post(url, serde_json::json!({ "source": "aardi-simulator" })).await, 200);

        harness.wait_for_ingested(2, 1000).await.unwrap();
        harness.verify_expectations().unwrap();
        harness
            .assert_last_field_equals("source", &serde_json::json!("aardi-simulator"))
            .unwrap();
    }

    #[tokio::test]
    async fn test_failing_store_rejects_ingestion() {
        let harness = TestHarness::new().await.unwrap();
        harness.store.set_behavior(StoreBehavior::Fail(503));

        let url = format!("{}/api/default/default/_json", harness.store_url());
        assert_eq!(post(url, serde_json::json!({ "cpu_usage": 10 })).await, 503);
        assert!(harness.wait_for_ingested(1, 100).await.is_err());
    }

    #[tokio::test]
    async fn test_seed_is_searchable() {
        let harness = TestHarness::new().await.unwrap();
        harness.seed(RecordBuilder::healthy());
        let url = format!("{}/api/default/_search", harness.store_url());
        assert_eq!(post(url, serde_json::json!({ "size": 1 })).await, 200);
        assert_eq!(harness.store.search_requests().len(), 1);
    }
}
