//! Periodic synthetic metrics publisher

use crate::config::GeneratorConfig;
use aardi_telemetry::{MetricsSnapshot, OpenObserveClient, SyntheticProfile};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

/// Record pushed to the store: metrics plus provenance
#[derive(Debug, Serialize)]
pub struct SimulatorRecord {
    #[serde(flatten)]
    pub metrics: MetricsSnapshot,
    /// Unix milliseconds
    pub timestamp: i64,
    pub source: String,
}

/// Result of one publish attempt that reached the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Accepted(u16),
    Rejected(u16),
}

pub struct Publisher {
    client: OpenObserveClient,
    source: String,
    environment: String,
}

impl Publisher {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let client = OpenObserveClient::new(config.store.clone())
            .context("Failed to build OpenObserve client")?;
        Ok(Self {
            client,
            source: config.source.clone(),
            environment: config.environment.clone(),
        })
    }

    pub fn record(&self, mut metrics: MetricsSnapshot, now: DateTime<Utc>) -> SimulatorRecord {
        metrics.environment = Some(self.environment.clone());
        SimulatorRecord {
            metrics,
            timestamp: now.timestamp_millis(),
            source: self.source.clone(),
        }
    }

    /// Draw one snapshot and push it
    pub async fn publish_once(&self) -> Result<PublishOutcome> {
        let record = self.record(SyntheticProfile::Simulator.generate(), Utc::now());
        let status = self
            .client
            .ingest(&record)
            .await
            .context("Error sending metrics")?;

        if status == 200 || status == 201 {
            info!(
                "Metrics sent: {} - CPU: {:.1}% Mem: {:.1}% Req/s: {}",
                Utc::now().format("%H:%M:%S"),
                record.metrics.cpu_usage(),
                record.metrics.memory_usage(),
                record.metrics.requests_per_sec()
            );
            Ok(PublishOutcome::Accepted(status))
        } else {
            warn!("Response status: {}", status);
            Ok(PublishOutcome::Rejected(status))
        }
    }

    /// Publish immediately, then every `period`. Failures are logged and the
    /// loop keeps going. Stops after `count` batches when given.
    pub async fn run(&self, period: Duration, count: Option<u64>) -> Result<()> {
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut sent = 0u64;

        loop {
            if count.is_some_and(|max| sent >= max) {
                info!("Published {} batches, stopping", sent);
                return Ok(());
            }
            timer.tick().await;
            if let Err(e) = self.publish_once().await {
                error!("{:#}", e);
            }
            sent += 1;
        }
    }
}
