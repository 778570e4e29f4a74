use crate::config::Mode;
use crate::metrics::Origin;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Serialize)]
pub struct KernelHealth {
    pub uptime_seconds: u64,
    pub mode: Mode,
    pub commands_processed: u64,
    pub store_hits: u64,
    pub fallbacks: u64,
    pub last_origin: Option<Origin>,
}

#[derive(Clone)]
pub struct HealthTracker {
    start_time: Instant,
    mode: Mode,
    commands: Arc<AtomicU64>,
    store_hits: Arc<AtomicU64>,
    fallbacks: Arc<AtomicU64>,
    last_origin: Arc<Mutex<Option<Origin>>>,
}

impl HealthTracker {
    pub fn new(mode: Mode) -> Self {
        Self {
            start_time: Instant::now(),
            mode,
            commands: Arc::new(AtomicU64::new(0)),
            store_hits: Arc::new(AtomicU64::new(0)),
            fallbacks: Arc::new(AtomicU64::new(0)),
            last_origin: Arc::new(Mutex::new(None)),
        }
    }

    /// Une commande servie, avec l'origine de ses métriques
    pub fn record_command(&self, origin: Origin) {
        self.commands.fetch_add(1, Ordering::Relaxed);
        match origin {
            Origin::Store => { self.store_hits.fetch_add(1, Ordering::Relaxed); }
            Origin::Fallback => { self.fallbacks.fetch_add(1, Ordering::Relaxed); }
            Origin::Simulated => {}
        }
        *self.last_origin.lock() = Some(origin);
    }

    pub fn get_health(&self) -> KernelHealth {
        KernelHealth {
            uptime_seconds: self.start_time.elapsed().as_secs(),
            mode: self.mode,
            commands_processed: self.commands.load(Ordering::Relaxed),
            store_hits: self.store_hits.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            last_origin: *self.last_origin.lock(),
        }
    }
}
