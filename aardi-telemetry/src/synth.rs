//! Synthetic metrics used when no live telemetry is available.

use crate::snapshot::{MetricsSnapshot, DEFAULT_ENVIRONMENT};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Which set of ranges to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticProfile {
    /// Plausible "healthy production" values served by the kernel when the
    /// store cannot be reached.
    Fallback,
    /// Wider ranges pushed into the store by the generator.
    Simulator,
}

impl SyntheticProfile {
    pub fn generate(self) -> MetricsSnapshot {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Every field is an independent draw.
    pub fn generate_with<R: Rng + ?Sized>(self, rng: &mut R) -> MetricsSnapshot {
        match self {
            SyntheticProfile::Fallback => MetricsSnapshot {
                cpu_usage: Some(real(rng, 35.0, 75.0)),
                memory_usage: Some(real(rng, 40.0, 75.0)),
                cache_hit_rate: Some(real(rng, 85.0, 99.0)),
                response_time: Some(whole(rng, 50, 150)),
                requests_per_sec: Some(whole(rng, 500, 1000)),
                threats_blocked: Some(whole(rng, 0, 30)),
                active_connections: Some(whole(rng, 100, 500)),
                error_rate: Some(real(rng, 0.0, 3.0)),
                disk_usage: Some(real(rng, 40.0, 80.0)),
                network_io: Some(real(rng, 100.0, 600.0)),
                environment: Some(DEFAULT_ENVIRONMENT.to_string()),
            },
            SyntheticProfile::Simulator => MetricsSnapshot {
                cpu_usage: Some(real(rng, 0.0, 100.0)),
                memory_usage: Some(real(rng, 0.0, 100.0)),
                requests_per_sec: Some(whole(rng, 100, 1100)),
                error_rate: Some(real(rng, 0.0, 5.0)),
                response_time: Some(whole(rng, 20, 220)),
                active_connections: Some(whole(rng, 100, 600)),
                disk_usage: Some(real(rng, 0.0, 90.0)),
                network_io: Some(real(rng, 0.0, 1000.0)),
                cache_hit_rate: Some(real(rng, 85.0, 100.0)),
                threats_blocked: Some(whole(rng, 0, 50)),
                environment: None,
            },
        }
    }
}

fn real<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    Uniform::new(low, high).sample(rng)
}

// upper bound exclusive
fn whole<R: Rng + ?Sized>(rng: &mut R, low: u32, high: u32) -> f64 {
    Uniform::new(low, high).sample(rng) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn within(v: Option<f64>, low: f64, high: f64) -> bool {
        matches!(v, Some(x) if x >= low && x < high)
    }

    #[test]
    fn test_fallback_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let s = SyntheticProfile::Fallback.generate_with(&mut rng);
            assert!(within(s.cpu_usage, 35.0, 75.0));
            assert!(within(s.memory_usage, 40.0, 75.0));
            assert!(within(s.cache_hit_rate, 85.0, 99.0));
            assert!(within(s.response_time, 50.0, 150.0));
            assert!(within(s.requests_per_sec, 500.0, 1000.0));
            assert!(within(s.threats_blocked, 0.0, 30.0));
            assert!(within(s.active_connections, 100.0, 500.0));
            assert!(within(s.error_rate, 0.0, 3.0));
            assert!(within(s.disk_usage, 40.0, 80.0));
            assert!(within(s.network_io, 100.0, 600.0));
            assert_eq!(s.environment(), "production");
        }
    }

    #[test]
    fn test_simulator_counters_are_integral() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let s = SyntheticProfile::Simulator.generate_with(&mut rng);
            assert!(within(s.threats_blocked, 0.0, 50.0));
            assert!(within(s.requests_per_sec, 100.0, 1100.0));
            assert!(within(s.cache_hit_rate, 85.0, 100.0));
            assert_eq!(s.threats_blocked().fract(), 0.0);
            assert_eq!(s.response_time().fract(), 0.0);
            assert_eq!(s.active_connections().fract(), 0.0);
            assert!(s.environment.is_none());
        }
    }
}
