//! AARDI telemetry - metrics snapshot model and OpenObserve access
//!
//! Shared by the kernel (reads the latest record, falls back to synthetic
//! values) and the generator (pushes synthetic records on an interval).

pub mod client;
pub mod error;
pub mod snapshot;
pub mod synth;

pub use client::{OpenObserveClient, StoreConfig};
pub use error::TelemetryError;
pub use snapshot::{display_count, MetricsSnapshot};
pub use synth::SyntheticProfile;
