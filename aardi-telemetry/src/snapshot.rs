//! Flat metrics record exchanged with the telemetry store.
//!
//! Records coming back from OpenObserve carry extra columns (`_timestamp`,
//! `source`, ...) and occasionally numbers encoded as strings, so every field
//! is parsed leniently: a number or a numeric string is accepted, anything
//! else is treated as absent.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One metrics record. Every field is optional and reads as zero when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(default, deserialize_with = "lenient_number", serialize_with = "compact_number", skip_serializing_if = "Option::is_none")]
    pub cpu_usage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", serialize_with = "compact_number", skip_serializing_if = "Option::is_none")]
    pub memory_usage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", serialize_with = "compact_number", skip_serializing_if = "Option::is_none")]
    pub requests_per_sec: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", serialize_with = "compact_number", skip_serializing_if = "Option::is_none")]
    pub error_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", serialize_with = "compact_number", skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", serialize_with = "compact_number", skip_serializing_if = "Option::is_none")]
    pub active_connections: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", serialize_with = "compact_number", skip_serializing_if = "Option::is_none")]
    pub disk_usage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", serialize_with = "compact_number", skip_serializing_if = "Option::is_none")]
    pub network_io: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", serialize_with = "compact_number", skip_serializing_if = "Option::is_none")]
    pub cache_hit_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", serialize_with = "compact_number", skip_serializing_if = "Option::is_none")]
    pub threats_blocked: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

pub const DEFAULT_ENVIRONMENT: &str = "production";

impl MetricsSnapshot {
    pub fn cpu_usage(&self) -> f64 { self.cpu_usage.unwrap_or(0.0) }
    pub fn memory_usage(&self) -> f64 { self.memory_usage.unwrap_or(0.0) }
    pub fn requests_per_sec(&self) -> f64 { self.requests_per_sec.unwrap_or(0.0) }
    pub fn error_rate(&self) -> f64 { self.error_rate.unwrap_or(0.0) }
    pub fn response_time(&self) -> f64 { self.response_time.unwrap_or(0.0) }
    pub fn active_connections(&self) -> f64 { self.active_connections.unwrap_or(0.0) }
    pub fn disk_usage(&self) -> f64 { self.disk_usage.unwrap_or(0.0) }
    pub fn network_io(&self) -> f64 { self.network_io.unwrap_or(0.0) }
    pub fn cache_hit_rate(&self) -> f64 { self.cache_hit_rate.unwrap_or(0.0) }
    pub fn threats_blocked(&self) -> f64 { self.threats_blocked.unwrap_or(0.0) }

    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Parse a store hit. Fails only if the hit is not a JSON object.
    pub fn from_hit(hit: Value) -> Result<Self, serde_json::Error> {
        // a JSON array would otherwise fill the fields by position
        if !hit.is_object() {
            return Err(serde::de::Error::custom("hit is not an object"));
        }
        serde_json::from_value(hit)
    }
}

/// Render a count the way a dashboard shows it: `12` rather than `12.0`,
/// but keep the fraction when there is one.
pub fn display_count(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

// Integral values go out as JSON integers, like the store's own counters.
fn compact_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => serializer.serialize_i64(*v as i64),
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_none(),
    }
}
