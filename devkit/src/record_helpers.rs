/*!
Helpers pour construire des records de métriques tels que stockés par OpenObserve

Facilite l'écriture de tests:
- Records "sains" ou "en alerte" prêts à l'emploi
- Champs arbitraires (y compris mal typés) pour tester le parsing tolérant
*/

use serde_json::{Map, Number, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Construction d'un record JSON plat
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    fields: Map<String, Value>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record dans les seuils verts partout
    pub fn healthy() -> Self {
        Self::new()
            .set_number("cpu_usage", 42.0)
            .set_number("memory_usage", 55.5)
            .set_number("cache_hit_rate", 93.2)
            .set_number("response_time", 64.0)
            .set_number("requests_per_sec", 640.0)
            .set_number("threats_blocked", 4.0)
            .set_number("active_connections", 210.0)
            .set_number("error_rate", 0.4)
            .set_number("disk_usage", 48.0)
            .set_number("network_io", 320.0)
            .set_string("environment", "production")
    }

    /// Record qui dépasse tous les seuils d'alerte
    pub fn alarming() -> Self {
        Self::new()
            .set_number("cpu_usage", 91.3)
            .set_number("memory_usage", 87.0)
            .set_number("cache_hit_rate", 86.0)
            .set_number("response_time", 180.0)
            .set_number("requests_per_sec", 1020.0)
            .set_number("threats_blocked", 37.0)
            .set_number("active_connections", 580.0)
            .set_number("error_rate", 4.2)
            .set_number("disk_usage", 88.0)
            .set_number("network_io", 940.0)
            .set_string("environment", "production")
    }

    /// Définit un champ dans le record
    pub fn set_field<S: Into<String>>(mut self, field: S, value: Value) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    pub fn set_string<S: Into<String>, V: Into<String>>(self, field: S, value: V) -> Self {
        self.set_field(field, Value::String(value.into()))
    }

    /// Les valeurs entières sont stockées comme entiers JSON
    pub fn set_number<S: Into<String>>(self, field: S, value: f64) -> Self {
        let number = if value.fract() == 0.0 {
            Number::from(value as i64)
        } else {
            Number::from_f64(value).unwrap_or_else(|| Number::from(0))
        };
        self.set_field(field, Value::Number(number))
    }

    pub fn without<S: AsRef<str>>(mut self, field: S) -> Self {
        self.fields.remove(field.as_ref());
        self
    }

    /// Ajoute `_timestamp` en microsecondes, comme le store
    pub fn with_store_timestamp(self) -> Self {
        let micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as i64)
            .unwrap_or_default();
        self.set_field("_timestamp", Value::Number(Number::from(micros)))
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}
