use serde::{Deserialize, Serialize};

/// Corps de `POST /api/voice`
#[derive(Debug, Deserialize)]
pub struct VoiceRequest {
    pub command: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct VoiceResponse {
    pub cards: Vec<Card>,
    pub response: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Critical,
    Warning,
    Success,
    Info,
}

/// Ligne label/valeur d'une carte
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MetricRow {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Panneau affiché par le dashboard
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub title: String,
    pub badge: Badge,
    pub badge_text: String,
    pub metrics: Vec<MetricRow>,
    pub chart: bool,
    pub priority: u8,
}
