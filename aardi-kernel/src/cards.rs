//! Construction des cartes et de la phrase parlée à partir d'un snapshot.

use crate::commands::Category;
use crate::config::Mode;
use crate::models::{Badge, Card, MetricRow, VoiceResponse};
use aardi_telemetry::{display_count, MetricsSnapshot};
use time::OffsetDateTime;

pub const GREEN: &str = "#10b981";
pub const AMBER: &str = "#f59e0b";
pub const RED: &str = "#ef4444";
pub const BLUE: &str = "#60a5fa";

const THREATS_CRITICAL: f64 = 20.0;
const THREATS_WARNING: f64 = 10.0;
const ERROR_RATE_HIGH: f64 = 2.0;
const CPU_HIGH: f64 = 70.0;
const MEMORY_HIGH: f64 = 80.0;
const RESPONSE_TIME_HIGH: f64 = 100.0;
const NETWORK_IO_HIGH: f64 = 800.0;

fn row(label: &str, value: String, color: Option<&str>) -> MetricRow {
    MetricRow { label: label.to_string(), value, color: color.map(str::to_string) }
}

// vert sous le seuil, `hot` au-dessus
fn over(value: f64, limit: f64, hot: &'static str) -> Option<&'static str> {
    Some(if value > limit { hot } else { GREEN })
}

fn card_id(prefix: &str, now: OffsetDateTime) -> String {
    format!("{prefix}-{}", now.unix_timestamp_nanos() / 1_000_000)
}

fn threats_row(m: &MetricsSnapshot) -> MetricRow {
    row(
        "Threats Blocked",
        display_count(m.threats_blocked()),
        over(m.threats_blocked(), THREATS_CRITICAL, RED),
    )
}

fn cpu_row(label: &str, m: &MetricsSnapshot) -> MetricRow {
    row(label, format!("{:.1}%", m.cpu_usage()), over(m.cpu_usage(), CPU_HIGH, AMBER))
}

fn memory_row(m: &MetricsSnapshot) -> MetricRow {
    row("Memory", format!("{:.1}%", m.memory_usage()), over(m.memory_usage(), MEMORY_HIGH, AMBER))
}

fn response_time_row(m: &MetricsSnapshot) -> MetricRow {
    row(
        "Response Time",
        format!("{}ms", display_count(m.response_time())),
        over(m.response_time(), RESPONSE_TIME_HIGH, AMBER),
    )
}

pub fn security_card(m: &MetricsSnapshot, mode: Mode, now: OffsetDateTime) -> Card {
    let threats = m.threats_blocked();
    let badge = if threats > THREATS_CRITICAL {
        Badge::Critical
    } else if threats > THREATS_WARNING {
        Badge::Warning
    } else {
        Badge::Success
    };

    Card {
        id: card_id("sec", now),
        title: "Security Analysis".into(),
        badge,
        badge_text: match mode { Mode::Demo => "Demo", Mode::Live => "Live" }.into(),
        metrics: vec![
            threats_row(m),
            row("Error Rate", format!("{:.2}%", m.error_rate()), over(m.error_rate(), ERROR_RATE_HIGH, AMBER)),
            row("Active Connections", display_count(m.active_connections()), None),
            row("Environment", m.environment().to_string(), Some(BLUE)),
        ],
        chart: true,
        priority: 1,
    }
}

pub fn system_card(m: &MetricsSnapshot, mode: Mode, now: OffsetDateTime) -> Card {
    Card {
        id: card_id("sys", now),
        title: "System Performance".into(),
        badge: Badge::Info,
        badge_text: match mode { Mode::Demo => "Demo", Mode::Live => "Real-Time" }.into(),
        metrics: vec![
            cpu_row("CPU Usage", m),
            memory_row(m),
            row("Cache Hit Rate", format!("{:.1}%", m.cache_hit_rate()), Some(GREEN)),
            response_time_row(m),
            row("Requests/sec", display_count(m.requests_per_sec()), None),
        ],
        chart: true,
        priority: 2,
    }
}

pub fn network_card(m: &MetricsSnapshot, mode: Mode, now: OffsetDateTime) -> Card {
    Card {
        id: card_id("net", now),
        title: "Network Traffic".into(),
        badge: if m.error_rate() > ERROR_RATE_HIGH { Badge::Warning } else { Badge::Info },
        badge_text: match mode { Mode::Demo => "Demo", Mode::Live => "Live" }.into(),
        metrics: vec![
            row("Network I/O", format!("{:.1} MB/s", m.network_io()), over(m.network_io(), NETWORK_IO_HIGH, AMBER)),
            row("Requests/sec", display_count(m.requests_per_sec()), None),
            row("Active Connections", display_count(m.active_connections()), None),
            response_time_row(m),
        ],
        chart: true,
        priority: 3,
    }
}

pub fn overview_card(m: &MetricsSnapshot, mode: Mode, now: OffsetDateTime) -> Card {
    let (badge_text, source) = match mode {
        Mode::Demo => ("Demo Mode", "Simulated"),
        Mode::Live => ("Connected", "OpenObserve"),
    };
    Card {
        id: card_id("overview", now),
        title: "Environmental Overview".into(),
        badge: Badge::Success,
        badge_text: badge_text.into(),
        metrics: vec![
            row("Data Source", source.to_string(), Some(GREEN)),
            cpu_row("CPU", m),
            memory_row(m),
            threats_row(m),
            row("Status", "Operational".to_string(), Some(GREEN)),
        ],
        chart: true,
        priority: 5,
    }
}

fn category_sentence(category: Category, m: &MetricsSnapshot) -> String {
    match category {
        Category::Security => {
            format!("Security analysis: {} threats blocked.", display_count(m.threats_blocked()))
        }
        Category::System => format!(
            "System metrics: CPU at {:.1}%, Memory at {:.1}%",
            m.cpu_usage(),
            m.memory_usage()
        ),
        Category::Network => format!(
            "Network status: {} requests per second across {} active connections.",
            display_count(m.requests_per_sec()),
            display_count(m.active_connections())
        ),
    }
}

/// Une carte par catégorie, dans l'ordre reçu ; la phrase vient de la
/// première catégorie. Sans catégorie : carte d'overview.
pub fn build_response(
    categories: &[Category],
    m: &MetricsSnapshot,
    mode: Mode,
    now: OffsetDateTime,
) -> VoiceResponse {
    let Some(first) = categories.first() else {
        let response = match mode {
            Mode::Demo => "Running in demo mode with simulated data.",
            Mode::Live => "Connected to live telemetry stream.",
        };
        return VoiceResponse {
            cards: vec![overview_card(m, mode, now)],
            response: response.to_string(),
        };
    };

    let cards = categories
        .iter()
        .map(|category| match category {
            Category::Security => security_card(m, mode, now),
            Category::System => system_card(m, mode, now),
            Category::Network => network_card(m, mode, now),
        })
        .collect();

    VoiceResponse { cards, response: category_sentence(*first, m) }
}
