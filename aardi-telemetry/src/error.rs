/// Why a telemetry store round-trip did not produce a usable record.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store answered with status {0}")]
    Status(u16),
    #[error("store returned no hits")]
    EmptyResult,
    #[error("malformed store response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, TelemetryError>;
