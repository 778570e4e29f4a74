//! One console session: kernel client plus local board.

use crate::board::{is_clear_command, Board, Card};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

pub const CLEARED: &str = "Dashboard cleared. Ready for new analysis.";
pub const DEFAULT_RESPONSE: &str = "Processing your request";
pub const APOLOGY: &str = "I encountered an error processing your request";

#[derive(Debug, Deserialize)]
pub struct CommandReply {
    #[serde(default)]
    pub cards: Option<Vec<Card>>,
    #[serde(default)]
    pub response: Option<String>,
}

pub struct KernelClient {
    http: reqwest::Client,
    endpoint: String,
}

impl KernelClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint: format!("{}/api/voice", base_url.trim_end_matches('/')),
        })
    }

    pub async fn send(&self, command: &str) -> Result<CommandReply> {
        let reply = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "command": command }))
            .send()
            .await
            .context("kernel unreachable")?
            .json::<CommandReply>()
            .await
            .context("invalid kernel reply")?;
        Ok(reply)
    }
}

pub struct Session {
    client: KernelClient,
    board: Board,
}

impl Session {
    pub fn new(client: KernelClient) -> Self {
        Self { client, board: Board::new() }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Handle one spoken/typed command, returns the sentence to "speak".
    pub async fn handle(&mut self, command: &str) -> String {
        if is_clear_command(command) {
            self.board.clear();
            return CLEARED.to_string();
        }

        match self.client.send(command).await {
            Ok(reply) => {
                if let Some(cards) = reply.cards {
                    let added = self.board.merge(cards);
                    debug!("{} new card(s), {} on board", added, self.board.len());
                }
                reply
                    .response
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| DEFAULT_RESPONSE.to_string())
            }
            Err(e) => {
                warn!("Error processing command: {:#}", e);
                APOLOGY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use serde_json::Value;

    // faux kernel : renvoie une carte dont le titre est la commande reçue
    async fn fake_kernel() -> String {
        let app = Router::new().route(
            "/api/voice",
            post(|Json(body): Json<Value>| async move {
                let command = body["command"].as_str().unwrap_or_default().to_string();
                if command == "silent" {
                    return Json(json!({ "cards": [] }));
                }
                Json(json!({
                    "cards": [{
                        "id": "x-1", "title": command, "badge": "info", "badgeText": "Live",
                        "metrics": [], "chart": true, "priority": 5
                    }],
                    "response": format!("Echo {command}")
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_commands_fill_board() {
        let url = fake_kernel().await;
        let mut session = Session::new(KernelClient::new(&url).unwrap());

        assert_eq!(session.handle("security").await, "Echo security");
        assert_eq!(session.handle("network").await, "Echo network");
        assert_eq!(session.handle("security").await, "Echo security");
        assert_eq!(session.board().len(), 2);
        assert_eq!(session.board().cards()[0].title, "network");
    }

    #[tokio::test]
    async fn test_missing_response_uses_default() {
        let url = fake_kernel().await;
        let mut session = Session::new(KernelClient::new(&url).unwrap());
        assert_eq!(session.handle("silent").await, DEFAULT_RESPONSE);
        assert!(session.board().is_empty());
    }

    #[tokio::test]
    async fn test_clear_is_local() {
        // le kernel n'existe pas : le clear ne doit pas l'appeler
        let mut session = Session::new(KernelClient::new("http://127.0.0.1:9").unwrap());
        assert_eq!(session.handle("clear dashboard").await, CLEARED);
    }

    #[tokio::test]
    async fn test_unreachable_kernel_apologizes() {
        let mut session = Session::new(KernelClient::new("http://127.0.0.1:9").unwrap());
        assert_eq!(session.handle("security").await, APOLOGY);
        assert!(session.board().is_empty());
    }
}
