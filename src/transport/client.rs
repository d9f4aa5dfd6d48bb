use super::{GameServer, TeamCredentials};
use crate::engine::Order;
use crate::state::{GameRules, GameState, Timing};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the game server's REST interface.
///
/// Reads are unauthenticated; orders carry the team's basic-auth credentials.
pub struct GameClient {
    http_client: Client,
    base_url: String,
    credentials: TeamCredentials,
}

impl GameClient {
    /// Create a client for the server at `base_url` (trailing slash optional).
    pub fn new(base_url: &str, credentials: TeamCredentials, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("flagrunner/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    #[cfg(test)]
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET {}", path))?;

        check_response_status(&response)?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {} response", path))
    }
}

#[async_trait]
impl GameServer for GameClient {
    async fn fetch_timing(&self) -> Result<Timing> {
        self.get_json("states/timing").await
    }

    async fn fetch_state(&self) -> Result<GameState> {
        self.get_json("states/game_state").await
    }

    async fn fetch_rules(&self) -> Result<GameRules> {
        self.get_json("states/game_rules").await
    }

    async fn submit_order(&self, order: &Order) -> Result<()> {
        let url = self.url(&order.path());
        let response = self
            .http_client
            .post(&url)
            .query(&[("direction", order.direction.as_str())])
            .basic_auth(&self.credentials.name, Some(&self.credentials.password))
            .send()
            .await
            .with_context(|| format!("Failed to send order ({})", order))?;

        debug!(%order, status = %response.status(), "Order submitted");
        check_response_status(&response).with_context(|| format!("Order rejected ({})", order))
    }
}

/// Map non-2xx statuses to descriptive errors.
///
/// - 401 → team name or password rejected
/// - 404 → unknown endpoint or actor
/// - 422 → request failed server-side validation
/// - Other non-2xx → generic server error
fn check_response_status(response: &reqwest::Response) -> Result<()> {
    match response.status() {
        StatusCode::UNAUTHORIZED => Err(anyhow!("Game server rejected team credentials")),
        StatusCode::NOT_FOUND => Err(anyhow!(
            "Game server returned 404 for {}",
            response.url().path()
        )),
        StatusCode::UNPROCESSABLE_ENTITY => Err(anyhow!("Game server rejected request as invalid")),
        s if !s.is_success() => Err(anyhow!("Game server error: {}", s)),
        _ => Ok(()),
    }
}
