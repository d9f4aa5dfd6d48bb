//! Game server access.
//!
//! Everything that touches the network goes through [`GameServer`]. The
//! production implementation is [`GameClient`]; tests substitute in-memory
//! fakes.

mod client;

pub use client::GameClient;

use crate::engine::Order;
use crate::state::{GameRules, GameState, Timing};
use anyhow::Result;
use async_trait::async_trait;

/// Team name and password, sent as HTTP basic auth with every order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamCredentials {
    pub name: String,
    pub password: String,
}

impl TeamCredentials {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

/// The read and write endpoints of a game server.
///
/// # Errors
/// Every method fails on connection problems, non-2xx responses, and
/// payloads that do not decode.
#[async_trait]
pub trait GameServer: Send + Sync {
    /// `GET states/timing`
    async fn fetch_timing(&self) -> Result<Timing>;

    /// `GET states/game_state`
    async fn fetch_state(&self) -> Result<GameState>;

    /// `GET states/game_rules`
    async fn fetch_rules(&self) -> Result<GameRules>;

    /// `POST orders/{order_type}/{actor}?direction={direction}`, authenticated
    async fn submit_order(&self, order: &Order) -> Result<()>;
}
