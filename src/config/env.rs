use super::BotConfig;
use crate::engine::ChainingStrategy;
use crate::pathing::PathingKind;
use crate::scheduler::{SubmitErrorPolicy, TransportErrorPolicy};

/// Prefix of every environment variable the bot reads
pub const ENV_PREFIX: &str = "FLAGRUNNER_";

impl BotConfig {
    /// Override fields from `FLAGRUNNER_*` variables. Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(v) = var("SERVER_URL") {
            self.server.url = v;
        }
        if let Some(v) = var("TEAM") {
            self.team.name = v;
        }
        if let Some(v) = var("PASSWORD") {
            self.team.password = v;
        }
        if let Some(Ok(v)) = var("CHAINING").map(|v| v.parse::<ChainingStrategy>()) {
            self.strategy.chaining = v;
        }
        if let Some(Ok(v)) = var("PATHING").map(|v| v.parse::<PathingKind>()) {
            self.strategy.pathing = v;
        }
        if let Some(Ok(n)) = var("MAP_SIZE").map(|v| v.parse::<i64>()) {
            self.strategy.map_size = Some(n);
        }
        if let Some(Ok(v)) = var("ON_TRANSPORT_ERROR").map(|v| v.parse::<TransportErrorPolicy>()) {
            self.errors.on_transport_error = v;
        }
        if let Some(Ok(v)) = var("ON_SUBMIT_ERROR").map(|v| v.parse::<SubmitErrorPolicy>()) {
            self.errors.on_submit_error = v;
        }
    }
}
