use anyhow::{Context, Result};
use flagrunner::pathing::{self, PathingKind};
use flagrunner::{BotConfig, DecisionEngine, GameClient, GameServer, TickScheduler};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flagrunner=info".into()),
        )
        .init();

    info!("Flagrunner starting...");

    let config = BotConfig::from_env().context("Failed to load configuration")?;
    info!(
        server = %config.server.url,
        team = %config.team.name,
        chaining = ?config.strategy.chaining,
        pathing = ?config.strategy.pathing,
        "Configuration loaded"
    );

    let client = GameClient::new(
        &config.server.url,
        config.team.credentials(),
        config.server.timeout(),
    )?;

    let map_size = match (config.strategy.pathing, config.strategy.map_size) {
        (PathingKind::Grid, None) => {
            let rules = client
                .fetch_rules()
                .await
                .context("Failed to fetch game rules for grid pathing")?;
            info!(map_size = rules.map_size, max_ticks = rules.max_ticks, "Game rules loaded");
            Some(rules.map_size)
        }
        (_, size) => size,
    };

    let engine = DecisionEngine::new(config.team.name.clone())
        .with_chaining(config.strategy.chaining)
        .with_pathfinder(pathing::build(config.strategy.pathing, map_size));

    let mut scheduler = TickScheduler::new(client, engine, config.errors.policy());

    tokio::select! {
        result = scheduler.run() => result,
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for ctrl_c signal")?;
            info!("Shutdown signal received");
            Ok(())
        }
    }
}
