mod env;

pub use env::ENV_PREFIX;

use crate::engine::ChainingStrategy;
use crate::pathing::PathingKind;
use crate::scheduler::{ErrorPolicy, SubmitErrorPolicy, TransportErrorPolicy};
use crate::transport::TeamCredentials;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "flagrunner.toml";

/// Complete bot configuration. Loaded once; immutable afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub team: TeamConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub errors: ErrorConfig,
}

/// Game server location
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_url")]
    pub url: String,
    /// Per-request HTTP timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_server_url() -> String {
    "http://127.0.0.1:8000/".to_string()
}

fn default_timeout_seconds() -> u64 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Bot identity
#[derive(Clone, Deserialize)]
pub struct TeamConfig {
    #[serde(default = "default_team_name")]
    pub name: String,
    #[serde(default = "default_team_password")]
    pub password: String,
}

fn default_team_name() -> String {
    "Team 1".to_string()
}

fn default_team_password() -> String {
    "1".to_string()
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            name: default_team_name(),
            password: default_team_password(),
        }
    }
}

impl std::fmt::Debug for TeamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamConfig")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl TeamConfig {
    pub fn credentials(&self) -> TeamCredentials {
        TeamCredentials::new(self.name.clone(), self.password.clone())
    }
}

/// Decision strategies
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub chaining: ChainingStrategy,
    #[serde(default)]
    pub pathing: PathingKind,
    /// Board edge length for grid pathing; fetched from the server when absent
    #[serde(default)]
    pub map_size: Option<i64>,
}

/// Failure handling
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorConfig {
    #[serde(default)]
    pub on_transport_error: TransportErrorPolicy,
    #[serde(default)]
    pub on_submit_error: SubmitErrorPolicy,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self {
            on_transport_error: TransportErrorPolicy::default(),
            on_submit_error: SubmitErrorPolicy::default(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl ErrorConfig {
    pub fn policy(&self) -> ErrorPolicy {
        ErrorPolicy {
            on_transport_error: self.on_transport_error,
            on_submit_error: self.on_submit_error,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<BotConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

impl BotConfig {
    /// Defaults, then the config file, then `FLAGRUNNER_*` environment overrides.
    ///
    /// The file comes from `FLAGRUNNER_CONFIG` (must exist if set) or
    /// [`DEFAULT_CONFIG_FILE`] (optional).
    pub fn from_env() -> Result<Self> {
        let lookup = |key: &str| std::env::var(key).ok();
        let mut config = match config_path(lookup) {
            Some(path) => load_config(&path)?,
            None => BotConfig::default(),
        };
        config.apply_overrides(lookup);
        Ok(config)
    }
}

fn config_path<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(&format!("{}CONFIG", ENV_PREFIX)) {
        return Some(PathBuf::from(path));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    default.exists().then_some(default)
}
