// Grid geometry: distances, headings, projected steps
pub mod geometry;

// Polled game state and ownership filters
pub mod state;

// Direction strategies (greedy heuristic, wall-aware search)
pub mod pathing;

// Per-tick order generation
pub mod engine;

// HTTP access to the game server
pub mod transport;

// Tick-synchronised decision loop
pub mod scheduler;

// Static configuration (TOML + environment)
pub mod config;

pub use config::BotConfig;
pub use engine::{ChainingStrategy, DecisionEngine, Order, OrderType};
pub use scheduler::{ErrorPolicy, TickOutcome, TickScheduler};
pub use transport::{GameClient, GameServer, TeamCredentials};
