// Decision engine: one snapshot in, the full order list for our actors out

mod order;

pub use order::{Order, OrderType};

use crate::geometry::{distance, project, Coordinates};
use crate::pathing::{Greedy, Pathfinder};
use crate::state::{Actor, GameState};
use serde::Deserialize;
use tracing::{debug, warn};


/// How to handle an actor two steps away from its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainingStrategy {
    /// Assume the first move succeeds and queue the action right behind it
    Optimistic,
    /// Only move; the next snapshot decides the action
    Repoll,
}

impl Default for ChainingStrategy {
    fn default() -> Self {
        ChainingStrategy::Optimistic
    }
}

impl std::str::FromStr for ChainingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "optimistic" => Ok(ChainingStrategy::Optimistic),
            "repoll" | "re-poll" | "re_poll" => Ok(ChainingStrategy::Repoll),
            other => Err(format!("unknown chaining strategy: {}", other)),
        }
    }
}

/// Why an actor got no orders this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// Empty-handed actor, but no flag of another team on the board
    NoEnemyFlag,
    /// Carrying actor, but our team has no base in the snapshot
    NoOwnBase,
}

impl std::fmt::Display for TargetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetError::NoEnemyFlag => write!(f, "no enemy flag to seek"),
            TargetError::NoOwnBase => write!(f, "no own base to return to"),
        }
    }
}

impl std::error::Error for TargetError {}

/// Where an actor is heading and what it does on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub coordinates: Coordinates,
    pub action: OrderType,
}

/// Maps a snapshot to orders for every actor of `team`.
///
/// Pure apart from logging: holds only the team identity and strategies.
pub struct DecisionEngine {
    team: String,
    chaining: ChainingStrategy,
    pathfinder: Box<dyn Pathfinder>,
}

impl DecisionEngine {
    /// Engine with greedy pathing and optimistic chaining.
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            chaining: ChainingStrategy::default(),
            pathfinder: Box::new(Greedy),
        }
    }

    pub fn with_chaining(mut self, chaining: ChainingStrategy) -> Self {
        self.chaining = chaining;
        self
    }

    pub fn with_pathfinder(mut self, pathfinder: Box<dyn Pathfinder>) -> Self {
        self.pathfinder = pathfinder;
        self
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn chaining(&self) -> ChainingStrategy {
        self.chaining
    }

    pub fn pathfinder_name(&self) -> &str {
        self.pathfinder.name()
    }

    /// Orders for all own actors, in the order the server listed them.
    ///
    /// Actors without a valid target are skipped; the rest are unaffected.
    pub fn generate_orders(&self, state: &GameState) -> Vec<Order> {
        let mut orders = Vec::new();
        for actor in state.own_actors(&self.team) {
            match self.select_target(actor, state) {
                Ok(target) => orders.extend(self.seek(actor, target, state)),
                Err(e) => {
                    warn!(
                        tick = state.tick,
                        actor = actor.ident,
                        error = %e,
                        "Skipping actor without a target"
                    );
                }
            }
        }
        orders
    }

    /// Nearest enemy flag when empty-handed, own base when carrying.
    ///
    /// Ties between equally near flags go to the first one listed.
    pub fn select_target(&self, actor: &Actor, state: &GameState) -> Result<Target, TargetError> {
        if actor.is_carrying() {
            let base = state.own_base(&self.team).ok_or(TargetError::NoOwnBase)?;
            return Ok(Target {
                coordinates: base.coordinates,
                action: OrderType::Grabput,
            });
        }

        let flag = state
            .enemy_flags(&self.team)
            .into_iter()
            .min_by_key(|flag| distance(actor.coordinates, flag.coordinates))
            .ok_or(TargetError::NoEnemyFlag)?;
        Ok(Target {
            coordinates: flag.coordinates,
            action: OrderType::Grabput,
        })
    }

    /// One or two orders moving `actor` towards `target`.
    ///
    /// Adjacent: act. Two away: move, then (optimistic chaining) act from the
    /// projected cell. Anything else: move.
    pub fn seek(&self, actor: &Actor, target: Target, state: &GameState) -> Vec<Order> {
        let position = actor.coordinates;
        let direction = self.pathfinder.next_direction(position, target.coordinates, state);
        let dist = distance(position, target.coordinates);

        if dist == 1 {
            return vec![Order::new(target.action, actor.ident, direction)];
        }

        let mut orders = vec![Order::new(OrderType::Move, actor.ident, direction)];
        if dist == 2 && self.chaining == ChainingStrategy::Optimistic {
            let projected = project(position, direction);
            // A detour step leaves the target out of reach; nothing to chain.
            if distance(projected, target.coordinates) == 1 {
                let next = self
                    .pathfinder
                    .next_direction(projected, target.coordinates, state);
                orders.push(Order::new(target.action, actor.ident, next));
            } else {
                debug!(actor = actor.ident, %projected, "Not chaining after detour step");
            }
        }
        orders
    }
}
