//! Direction strategies.
//!
//! The decision engine asks a [`Pathfinder`] for the next step towards a
//! target. [`Greedy`] is the plain axis-dominant heuristic and ignores the
//! board; [`Grid`] searches the board and routes around walls and bases.

mod grid;

pub use grid::Grid;

use crate::geometry::{choose_direction, Coordinates, Direction};
use crate::state::GameState;
use serde::Deserialize;

/// Picks the first step from `from` towards `to`.
pub trait Pathfinder: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    fn next_direction(&self, from: Coordinates, to: Coordinates, state: &GameState) -> Direction;
}

/// Axis-dominant heuristic, see [`choose_direction`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Greedy;

impl Pathfinder for Greedy {
    fn name(&self) -> &str {
        "greedy"
    }

    fn next_direction(&self, from: Coordinates, to: Coordinates, _state: &GameState) -> Direction {
        choose_direction(from, to)
    }
}

/// Which [`Pathfinder`] to build from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathingKind {
    Greedy,
    Grid,
}

impl Default for PathingKind {
    fn default() -> Self {
        PathingKind::Greedy
    }
}

impl std::str::FromStr for PathingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(PathingKind::Greedy),
            "grid" => Ok(PathingKind::Grid),
            other => Err(format!("unknown pathing strategy: {}", other)),
        }
    }
}

/// Build the configured strategy. `map_size` only matters for [`Grid`].
pub fn build(kind: PathingKind, map_size: Option<i64>) -> Box<dyn Pathfinder> {
    match kind {
        PathingKind::Greedy => Box::new(Greedy),
        PathingKind::Grid => Box::new(Grid::new(map_size)),
    }
}
