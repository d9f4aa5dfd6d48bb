// Polled game state: one snapshot per tick, rebuilt from scratch every time

mod entity;
mod timing;

pub use entity::{Actor, Base, Flag, Owned, Wall};
pub use timing::{GameRules, Timing};

use crate::geometry::Coordinates;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;


/// Response of `GET states/game_state`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub flags: Vec<Flag>,
    #[serde(default)]
    pub bases: Vec<Base>,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub scores: HashMap<String, i64>,
    pub tick: u64,
    #[serde(default)]
    pub time_of_next_execution: String,
}

impl GameState {
    /// Actors belonging to `team`, in server order.
    pub fn own_actors<'a>(&'a self, team: &str) -> Vec<&'a Actor> {
        filter_owned(&self.actors, team, true)
    }

    /// Flags belonging to any other team, in server order.
    pub fn enemy_flags<'a>(&'a self, team: &str) -> Vec<&'a Flag> {
        filter_owned(&self.flags, team, false)
    }

    /// First base belonging to `team`.
    pub fn own_base(&self, team: &str) -> Option<&Base> {
        self.bases.iter().find(|base| base.team == team)
    }

    pub fn score(&self, team: &str) -> i64 {
        self.scores.get(team).copied().unwrap_or(0)
    }

    /// Every coordinate mentioned in the snapshot.
    pub fn all_coordinates(&self) -> impl Iterator<Item = Coordinates> + '_ {
        self.actors
            .iter()
            .map(|a| a.coordinates)
            .chain(self.flags.iter().map(|f| f.coordinates))
            .chain(self.bases.iter().map(|b| b.coordinates))
            .chain(self.walls.iter().map(|w| w.coordinates))
    }
}

/// Keep entities owned by `team` (`mine == true`) or by anyone else
/// (`mine == false`). Preserves input order.
pub fn filter_owned<'a, T: Owned>(items: &'a [T], team: &str, mine: bool) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| (item.team() == team) == mine)
        .collect()
}
