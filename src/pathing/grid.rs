use super::Pathfinder;
use crate::geometry::{choose_direction, distance, project, Coordinates, Direction};
use crate::state::GameState;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// A* over the 4-neighbour board with unit step cost.
///
/// Walls, bases and actors other than the mover are impassable; the goal cell
/// never is. Falls back to the greedy heading when no route exists.
#[derive(Clone, Copy, Debug)]
pub struct Grid {
    map_size: Option<i64>,
}

/// Inclusive board rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bounds {
    min: Coordinates,
    max: Coordinates,
}

impl Bounds {
    fn contains(&self, c: Coordinates) -> bool {
        c.x >= self.min.x && c.x <= self.max.x && c.y >= self.min.y && c.y <= self.max.y
    }
}

impl Grid {
    pub fn new(map_size: Option<i64>) -> Self {
        Self { map_size }
    }

    fn bounds(&self, from: Coordinates, to: Coordinates, state: &GameState) -> Bounds {
        if let Some(size) = self.map_size.filter(|size| *size > 0) {
            return Bounds {
                min: Coordinates::new(0, 0),
                max: Coordinates::new(size - 1, size - 1),
            };
        }

        let mut min = from;
        let mut max = from;
        for c in state.all_coordinates().chain([to]) {
            min = Coordinates::new(min.x.min(c.x), min.y.min(c.y));
            max = Coordinates::new(max.x.max(c.x), max.y.max(c.y));
        }
        Bounds {
            min: Coordinates::new(min.x - 1, min.y - 1),
            max: Coordinates::new(max.x + 1, max.y + 1),
        }
    }

    /// Shortest path from `from` to `to`, excluding `from`. `None` when unreachable.
    fn route(&self, from: Coordinates, to: Coordinates, state: &GameState) -> Option<Vec<Coordinates>> {
        let bounds = self.bounds(from, to, state);
        let blocked: HashSet<Coordinates> = state
            .walls
            .iter()
            .map(|w| w.coordinates)
            .chain(state.bases.iter().map(|b| b.coordinates))
            .chain(state.actors.iter().map(|a| a.coordinates))
            .filter(|c| *c != to && *c != from)
            .collect();

        let mut frontier = BinaryHeap::new();
        let mut came_from: HashMap<Coordinates, Coordinates> = HashMap::new();
        let mut cost: HashMap<Coordinates, u64> = HashMap::new();
        // Insertion counter keeps pops deterministic among equal priorities.
        let mut pushed: u64 = 0;

        cost.insert(from, 0);
        frontier.push(Reverse((distance(from, to), pushed, from.x, from.y)));

        while let Some(Reverse((_, _, x, y))) = frontier.pop() {
            let current = Coordinates::new(x, y);
            if current == to {
                return Some(reconstruct(&came_from, from, to));
            }
            let current_cost = cost[&current];

            for direction in Direction::ALL {
                let next = project(current, direction);
                if !bounds.contains(next) || blocked.contains(&next) {
                    continue;
                }
                let next_cost = current_cost + 1;
                if cost.get(&next).map_or(true, |known| next_cost < *known) {
                    cost.insert(next, next_cost);
                    came_from.insert(next, current);
                    pushed += 1;
                    frontier.push(Reverse((
                        next_cost + distance(next, to),
                        pushed,
                        next.x,
                        next.y,
                    )));
                }
            }
        }

        None
    }
}

fn reconstruct(
    came_from: &HashMap<Coordinates, Coordinates>,
    from: Coordinates,
    to: Coordinates,
) -> Vec<Coordinates> {
    let mut path = vec![to];
    let mut current = to;
    while let Some(previous) = came_from.get(&current) {
        if *previous == from {
            break;
        }
        path.push(*previous);
        current = *previous;
    }
    path.reverse();
    path
}

fn step_direction(from: Coordinates, next: Coordinates) -> Direction {
    Direction::ALL
        .into_iter()
        .find(|d| project(from, *d) == next)
        .unwrap_or_else(|| choose_direction(from, next))
}

impl Pathfinder for Grid {
    fn name(&self) -> &str {
        "grid"
    }

    fn next_direction(&self, from: Coordinates, to: Coordinates, state: &GameState) -> Direction {
        if from == to {
            return choose_direction(from, to);
        }
        match self.route(from, to, state).and_then(|path| path.first().copied()) {
            Some(next) => step_direction(from, next),
            None => choose_direction(from, to),
        }
    }
}
