use serde::{Deserialize, Serialize};


/// A cell on the game board.
///
/// `y` grows upwards: `Direction::Up` increments it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i64,
    pub y: i64,
}

impl Coordinates {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four unit steps an actor can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Wire name used in the `direction` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Manhattan distance between two cells.
pub fn distance(a: Coordinates, b: Coordinates) -> u64 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Greedy single-step heading from `from` towards `to`.
///
/// Moves along the axis with the larger delta. When both deltas are equal
/// (including `from == to`) the vertical axis wins.
pub fn choose_direction(from: Coordinates, to: Coordinates) -> Direction {
    if from.x.abs_diff(to.x) > from.y.abs_diff(to.y) {
        if from.x > to.x {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if from.y > to.y {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Position after one step in `direction`. No bounds or wall checks.
pub fn project(position: Coordinates, direction: Direction) -> Coordinates {
    match direction {
        Direction::Up => Coordinates::new(position.x, position.y + 1),
        Direction::Down => Coordinates::new(position.x, position.y - 1),
        Direction::Left => Coordinates::new(position.x - 1, position.y),
        Direction::Right => Coordinates::new(position.x + 1, position.y),
    }
}
