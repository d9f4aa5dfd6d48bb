use crate::geometry::Direction;
use serde::{Deserialize, Serialize};

/// Order kinds the server accepts under `orders/{order_type}/...`.
///
/// The full server vocabulary is modelled so orders decode and display for
/// every kind; [`DecisionEngine`](super::DecisionEngine) only emits `Move` and
/// `Grabput`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Move,
    Grabput,
    Attack,
    Build,
    Destroy,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Move => "move",
            OrderType::Grabput => "grabput",
            OrderType::Attack => "attack",
            OrderType::Build => "build",
            OrderType::Destroy => "destroy",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single directive for one actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_type: OrderType,
    /// Ident of the addressed actor
    pub actor: u64,
    pub direction: Direction,
}

impl Order {
    pub fn new(order_type: OrderType, actor: u64, direction: Direction) -> Self {
        Self {
            order_type,
            actor,
            direction,
        }
    }

    /// Path relative to the server root, without the query string.
    pub fn path(&self) -> String {
        format!("orders/{}/{}", self.order_type, self.actor)
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} actor {} {}", self.order_type, self.actor, self.direction)
    }
}
