use crate::geometry::Coordinates;
use serde::{Deserialize, Serialize};

/// Anything on the board that belongs to a team.
pub trait Owned {
    fn team(&self) -> &str;
    fn coordinates(&self) -> Coordinates;
}

/// A controllable unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Actor {
    /// Actor class (e.g. "Generic", "Runner"), decides capabilities server-side
    #[serde(rename = "type")]
    pub kind: String,

    /// Identity used to address orders, stable while the actor lives
    pub ident: u64,

    pub team: String,

    /// Team name of the flag being carried, if any
    #[serde(default)]
    pub flag: Option<String>,

    pub coordinates: Coordinates,
}

impl Actor {
    /// The flag this actor carries. `null` and `""` both mean empty-handed.
    pub fn carried_flag(&self) -> Option<&str> {
        self.flag.as_deref().filter(|flag| !flag.is_empty())
    }

    pub fn is_carrying(&self) -> bool {
        self.carried_flag().is_some()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Flag {
    pub team: String,
    pub coordinates: Coordinates,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Base {
    pub team: String,
    pub coordinates: Coordinates,
}

/// Static obstacle.
///
/// Accepts both `{"coordinates": {"x": 1, "y": 2}}` and `{"x": 1, "y": 2}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WallPayload")]
pub struct Wall {
    pub coordinates: Coordinates,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WallPayload {
    Nested { coordinates: Coordinates },
    Flat(Coordinates),
}

impl From<WallPayload> for Wall {
    fn from(payload: WallPayload) -> Self {
        let coordinates = match payload {
            WallPayload::Nested { coordinates } => coordinates,
            WallPayload::Flat(coordinates) => coordinates,
        };
        Self { coordinates }
    }
}

macro_rules! impl_owned {
    ($($ty:ty),*) => {
        $(
            impl Owned for $ty {
                fn team(&self) -> &str {
                    &self.team
                }

                fn coordinates(&self) -> Coordinates {
                    self.coordinates
                }
            }
        )*
    };
}

impl_owned!(Actor, Flag, Base);
