//! Actors that occupy tiles and act as sight sources

use serde::{Deserialize, Serialize};

/// Caller-assigned actor identifier, unique on a grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A unit on the map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    /// Sight radius in hex steps
    pub sight_radius: u32,
    /// Whether this actor lifts the fog around it (friendly unit)
    pub reveals: bool,
}

impl Actor {
    /// Friendly unit that reveals tiles within `sight_radius`
    pub const fn scout(id: u32, sight_radius: u32) -> Self {
        Self {
            id: ActorId(id),
            sight_radius,
            reveals: true,
        }
    }

    /// Unit that does not contribute to visibility
    pub const fn blind(id: u32) -> Self {
        Self {
            id: ActorId(id),
            sight_radius: 0,
            reveals: false,
        }
    }
}
