//! Engine configuration

use crate::pathfind::DEFAULT_NODE_CAPACITY;
use serde::{Deserialize, Serialize};

/// Settings for a [`crate::HexMap`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hide tiles no friendly unit can see; when off every tile is visible
    pub fog_of_war: bool,
    /// Initial node arena size for the pathfinder
    pub node_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fog_of_war: true,
            node_capacity: DEFAULT_NODE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Config with the fog lifted
    pub fn without_fog() -> Self {
        Self {
            fog_of_war: false,
            ..Default::default()
        }
    }

    /// Set arena capacity
    pub fn with_node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }
}
