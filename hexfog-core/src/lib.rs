//! HEXFOG Core - Hex grid pathfinding and fog of war
//!
//! This crate provides the spatial engine:
//! - Board geometry (logical/storage coordinates, cube distance)
//! - Tile grid with traversability and occupant placement
//! - A* pathfinding over a reusable node arena and sorted frontier
//! - Obstacle-aware visibility flood for fog of war
//! - HexMap facade tracking when the fog needs recomputing

pub mod board;
pub mod actor;
pub mod error;
pub mod grid;
pub mod layout;
pub mod node;
pub mod frontier;
pub mod pathfind;
pub mod visibility;
pub mod config;
pub mod map;

// Re-exports for convenient access
pub use board::{Hex, DIRECTIONS};
pub use actor::{Actor, ActorId};
pub use error::GridError;
pub use grid::{HexGrid, Tile};
pub use layout::MapLayout;
pub use pathfind::{PathFinder, SearchStats};
pub use visibility::{refresh_visibility, reveal, SourceView, VisibilityReport};
pub use config::EngineConfig;
pub use map::{HexMap, StepOutcome};
