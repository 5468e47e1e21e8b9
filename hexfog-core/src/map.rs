//! HexMap - single owner of a grid, its pathfinder and its fog state
//!
//! All occupant and terrain changes go through the map so it knows exactly
//! when the fog has gone stale. Hosts call `refresh_if_stale()` after a batch
//! of changes instead of refreshing every frame.
//!
//! ## Architecture
//! - Level 1: queries (`find_path`, `distance`, `is_visible`)
//! - Level 2: mutation (`place`, `remove`, `move_actor`, terrain, resize)
//! - Level 3: fog refresh
//! - Level 4: routes (`order_move`, `advance`)

use crate::actor::{Actor, ActorId};
use crate::board::Hex;
use crate::config::EngineConfig;
use crate::error::GridError;
use crate::grid::{HexGrid, Tile};
use crate::pathfind::PathFinder;
use crate::visibility::{self, VisibilityReport};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Result of advancing an actor one step along its route
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Actor has no route
    Idle,
    /// Stepped onto the tile; more steps remain
    Moved(Hex),
    /// Stepped onto the final tile; route finished
    Arrived(Hex),
    /// Next tile is occupied or no longer traversable; route kept
    Blocked(Hex),
    /// Actor is not on the map
    Missing,
}

/// Grid plus pathfinding, fog of war and unit routes
#[derive(Debug)]
pub struct HexMap {
    grid: HexGrid,
    finder: PathFinder,
    config: EngineConfig,
    fog_stale: bool,
    routes: FxHashMap<ActorId, VecDeque<Hex>>,
}

impl HexMap {
    /// Wrap a grid and compute the initial fog
    pub fn new(grid: HexGrid, config: EngineConfig) -> Self {
        let finder = PathFinder::with_capacity(config.node_capacity);
        let mut map = Self {
            grid,
            finder,
            config,
            fog_stale: true,
            routes: FxHashMap::default(),
        };
        map.refresh_visibility();
        map
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether a change since the last refresh may have altered visibility
    pub fn is_fog_stale(&self) -> bool {
        self.fog_stale
    }

    // ========================================================================
    // LEVEL 1 - QUERIES
    // ========================================================================

    pub fn resolve(&self, hex: Hex) -> Option<&Tile> {
        self.grid.resolve(hex)
    }

    pub fn distance(&self, a: Hex, b: Hex) -> u32 {
        self.grid.distance(a, b)
    }

    /// Shortest path, excluding `start`; empty when unreachable
    pub fn find_path(&mut self, start: Hex, goal: Hex) -> Vec<Hex> {
        self.finder.find_path(&self.grid, start, goal)
    }

    pub fn is_visible(&self, hex: Hex) -> bool {
        self.grid.is_visible(hex)
    }

    pub fn locate(&self, id: ActorId) -> Option<Hex> {
        self.grid.locate(id)
    }

    // ========================================================================
    // LEVEL 2 - MUTATION
    // ========================================================================

    pub fn place(&mut self, hex: Hex, actor: Actor) -> bool {
        let placed = self.grid.place(hex, actor);
        if placed && actor.reveals {
            self.fog_stale = true;
        }
        placed
    }

    /// Take an actor off the map; its route is dropped
    pub fn remove(&mut self, hex: Hex) -> Option<Actor> {
        let actor = self.grid.remove(hex)?;
        self.routes.remove(&actor.id);
        if actor.reveals {
            self.fog_stale = true;
        }
        Some(actor)
    }

    /// Relocate an occupant directly; any planned route for it is cancelled
    pub fn move_actor(&mut self, src: Hex, dst: Hex) -> bool {
        let actor = match self.grid.occupant(src) {
            Some(a) => a,
            None => return false,
        };
        let moved = self.transfer(src, dst);
        if moved {
            self.routes.remove(&actor.id);
        }
        moved
    }

    fn transfer(&mut self, src: Hex, dst: Hex) -> bool {
        let reveals = self.grid.occupant(src).map_or(false, |a| a.reveals);
        let moved = self.grid.move_occupant(src, dst);
        if moved && reveals {
            self.fog_stale = true;
        }
        moved
    }

    /// Change terrain; lines of sight may open or close
    pub fn set_traversable(&mut self, hex: Hex, traversable: bool) -> bool {
        let changed = self.grid.is_traversable(hex) != traversable;
        let in_bounds = self.grid.set_traversable(hex, traversable);
        if in_bounds && changed {
            self.fog_stale = true;
        }
        in_bounds
    }

    /// Resize the underlying grid; returns actors that fell off the edge
    pub fn resize(&mut self, width: usize, height: usize) -> Result<Vec<Actor>, GridError> {
        let evicted = self.grid.resize(width, height)?;
        for actor in &evicted {
            self.routes.remove(&actor.id);
        }
        self.fog_stale = true;
        Ok(evicted)
    }

    // ========================================================================
    // LEVEL 3 - FOG
    // ========================================================================

    /// Recompute visibility now
    pub fn refresh_visibility(&mut self) -> VisibilityReport {
        let report = if self.config.fog_of_war {
            visibility::refresh_visibility(&mut self.grid, &mut self.finder)
        } else {
            visibility::reveal_all(&mut self.grid)
        };
        self.fog_stale = false;
        report
    }

    /// Recompute visibility only if something changed since the last refresh
    pub fn refresh_if_stale(&mut self) -> Option<VisibilityReport> {
        if self.fog_stale {
            Some(self.refresh_visibility())
        } else {
            None
        }
    }

    // ========================================================================
    // LEVEL 4 - ROUTES
    // ========================================================================

    /// Plan a route for an actor to `goal`.
    ///
    /// Any previous route is dropped. Returns false when the actor is not on
    /// the map, the goal is not traversable, or no path exists.
    pub fn order_move(&mut self, id: ActorId, goal: Hex) -> bool {
        self.routes.remove(&id);

        let start = match self.grid.locate(id) {
            Some(hex) => hex,
            None => return false,
        };
        if !self.grid.is_traversable(goal) {
            tracing::debug!(actor = %id, %goal, "move order to blocked tile rejected");
            return false;
        }

        let path = self.finder.find_path(&self.grid, start, goal);
        if path.is_empty() {
            tracing::debug!(actor = %id, %start, %goal, "no route");
            return false;
        }

        self.routes.insert(id, path.into());
        true
    }

    /// Remaining steps of an actor's route
    pub fn route(&self, id: ActorId) -> Option<&VecDeque<Hex>> {
        self.routes.get(&id)
    }

    pub fn cancel_route(&mut self, id: ActorId) -> bool {
        self.routes.remove(&id).is_some()
    }

    /// Take the next step of an actor's route
    pub fn advance(&mut self, id: ActorId) -> StepOutcome {
        let at = match self.grid.locate(id) {
            Some(hex) => hex,
            None => {
                self.routes.remove(&id);
                return StepOutcome::Missing;
            }
        };
        let next = match self.routes.get(&id).and_then(|r| r.front().copied()) {
            Some(hex) => hex,
            None => {
                self.routes.remove(&id);
                return StepOutcome::Idle;
            }
        };

        if !self.transfer(at, next) {
            return StepOutcome::Blocked(next);
        }

        let finished = match self.routes.get_mut(&id) {
            Some(route) => {
                route.pop_front();
                route.is_empty()
            }
            None => true,
        };
        if finished {
            self.routes.remove(&id);
            StepOutcome::Arrived(next)
        } else {
            StepOutcome::Moved(next)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
