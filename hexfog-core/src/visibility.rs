//! Fog of war: obstacle-aware sight flood per actor, unioned into the grid
//!
//! A tile within an actor's sight radius is visible only when the shortest
//! walkable path to it is exactly as long as the raw hex distance, i.e. no
//! obstacle forces a detour. Blocked tiles can be seen but are never seen
//! through.
//!
//! Each candidate costs a full path search, so a refresh is meant to run when
//! occupants or terrain change, not every frame.

use crate::actor::ActorId;
use crate::board::Hex;
use crate::grid::HexGrid;
use crate::pathfind::PathFinder;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Tiles revealed by one sight source
#[derive(Clone, Debug)]
pub struct SourceView {
    pub actor: ActorId,
    pub origin: Hex,
    pub radius: u32,
    pub revealed: FxHashSet<Hex>,
}

/// Outcome of a global refresh
#[derive(Clone, Debug, Default)]
pub struct VisibilityReport {
    pub sources: Vec<SourceView>,
    /// Visible tiles on the grid after the union
    pub visible: usize,
}

impl VisibilityReport {
    /// Union of all sources' revealed tiles
    pub fn revealed(&self) -> FxHashSet<Hex> {
        self.sources
            .iter()
            .flat_map(|view| view.revealed.iter().copied())
            .collect()
    }
}

/// Flood outward from `origin` and collect the tiles it can see.
///
/// Candidates beyond `radius` are dropped without expanding them; only
/// traversable candidates pass the flood on to their neighbors.
pub fn reveal(grid: &HexGrid, finder: &mut PathFinder, origin: Hex, radius: u32) -> FxHashSet<Hex> {
    let mut revealed = FxHashSet::default();
    if !grid.contains(origin) {
        return revealed;
    }

    let mut open = VecDeque::from([origin]);
    // Everything ever queued: open and closed together
    let mut discovered = FxHashSet::default();
    discovered.insert(origin);

    while let Some(head) = open.pop_front() {
        let raw = origin.distance_to(head);
        if raw > radius {
            continue;
        }

        if finder.path_length(grid, origin, head) == Some(raw as usize) {
            revealed.insert(head);
        }

        if grid.is_traversable(head) {
            for tile in grid.neighbors(head) {
                if discovered.insert(tile.hex()) {
                    open.push_back(tile.hex());
                }
            }
        }
    }

    revealed
}

/// Recompute the grid's visibility flags from every sight source on it.
///
/// All flags are cleared first; a tile ends up visible iff at least one
/// source revealed it.
pub fn refresh_visibility(grid: &mut HexGrid, finder: &mut PathFinder) -> VisibilityReport {
    let sources: Vec<SourceView> = grid
        .sight_sources()
        .into_iter()
        .map(|(origin, actor)| SourceView {
            actor: actor.id,
            origin,
            radius: actor.sight_radius,
            revealed: reveal(grid, finder, origin, actor.sight_radius),
        })
        .collect();

    grid.set_all_visible(false);
    for view in &sources {
        for &hex in &view.revealed {
            grid.mark_visible(hex);
        }
    }

    let visible = grid.visible_count();
    tracing::debug!(sources = sources.len(), visible, "fog refreshed");

    VisibilityReport { sources, visible }
}

/// Lift the fog entirely
pub fn reveal_all(grid: &mut HexGrid) -> VisibilityReport {
    grid.set_all_visible(true);
    VisibilityReport {
        sources: Vec::new(),
        visible: grid.len(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
