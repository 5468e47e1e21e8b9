//! A* pathfinding over a hex grid with uniform step cost
//!
//! ## Architecture
//! - Level 1: `find_path()` / `path_length()` - public entry points
//! - Level 2: `search()` - frontier / expanded-set bookkeeping
//! - Level 3: node arena and frontier (see `node`, `frontier`)

use crate::board::Hex;
use crate::frontier::Frontier;
use crate::grid::HexGrid;
use crate::node::NodeArena;
use rustc_hash::FxHashSet;

/// Default initial arena size
pub const DEFAULT_NODE_CAPACITY: usize = 256;

/// Counters from the most recent search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped and moved to the expanded set
    pub expanded: usize,
    /// Nodes handed out by the arena
    pub allocated: usize,
    /// Frontier entries re-parented onto a cheaper route
    pub relaxed: usize,
}

/// Reusable A* searcher.
///
/// Owns the node arena, the frontier and the expanded set; all three are
/// cleared after each search and keep their allocations for the next one.
#[derive(Debug)]
pub struct PathFinder {
    arena: NodeArena,
    frontier: Frontier,
    expanded: FxHashSet<Hex>,
    relaxed: usize,
    last: SearchStats,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_NODE_CAPACITY)
    }
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            frontier: Frontier::with_capacity(capacity),
            expanded: FxHashSet::default(),
            relaxed: 0,
            last: SearchStats::default(),
        }
    }

    /// Counters from the last completed search
    pub fn last_stats(&self) -> SearchStats {
        self.last
    }

    // ========================================================================
    // LEVEL 1 - ENTRY POINTS
    // ========================================================================

    /// Shortest path from `start` to `goal`.
    ///
    /// The returned tiles exclude `start` and end with `goal`. An empty path
    /// means no movement is needed (`start == goal`), the goal is unreachable,
    /// or either end is off the grid.
    pub fn find_path(&mut self, grid: &HexGrid, start: Hex, goal: Hex) -> Vec<Hex> {
        if start == goal || !grid.contains(start) || !grid.contains(goal) {
            self.last = SearchStats::default();
            return Vec::new();
        }

        let path = self.search(grid, start, goal);

        self.last = SearchStats {
            expanded: self.expanded.len(),
            allocated: self.arena.len(),
            relaxed: self.relaxed,
        };
        if path.is_empty() {
            tracing::trace!(%start, %goal, expanded = self.last.expanded, "goal unreachable");
        } else {
            tracing::trace!(%start, %goal, steps = path.len(), expanded = self.last.expanded, "path found");
        }

        self.reset();
        path
    }

    /// Number of steps on the shortest path, `None` when unreachable
    pub fn path_length(&mut self, grid: &HexGrid, start: Hex, goal: Hex) -> Option<usize> {
        if start == goal {
            return grid.contains(start).then_some(0);
        }
        let path = self.find_path(grid, start, goal);
        (!path.is_empty()).then_some(path.len())
    }

    // ========================================================================
    // LEVEL 2 - SEARCH
    // ========================================================================

    fn search(&mut self, grid: &HexGrid, start: Hex, goal: Hex) -> Vec<Hex> {
        let root = self.arena.alloc(start, 0, start.distance_to(goal), None);
        self.frontier.insert(root, &self.arena);

        while let Some(head_id) = self.frontier.pop_min() {
            let head = *self.arena.get(head_id);

            // A blocked goal is still a valid destination
            if head.hex == goal {
                return self.arena.path_to(head_id);
            }

            if grid.is_traversable(head.hex) {
                let g = head.g + 1;
                for tile in grid.neighbors(head.hex) {
                    let n = tile.hex();
                    if let Some(existing) = self.frontier.find(n, &self.arena) {
                        if self.frontier.relax(existing, g, Some(head_id), &mut self.arena) {
                            self.relaxed += 1;
                        }
                    } else if !self.expanded.contains(&n) {
                        let id = self.arena.alloc(n, g, n.distance_to(goal), Some(head_id));
                        self.frontier.insert(id, &self.arena);
                    }
                }
            }

            self.expanded.insert(head.hex);
        }

        Vec::new()
    }

    fn reset(&mut self) {
        self.arena.reset();
        self.frontier.clear();
        self.expanded.clear();
        self.relaxed = 0;
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn is_connected(path: &[Hex], start: Hex) -> bool {
        let mut prev = start;
        for &step in path {
            if prev.distance_to(step) != 1 {
                return false;
            }
            prev = step;
        }
        true
    }

    #[test]
    fn test_same_tile_is_empty() {
        let grid = HexGrid::new(4, 4).unwrap();
        let mut finder = PathFinder::new();
        assert!(finder.find_path(&grid, Hex::new(1, 1), Hex::new(1, 1)).is_empty());
        assert_eq!(finder.path_length(&grid, Hex::new(1, 1), Hex::new(1, 1)), Some(0));
    }

    #[test]
    fn test_off_grid_is_empty() {
        let grid = HexGrid::new(4, 4).unwrap();
        let mut finder = PathFinder::new();
        assert!(finder.find_path(&grid, Hex::new(0, 0), Hex::new(9, 9)).is_empty());
        assert!(finder.find_path(&grid, Hex::new(-5, 0), Hex::new(0, 0)).is_empty());
        assert_eq!(finder.path_length(&grid, Hex::new(-5, 0), Hex::new(-5, 0)), None);
    }

    #[test]
    fn test_three_by_three_corner() {
        let grid = HexGrid::new(3, 3).unwrap();
        let start = Hex::new(0, 0);
        let goal = grid.hex_at_storage(2, 2).unwrap();
        let mut finder = PathFinder::new();

        let path = finder.find_path(&grid, start, goal);
        assert_eq!(path.len() as u32, start.distance_to(goal));
        assert_eq!(path.last(), Some(&goal));
        assert!(!path.contains(&start));
        assert!(is_connected(&path, start));
    }

    #[test]
    fn test_open_grid_paths_match_distance() {
        let grid = HexGrid::new(5, 4).unwrap();
        let hexes: Vec<Hex> = grid.tiles().map(|t| t.hex()).collect();
        let mut finder = PathFinder::new();

        for &a in &hexes {
            for &b in &hexes {
                let path = finder.find_path(&grid, a, b);
                assert_eq!(path.len() as u32, a.distance_to(b), "{} -> {}", a, b);
                assert!(is_connected(&path, a));
            }
        }
    }

    #[test]
    fn test_detour_around_blocker() {
        let mut grid = HexGrid::new(5, 5).unwrap();
        grid.set_traversable(Hex::new(1, 0), false);
        let mut finder = PathFinder::new();

        let path = finder.find_path(&grid, Hex::new(0, 0), Hex::new(2, 0));
        assert_eq!(path.len(), 3);
        assert!(!path.contains(&Hex::new(1, 0)));
        assert!(is_connected(&path, Hex::new(0, 0)));
    }

    #[test]
    fn test_blocked_goal_is_reachable() {
        let mut grid = HexGrid::new(4, 1).unwrap();
        grid.set_traversable(Hex::new(3, 0), false);
        let mut finder = PathFinder::new();

        let path = finder.find_path(&grid, Hex::new(0, 0), Hex::new(3, 0));
        assert_eq!(path, vec![Hex::new(1, 0), Hex::new(2, 0), Hex::new(3, 0)]);
    }

    #[test]
    fn test_walled_off_is_unreachable() {
        // Storage column 2 blocked on every row splits the map in two
        let rows: Vec<Vec<bool>> = (0..4)
            .map(|_| vec![true, true, false, true, true])
            .collect();
        let grid = HexGrid::from_rows(&rows).unwrap();
        let start = grid.hex_at_storage(0, 0).unwrap();
        let goal = grid.hex_at_storage(4, 3).unwrap();
        let mut finder = PathFinder::new();

        assert!(finder.find_path(&grid, start, goal).is_empty());
        assert_eq!(finder.path_length(&grid, start, goal), None);
        assert!(finder.last_stats().expanded > 0);
    }

    #[test]
    fn test_arena_reused_between_searches() {
        let grid = HexGrid::new(6, 6).unwrap();
        let mut finder = PathFinder::with_capacity(4);
        let goal = grid.hex_at_storage(5, 5).unwrap();

        let first = finder.find_path(&grid, Hex::new(0, 0), goal);
        let second = finder.find_path(&grid, Hex::new(0, 0), goal);
        assert_eq!(first.len(), second.len());
        assert!(finder.arena.is_empty());
        assert!(finder.frontier.is_empty());
        assert!(finder.expanded.is_empty());
    }

    #[test]
    fn test_cheaper_route_reparents_frontier_entry() {
        // Some tiles are first reached from a longer route around the walls
        let rows: Vec<Vec<bool>> = [".#...", "#....", ".....", ".#.#.", "...#."]
            .iter()
            .map(|r| r.chars().map(|c| c == '.').collect())
            .collect();
        let grid = HexGrid::from_rows(&rows).unwrap();
        let start = grid.hex_at_storage(0, 4).unwrap();
        let goal = grid.hex_at_storage(4, 4).unwrap();
        let mut finder = PathFinder::new();

        let path = finder.find_path(&grid, start, goal);
        let stats = finder.last_stats();
        assert!(stats.relaxed > 0);
        assert_eq!(path.len(), 7);
        assert_eq!(path.last(), Some(&goal));
        assert!(is_connected(&path, start));
        for hex in &path[..path.len() - 1] {
            assert!(grid.is_traversable(*hex));
        }

        // Counter belongs to one search only
        finder.find_path(&grid, start, grid.hex_at_storage(1, 4).unwrap());
        assert_eq!(finder.last_stats().relaxed, 0);
        assert_eq!(finder.relaxed, 0);
    }

    #[test]
    fn test_occupants_do_not_block_search() {
        let mut grid = HexGrid::new(3, 1).unwrap();
        grid.place(Hex::new(1, 0), crate::actor::Actor::blind(7));
        let mut finder = PathFinder::new();
        assert_eq!(finder.find_path(&grid, Hex::new(0, 0), Hex::new(2, 0)).len(), 2);
    }
}
