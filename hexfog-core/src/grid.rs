//! Hex grid: tile storage, adjacency and occupant placement

use crate::actor::{Actor, ActorId};
use crate::board::Hex;
use crate::error::GridError;
use rustc_hash::FxHashMap;

// ============================================================================
// TILE
// ============================================================================

/// A single hex on the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    hex: Hex,
    traversable: bool,
    occupant: Option<Actor>,
    visible: bool,
}

impl Tile {
    fn new(hex: Hex, traversable: bool) -> Self {
        Self {
            hex,
            traversable,
            occupant: None,
            visible: true,
        }
    }

    /// Logical coordinate (the tile's identity)
    pub fn hex(&self) -> Hex {
        self.hex
    }

    pub fn is_traversable(&self) -> bool {
        self.traversable
    }

    pub fn occupant(&self) -> Option<Actor> {
        self.occupant
    }

    /// Visibility flag from the last fog refresh
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

// ============================================================================
// HEX GRID
// ============================================================================

/// Rectangular store of tiles addressed by logical hex coordinates.
///
/// Tiles are kept row-major by storage position; see [`Hex::to_storage`].
/// The grid owns placement: an actor is stored in the tile it occupies and
/// found back through the id index.
#[derive(Clone, Debug)]
pub struct HexGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    actors: FxHashMap<ActorId, Hex>,
}

impl HexGrid {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create an obstacle-free grid
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }

        let tiles = (0..height)
            .flat_map(|row| (0..width).map(move |col| (col, row)))
            .map(|(col, row)| Tile::new(Hex::from_storage(col as i32, row as i32), true))
            .collect();

        Ok(Self {
            width,
            height,
            tiles,
            actors: FxHashMap::default(),
        })
    }

    /// Create a grid from a traversability matrix indexed `[storage_row][storage_col]`
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, GridError> {
        let first = rows.first().ok_or(GridError::NoRows)?;
        let mut grid = Self::new(first.len(), rows.len())?;

        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != grid.width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: grid.width,
                    found: cells.len(),
                });
            }
            for (col, &traversable) in cells.iter().enumerate() {
                grid.tiles[row * grid.width + col].traversable = traversable;
            }
        }

        Ok(grid)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate tiles in storage order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    /// Logical coordinate stored at a storage position, if in bounds
    pub fn hex_at_storage(&self, col: usize, row: usize) -> Option<Hex> {
        (col < self.width && row < self.height)
            .then(|| Hex::from_storage(col as i32, row as i32))
    }

    fn index_of(&self, hex: Hex) -> Option<usize> {
        let (col, row) = hex.to_storage()?;
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.index_of(hex).is_some()
    }

    /// Bounds-checked tile lookup
    pub fn resolve(&self, hex: Hex) -> Option<&Tile> {
        self.index_of(hex).map(|i| &self.tiles[i])
    }

    fn resolve_mut(&mut self, hex: Hex) -> Option<&mut Tile> {
        let i = self.index_of(hex)?;
        Some(&mut self.tiles[i])
    }

    /// In-bounds neighbors, in [`crate::board::DIRECTIONS`] order
    pub fn neighbors(&self, hex: Hex) -> impl Iterator<Item = &Tile> + '_ {
        hex.neighbors().filter_map(move |n| self.resolve(n))
    }

    /// Hex distance between two coordinates
    pub fn distance(&self, a: Hex, b: Hex) -> u32 {
        a.distance_to(b)
    }

    /// False for blocked or out-of-bounds coordinates
    pub fn is_traversable(&self, hex: Hex) -> bool {
        self.resolve(hex).map_or(false, |t| t.traversable)
    }

    /// Change a tile's traversability. Returns false when out of bounds.
    pub fn set_traversable(&mut self, hex: Hex, traversable: bool) -> bool {
        match self.resolve_mut(hex) {
            Some(tile) => {
                tile.traversable = traversable;
                true
            }
            None => false,
        }
    }

    pub fn occupant(&self, hex: Hex) -> Option<Actor> {
        self.resolve(hex).and_then(|t| t.occupant)
    }

    /// Tile currently holding the actor
    pub fn locate(&self, id: ActorId) -> Option<Hex> {
        self.actors.get(&id).copied()
    }

    /// Traversable and unoccupied
    pub fn can_enter(&self, hex: Hex) -> bool {
        self.resolve(hex)
            .map_or(false, |t| t.traversable && t.occupant.is_none())
    }

    /// Iterate placed actors with their tiles, in storage order
    pub fn actors(&self) -> impl Iterator<Item = (Hex, Actor)> + '_ {
        self.tiles
            .iter()
            .filter_map(|t| t.occupant.map(|a| (t.hex, a)))
    }

    /// Placed actors that reveal the map
    pub fn sight_sources(&self) -> Vec<(Hex, Actor)> {
        self.actors().filter(|(_, a)| a.reveals).collect()
    }

    pub fn is_visible(&self, hex: Hex) -> bool {
        self.resolve(hex).map_or(false, |t| t.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.visible).count()
    }

    // ========================================================================
    // OCCUPANTS
    // ========================================================================

    /// Put an actor on a tile.
    ///
    /// Fails if the coordinate is out of bounds, the tile is occupied, or the
    /// actor is already on the grid.
    pub fn place(&mut self, hex: Hex, actor: Actor) -> bool {
        if self.actors.contains_key(&actor.id) {
            return false;
        }
        match self.resolve_mut(hex) {
            Some(tile) if tile.occupant.is_none() => {
                tile.occupant = Some(actor);
                self.actors.insert(actor.id, hex);
                true
            }
            _ => false,
        }
    }

    /// Take the occupant off a tile
    pub fn remove(&mut self, hex: Hex) -> Option<Actor> {
        let actor = self.resolve_mut(hex)?.occupant.take()?;
        self.actors.remove(&actor.id);
        Some(actor)
    }

    /// Transfer the occupant of `src` to `dst`.
    ///
    /// Succeeds iff `src` is occupied, `src != dst`, and `dst` is traversable
    /// and empty. On failure nothing changes.
    pub fn move_occupant(&mut self, src: Hex, dst: Hex) -> bool {
        if src == dst || !self.can_enter(dst) {
            return false;
        }
        let actor = match self.resolve_mut(src).and_then(|t| t.occupant.take()) {
            Some(a) => a,
            None => return false,
        };
        if let Some(tile) = self.resolve_mut(dst) {
            tile.occupant = Some(actor);
        }
        self.actors.insert(actor.id, dst);
        true
    }

    // ========================================================================
    // RESIZE
    // ========================================================================

    /// Change the storage dimensions.
    ///
    /// Tiles inside both the old and new bounds keep their state; tiles that
    /// fall outside are dropped and their occupants returned. New tiles are
    /// open and empty.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<Vec<Actor>, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }

        let mut evicted = Vec::new();
        for (i, tile) in self.tiles.iter().enumerate() {
            let (col, row) = (i % self.width, i / self.width);
            if col >= width || row >= height {
                if let Some(actor) = tile.occupant {
                    evicted.push(actor);
                }
            }
        }

        let mut tiles = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                if col < self.width && row < self.height {
                    tiles.push(self.tiles[row * self.width + col]);
                } else {
                    tiles.push(Tile::new(Hex::from_storage(col as i32, row as i32), true));
                }
            }
        }

        for actor in &evicted {
            self.actors.remove(&actor.id);
        }
        self.tiles = tiles;
        self.width = width;
        self.height = height;

        tracing::debug!(width, height, evicted = evicted.len(), "grid resized");
        Ok(evicted)
    }

    // ========================================================================
    // VISIBILITY FLAGS
    // ========================================================================

    pub(crate) fn set_all_visible(&mut self, visible: bool) {
        for tile in &mut self.tiles {
            tile.visible = visible;
        }
    }

    pub(crate) fn mark_visible(&mut self, hex: Hex) {
        if let Some(tile) = self.resolve_mut(hex) {
            tile.visible = true;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(width: usize, height: usize) -> HexGrid {
        HexGrid::new(width, height).unwrap()
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            HexGrid::new(0, 4).unwrap_err(),
            GridError::EmptyDimensions { width: 0, height: 4 }
        );
        assert_eq!(HexGrid::from_rows(&[]).unwrap_err(), GridError::NoRows);
        assert_eq!(
            HexGrid::from_rows(&[vec![true, true], vec![true]]).unwrap_err(),
            GridError::RaggedRow { row: 1, expected: 2, found: 1 }
        );
    }

    #[test]
    fn test_resolve_bounds() {
        let grid = open_grid(3, 3);
        assert!(grid.resolve(Hex::new(0, 0)).is_some());
        // Row 2 is shifted one column left in logical space
        assert!(grid.resolve(Hex::new(-1, 2)).is_some());
        assert!(grid.resolve(Hex::new(2, 2)).is_none());
        assert!(grid.resolve(Hex::new(0, -1)).is_none());
        assert!(grid.resolve(Hex::new(3, 0)).is_none());
        assert_eq!(grid.hex_at_storage(2, 2), Some(Hex::new(1, 2)));
        assert_eq!(grid.hex_at_storage(3, 0), None);
    }

    #[test]
    fn test_extreme_coordinates_are_off_grid() {
        let grid = open_grid(3, 3);
        for hex in [
            Hex::new(i32::MAX, 2),
            Hex::new(i32::MAX, 0),
            Hex::new(i32::MIN, -1),
            Hex::new(i32::MIN, i32::MIN),
            Hex::new(i32::MAX, i32::MAX),
        ] {
            assert!(grid.resolve(hex).is_none());
            assert!(!grid.contains(hex));
            assert_eq!(grid.neighbors(hex).count(), 0);
            assert!(!grid.is_traversable(hex));
        }
        assert_eq!(grid.distance(Hex::new(i32::MAX, 0), Hex::new(-1, 0)), 1 << 31);
        assert_eq!(grid.distance(Hex::new(i32::MIN, i32::MIN), Hex::new(0, 0)), u32::MAX);
    }

    #[test]
    fn test_every_tile_resolves_to_itself() {
        let grid = open_grid(5, 4);
        assert_eq!(grid.len(), 20);
        for tile in grid.tiles() {
            assert_eq!(grid.resolve(tile.hex()).map(|t| t.hex()), Some(tile.hex()));
        }
    }

    #[test]
    fn test_neighbors_order_and_edges() {
        let grid = open_grid(5, 5);
        let center: Vec<_> = grid.neighbors(Hex::new(1, 2)).map(|t| t.hex()).collect();
        assert_eq!(
            center,
            vec![
                Hex::new(2, 2),
                Hex::new(1, 3),
                Hex::new(0, 3),
                Hex::new(2, 1),
                Hex::new(1, 1),
                Hex::new(0, 2),
            ]
        );

        // Corner tile loses the out-of-bounds neighbors
        let corner: Vec<_> = grid.neighbors(Hex::new(0, 0)).map(|t| t.hex()).collect();
        assert_eq!(corner, vec![Hex::new(1, 0), Hex::new(0, 1)]);
    }

    #[test]
    fn test_place_and_remove() {
        let mut grid = open_grid(3, 3);
        let scout = Actor::scout(1, 2);
        assert!(grid.place(Hex::new(1, 1), scout));
        assert_eq!(grid.locate(scout.id), Some(Hex::new(1, 1)));
        assert!(!grid.can_enter(Hex::new(1, 1)));

        // Same id twice, occupied tile, out of bounds
        assert!(!grid.place(Hex::new(0, 0), scout));
        assert!(!grid.place(Hex::new(1, 1), Actor::blind(2)));
        assert!(!grid.place(Hex::new(9, 9), Actor::blind(2)));

        assert_eq!(grid.remove(Hex::new(1, 1)), Some(scout));
        assert_eq!(grid.locate(scout.id), None);
        assert_eq!(grid.remove(Hex::new(1, 1)), None);
    }

    #[test]
    fn test_move_rules() {
        let mut grid = open_grid(4, 4);
        let a = Actor::scout(1, 1);
        let b = Actor::blind(2);
        grid.place(Hex::new(0, 0), a);
        grid.place(Hex::new(1, 0), b);
        grid.set_traversable(Hex::new(0, 1), false);

        // Occupied destination
        assert!(!grid.move_occupant(Hex::new(0, 0), Hex::new(1, 0)));
        // Blocked destination
        assert!(!grid.move_occupant(Hex::new(0, 0), Hex::new(0, 1)));
        // Same tile
        assert!(!grid.move_occupant(Hex::new(0, 0), Hex::new(0, 0)));
        // Empty source
        assert!(!grid.move_occupant(Hex::new(2, 0), Hex::new(3, 0)));
        assert_eq!(grid.occupant(Hex::new(0, 0)), Some(a));
        assert_eq!(grid.occupant(Hex::new(1, 0)), Some(b));

        assert!(grid.move_occupant(Hex::new(0, 0), Hex::new(2, 1)));
        assert_eq!(grid.occupant(Hex::new(0, 0)), None);
        assert_eq!(grid.occupant(Hex::new(2, 1)), Some(a));
        assert_eq!(grid.locate(a.id), Some(Hex::new(2, 1)));
    }

    #[test]
    fn test_resize_keeps_and_evicts() {
        let mut grid = open_grid(4, 4);
        grid.set_traversable(Hex::new(0, 0), false);
        grid.place(Hex::new(1, 0), Actor::scout(1, 1));
        let far = grid.hex_at_storage(3, 3).unwrap();
        grid.place(far, Actor::blind(2));

        let evicted = grid.resize(2, 5).unwrap();
        assert_eq!(evicted, vec![Actor::blind(2)]);
        assert_eq!(grid.len(), 10);
        assert!(!grid.is_traversable(Hex::new(0, 0)));
        assert_eq!(grid.locate(ActorId(1)), Some(Hex::new(1, 0)));
        assert_eq!(grid.locate(ActorId(2)), None);
        assert!(grid.is_traversable(grid.hex_at_storage(1, 4).unwrap()));

        assert!(grid.resize(0, 2).is_err());
        assert_eq!(grid.len(), 10);
    }
}
