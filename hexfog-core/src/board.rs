//! Hex board geometry: logical coordinates, storage transform, cube distance

use serde::{Deserialize, Serialize};

/// Logical hex coordinate (column, row) in axial-like space
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub col: i32,
    pub row: i32,
}

impl Hex {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Storage (array) position for this logical coordinate.
    ///
    /// Each pair of rows shifts the storage column by one, so the stored map
    /// stays rectangular while logical columns slant. `None` when the storage
    /// column does not fit in an `i32`.
    pub fn to_storage(self) -> Option<(i32, i32)> {
        let col = self.col.checked_add(self.row.div_euclid(2))?;
        Some((col, self.row))
    }

    /// Inverse of [`Hex::to_storage`]
    pub fn from_storage(col: i32, row: i32) -> Self {
        Self::new(col - row.div_euclid(2), row)
    }

    /// Cube coordinate (x, y, z) with x + y + z == 0, widened so every
    /// logical coordinate has one
    pub fn cube(self) -> (i64, i64, i64) {
        let (x, y) = (i64::from(self.col), i64::from(self.row));
        (x, y, -(x + y))
    }

    /// Hex distance: the largest of the three cube deltas, saturating at `u32::MAX`
    pub fn distance_to(self, other: Hex) -> u32 {
        let (ax, ay, az) = self.cube();
        let (bx, by, bz) = other.cube();
        let steps = (ax - bx)
            .unsigned_abs()
            .max((ay - by).unsigned_abs())
            .max((az - bz).unsigned_abs());
        u32::try_from(steps).unwrap_or(u32::MAX)
    }

    /// Neighbor in direction (0-5); `None` past the edge of `i32` space
    pub fn neighbor(self, direction: usize) -> Option<Hex> {
        let (dc, dr) = DIRECTIONS[direction % 6];
        Some(Hex::new(self.col.checked_add(dc)?, self.row.checked_add(dr)?))
    }

    /// Neighbors in [`DIRECTIONS`] order, without grid bounds checks
    pub fn neighbors(self) -> impl Iterator<Item = Hex> {
        (0..DIRECTIONS.len()).filter_map(move |dir| self.neighbor(dir))
    }
}

impl std::fmt::Display for Hex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl std::str::FromStr for Hex {
    type Err = String;

    /// Parse "col,row"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (col, row) = s
            .split_once(',')
            .ok_or_else(|| format!("expected COL,ROW, got {:?}", s))?;
        let col = col
            .trim()
            .parse()
            .map_err(|e| format!("bad column {:?}: {}", col, e))?;
        let row = row
            .trim()
            .parse()
            .map_err(|e| format!("bad row {:?}: {}", row, e))?;
        Ok(Hex::new(col, row))
    }
}

/// Neighbor deltas (dcol, drow), in the order neighbors are reported
pub const DIRECTIONS: [(i32, i32); 6] = [
    (1, 0),
    (0, 1),
    (-1, 1),
    (1, -1),
    (0, -1),
    (-1, 0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_round_trip() {
        for row in -7..7 {
            for col in -7..7 {
                let hex = Hex::new(col, row);
                let (sc, sr) = hex.to_storage().unwrap();
                assert_eq!(Hex::from_storage(sc, sr), hex);
            }
        }
    }

    #[test]
    fn test_storage_floors_negative_rows() {
        // floor(-1 / 2) == -1, not 0
        assert_eq!(Hex::new(0, -1).to_storage(), Some((-1, -1)));
        assert_eq!(Hex::new(3, 5).to_storage(), Some((5, 5)));
        assert_eq!(Hex::from_storage(0, 3), Hex::new(-1, 3));
    }

    #[test]
    fn test_distance() {
        let origin = Hex::new(0, 0);
        assert_eq!(origin.distance_to(origin), 0);
        assert_eq!(origin.distance_to(Hex::new(2, 2)), 4);
        assert_eq!(origin.distance_to(Hex::new(2, -2)), 2);
        assert_eq!(Hex::new(-3, 1).distance_to(Hex::new(1, -1)), 4);
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        let center = Hex::new(4, -2);
        let ns: Vec<_> = center.neighbors().collect();
        assert_eq!(ns.len(), 6);
        for (dir, n) in ns.iter().enumerate() {
            assert_eq!(center.distance_to(*n), 1);
            assert_eq!(center.neighbor(dir), Some(*n));
        }
    }

    #[test]
    fn test_extreme_coordinates() {
        let far = Hex::new(i32::MAX, 2);
        assert_eq!(far.to_storage(), None);
        assert_eq!(Hex::new(i32::MIN, -1).to_storage(), None);
        assert_eq!(Hex::new(i32::MIN, 2).to_storage(), Some((i32::MIN + 1, 2)));

        assert_eq!(Hex::new(i32::MAX, 0).distance_to(Hex::new(-1, 0)), 1 << 31);
        assert_eq!(Hex::new(i32::MIN, 0).distance_to(Hex::new(0, 0)), 1 << 31);
        assert_eq!(Hex::new(i32::MIN, i32::MIN).distance_to(Hex::new(0, 0)), u32::MAX);
        assert_eq!(Hex::new(i32::MAX, 0).distance_to(Hex::new(i32::MAX - 1, 0)), 1);

        // Only directions that stay inside i32 space are produced
        let corner: Vec<_> = Hex::new(i32::MAX, i32::MIN).neighbors().collect();
        assert_eq!(
            corner,
            vec![
                Hex::new(i32::MAX, i32::MIN + 1),
                Hex::new(i32::MAX - 1, i32::MIN + 1),
                Hex::new(i32::MAX - 1, i32::MIN),
            ]
        );
        assert_eq!(Hex::new(i32::MAX, 0).neighbor(0), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("3,-2".parse::<Hex>(), Ok(Hex::new(3, -2)));
        assert_eq!(" 1 , 4 ".parse::<Hex>(), Ok(Hex::new(1, 4)));
        assert!("3".parse::<Hex>().is_err());
        assert!("a,b".parse::<Hex>().is_err());
    }
}
